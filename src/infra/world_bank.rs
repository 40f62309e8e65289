use crate::app::ports::SeriesSource;
use crate::config::ApiConfig;
use crate::error::{Result, TrackerError};
use crate::types::{RawObservation, YearRange};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// World Bank v2 API adapter.
///
/// Queries `GET {base}/v2/country/{subject}/indicator/{code}?format=json&date={start}:{end}`
/// and unwraps the `[metadata, observations]` response envelope.
pub struct WorldBankSource {
    client: reqwest::Client,
    base_url: String,
}

impl WorldBankSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SeriesSource for WorldBankSource {
    #[instrument(skip(self))]
    async fn fetch_series(
        &self,
        subject: &str,
        indicator: &str,
        range: YearRange,
    ) -> Result<Vec<RawObservation>> {
        let url = format!(
            "{}/v2/country/{}/indicator/{}?format=json&date={}",
            self.base_url, subject, indicator, range
        );
        debug!(%url, "Fetching observations");

        let response = self.client.get(&url).send().await?;
        let body: Value = response.json().await?;
        let raw = unwrap_observations(body, subject, indicator)?;

        info!(count = raw.len(), subject, indicator, "Fetched observations");
        Ok(raw)
    }
}

/// Pull the observations array out of the `[metadata, observations]`
/// envelope. The API answers queries that match nothing with a single
/// metadata element or an explicit null in the second slot.
fn unwrap_observations(body: Value, subject: &str, indicator: &str) -> Result<Vec<RawObservation>> {
    let observations = body
        .get(1)
        .filter(|v| !v.is_null())
        .cloned()
        .ok_or_else(|| TrackerError::NoData {
            subject: subject.to_string(),
            indicator: indicator.to_string(),
        })?;
    Ok(serde_json::from_value(observations)?)
}
