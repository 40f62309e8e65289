use crate::app::ports::SeriesSource;
use crate::constants::get_cataloged_indicators;
use crate::error::Result;
use crate::types::{RawObservation, YearRange};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Snapshot file layout: provenance metadata plus the raw observations
#[derive(Debug, Serialize)]
pub struct ExportSnapshot {
    pub metadata: ExportMetadata,
    pub data: Vec<RawObservation>,
}

#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    pub source: String,
    pub retrieved_on: String,
    pub subject: String,
    pub indicator: String,
    pub year_range: Option<ExportYearRange>,
}

#[derive(Debug, Serialize)]
pub struct ExportYearRange {
    pub min: i32,
    pub max: i32,
}

/// Fetch every cataloged indicator for one subject and write a JSON
/// snapshot per indicator into `out_dir`. An indicator that fails to
/// fetch is logged and skipped; the rest are still written.
pub async fn export_all(
    source: &dyn SeriesSource,
    subject: &str,
    range: YearRange,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(out_dir).await?;

    let mut written = Vec::new();
    for (alias, code) in get_cataloged_indicators() {
        info!(subject, indicator = code, "Exporting indicator snapshot");
        let raw = match source.fetch_series(subject, code, range).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(subject, indicator = code, "Skipping indicator: {}", e);
                continue;
            }
        };

        let snapshot = build_snapshot(subject, code, raw);
        let path = out_dir.join(format!("{}_{}.json", subject.to_lowercase(), alias));
        tokio::fs::write(&path, serde_json::to_string_pretty(&snapshot)?).await?;
        written.push(path);
    }

    Ok(written)
}

fn build_snapshot(subject: &str, indicator: &str, data: Vec<RawObservation>) -> ExportSnapshot {
    let years: Vec<i32> = data
        .iter()
        .filter_map(|obs| obs.date.parse::<i32>().ok())
        .collect();
    let year_range = match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => Some(ExportYearRange { min, max }),
        _ => None,
    };

    ExportSnapshot {
        metadata: ExportMetadata {
            source: "World Bank API".to_string(),
            retrieved_on: Utc::now().to_rfc3339(),
            subject: subject.to_string(),
            indicator: indicator.to_string(),
            year_range,
        },
        data,
    }
}
