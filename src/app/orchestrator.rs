use crate::app::ports::SeriesSource;
use crate::chart::reconciler::ChartReconciler;
use crate::constants::PRIMARY_SUBJECT;
use crate::error::Result;
use crate::normalize::normalize;
use crate::store::{SeriesStore, StoreSnapshot};
use crate::types::{Controls, RawObservation};
use chrono::{Datelike, Local};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Drives one update cycle per control change: fetch the main series
/// (and the comparison series, if one is selected), push each normalized
/// result into its store slot, and reconcile after every completion.
///
/// Fetch and normalization failures are logged and swallowed at this
/// boundary: the affected slot keeps its prior contents and the prior
/// render stays on display. There is no retry.
///
/// Every control change bumps a generation counter. A completion carrying
/// a stale generation is discarded instead of written, so an uncancelled
/// fetch from a superseded control change can never overwrite newer data.
pub struct UpdateOrchestrator {
    source: Arc<dyn SeriesSource>,
    store: SeriesStore,
    reconciler: ChartReconciler,
    generation: AtomicU64,
}

impl UpdateOrchestrator {
    pub fn new(source: Arc<dyn SeriesSource>, reconciler: ChartReconciler) -> Self {
        Self {
            source,
            store: SeriesStore::new(),
            reconciler,
            generation: AtomicU64::new(0),
        }
    }

    /// Run one full update cycle for the given control values.
    #[instrument(skip(self))]
    pub async fn apply_controls(&mut self, controls: &Controls) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let range = controls.window.resolve(Local::now().year());
        info!(%range, indicator = %controls.indicator, generation, "Applying control change");

        match controls.compare.as_deref() {
            None => {
                // The "none" sentinel clears the comparison slot right away,
                // before the main fetch resolves
                self.store.set_comparison(None);
                self.reconcile().await;

                let raw = self
                    .source
                    .fetch_series(PRIMARY_SUBJECT, &controls.indicator, range)
                    .await;
                self.complete_main(generation, raw).await;
            }
            Some(subject) => {
                // Two independent fetches; each completion mutates its own
                // slot and reconciles whatever the store holds at that point
                let (main_raw, comparison_raw) = tokio::join!(
                    self.source
                        .fetch_series(PRIMARY_SUBJECT, &controls.indicator, range),
                    self.source.fetch_series(subject, &controls.indicator, range),
                );
                self.complete_main(generation, main_raw).await;
                self.complete_comparison(generation, subject, comparison_raw).await;
            }
        }
    }

    /// Completion path for the main fetch. Public so stale-generation
    /// handling can be exercised directly.
    pub async fn complete_main(&mut self, generation: u64, raw: Result<Vec<RawObservation>>) {
        if self.is_stale(generation) {
            warn!(generation, "Discarding stale main fetch completion");
            return;
        }
        match raw.and_then(|raw| normalize(&raw, PRIMARY_SUBJECT)) {
            Ok(series) => {
                self.store.set_main(series);
                self.reconcile().await;
            }
            Err(e) => error!("Main series fetch failed, keeping prior state: {}", e),
        }
    }

    /// Completion path for the comparison fetch.
    pub async fn complete_comparison(
        &mut self,
        generation: u64,
        subject: &str,
        raw: Result<Vec<RawObservation>>,
    ) {
        if self.is_stale(generation) {
            warn!(generation, subject, "Discarding stale comparison fetch completion");
            return;
        }
        match raw.and_then(|raw| normalize(&raw, subject)) {
            Ok(series) => {
                self.store.set_comparison(Some(series));
                self.reconcile().await;
            }
            Err(e) => error!(subject, "Comparison fetch failed, keeping prior state: {}", e),
        }
    }

    async fn reconcile(&mut self) {
        let snapshot = self.store.snapshot();
        if let Err(e) = self.reconciler.reconcile(&snapshot).await {
            error!("Reconcile failed: {}", e);
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation.load(Ordering::SeqCst)
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }
}
