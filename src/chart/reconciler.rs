use crate::app::ports::{RenderSurface, TableSurface};
use crate::chart::table::build_rows;
use crate::chart::{ChartDataset, ChartHandle, ChartSpec};
use crate::constants::{COMPARISON_COLOR, PRIMARY_COLOR};
use crate::error::Result;
use crate::store::StoreSnapshot;
use crate::types::NormalizedSeries;
use tracing::debug;

/// Fallback chart title when no main series is on display
const DEFAULT_TITLE: &str = "Economic Indicator";

/// Rebuilds the chart and table from a store snapshot.
///
/// Reconciliation is a full rebuild, not an incremental patch: any live
/// chart is disposed first, then a fresh one is rendered from whatever
/// the snapshot holds. Zero, one, or two series are all valid input and
/// degrade to a partial or empty chart rather than an error.
pub struct ChartReconciler {
    surface: Box<dyn RenderSurface>,
    table: Box<dyn TableSurface>,
    live: Option<ChartHandle>,
}

impl ChartReconciler {
    pub fn new(surface: Box<dyn RenderSurface>, table: Box<dyn TableSurface>) -> Self {
        Self {
            surface,
            table,
            live: None,
        }
    }

    pub async fn reconcile(&mut self, snapshot: &StoreSnapshot) -> Result<()> {
        // Dispose-before-create: never two live charts at once
        if let Some(handle) = self.live.take() {
            debug!(handle_id = handle.id, "Disposing previous chart");
            self.surface.dispose(handle).await?;
        }

        let spec = build_chart_spec(snapshot);
        let handle = self.surface.render(&spec).await?;
        self.live = Some(handle);

        let rows = snapshot
            .main
            .as_ref()
            .map(build_rows)
            .unwrap_or_default();
        self.table.render_rows(&rows).await?;

        Ok(())
    }

    pub fn live_chart(&self) -> Option<&ChartHandle> {
        self.live.as_ref()
    }
}

/// Pure assembly of the chart spec from a snapshot.
///
/// The x-axis always comes from the main series; a comparison series is
/// plotted against main's years, never its own, so a comparison with a
/// different year range will misalign or truncate. With no main series
/// the axis is empty even when a comparison is present.
pub fn build_chart_spec(snapshot: &StoreSnapshot) -> ChartSpec {
    let mut datasets = Vec::new();
    if let Some(main) = &snapshot.main {
        datasets.push(dataset_for(main, PRIMARY_COLOR));
    }
    if let Some(comparison) = &snapshot.comparison {
        datasets.push(dataset_for(comparison, COMPARISON_COLOR));
    }

    ChartSpec {
        title: snapshot
            .main
            .as_ref()
            .map(|m| m.indicator_name.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        x_labels: snapshot
            .main
            .as_ref()
            .map(|m| m.years.clone())
            .unwrap_or_default(),
        datasets,
    }
}

fn dataset_for(series: &NormalizedSeries, color: (u8, u8, u8)) -> ChartDataset {
    ChartDataset {
        label: series.label.clone(),
        values: series.values.clone(),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, indicator: &str, years: &[&str], values: &[f64]) -> NormalizedSeries {
        NormalizedSeries {
            label: label.to_string(),
            indicator_name: indicator.to_string(),
            years: years.iter().map(|y| y.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn empty_snapshot_builds_empty_frame() {
        let spec = build_chart_spec(&StoreSnapshot { main: None, comparison: None });
        assert_eq!(spec.title, "Economic Indicator");
        assert!(spec.x_labels.is_empty());
        assert!(spec.datasets.is_empty());
    }

    #[test]
    fn main_only_builds_single_primary_dataset() {
        let snapshot = StoreSnapshot {
            main: Some(series("Ethiopia", "GDP", &["2019", "2020"], &[10.0, 12.0])),
            comparison: None,
        };
        let spec = build_chart_spec(&snapshot);
        assert_eq!(spec.title, "GDP");
        assert_eq!(spec.x_labels, vec!["2019", "2020"]);
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].label, "Ethiopia");
        assert_eq!(spec.datasets[0].color, PRIMARY_COLOR);
    }

    #[test]
    fn comparison_is_second_and_plotted_against_mains_axis() {
        let snapshot = StoreSnapshot {
            main: Some(series("Ethiopia", "GDP", &["2019", "2020"], &[10.0, 12.0])),
            comparison: Some(series("Kenya", "GDP", &["2018", "2019", "2020"], &[1.0, 2.0, 3.0])),
        };
        let spec = build_chart_spec(&snapshot);
        assert_eq!(spec.datasets.len(), 2);
        assert_eq!(spec.datasets[1].label, "Kenya");
        assert_eq!(spec.datasets[1].color, COMPARISON_COLOR);
        // axis stays main's, even though comparison covers more years
        assert_eq!(spec.x_labels, vec!["2019", "2020"]);
    }

    #[test]
    fn comparison_without_main_gets_no_axis_or_title() {
        let snapshot = StoreSnapshot {
            main: None,
            comparison: Some(series("Kenya", "GDP", &["2020"], &[3.0])),
        };
        let spec = build_chart_spec(&snapshot);
        assert!(spec.x_labels.is_empty());
        assert_eq!(spec.title, "Economic Indicator");
        assert_eq!(spec.datasets.len(), 1);
    }
}
