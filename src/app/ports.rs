use crate::chart::table::TableRow;
use crate::chart::{ChartHandle, ChartSpec};
use crate::error::Result;
use crate::types::{RawObservation, YearRange};
use async_trait::async_trait;

/// Remote source of indicator observations
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch_series(
        &self,
        subject: &str,
        indicator: &str,
        range: YearRange,
    ) -> Result<Vec<RawObservation>>;
}

/// Drawing surface for the line chart.
///
/// `render` produces a new live chart and hands back its owning token;
/// `dispose` tears a previous one down. Callers must dispose before
/// rendering again so two live charts never coexist.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    async fn render(&self, spec: &ChartSpec) -> Result<ChartHandle>;
    async fn dispose(&self, handle: ChartHandle) -> Result<()>;
}

/// Output surface for the tabular listing
#[async_trait]
pub trait TableSurface: Send + Sync {
    async fn render_rows(&self, rows: &[TableRow]) -> Result<()>;
}
