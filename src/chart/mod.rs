pub mod reconciler;
pub mod table;

use std::path::PathBuf;

/// One plotted series: label, y-values, and line color.
/// Values are positioned against the shared x-axis by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub values: Vec<f64>,
    pub color: (u8, u8, u8),
}

/// Everything a render surface needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Token for the single live rendered chart.
///
/// At most one handle exists at a time: the reconciler disposes the
/// previous one through the render surface before rendering again.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub id: u64,
    /// Rendered artifact on disk, if the surface produces one
    pub artifact: Option<PathBuf>,
}
