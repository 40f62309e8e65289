use crate::app::ports::RenderSurface;
use crate::chart::{ChartHandle, ChartSpec};
use crate::config::ChartConfig;
use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use plotters::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Renders chart specs to a PNG file with plotters.
///
/// Drawing is synchronous, so it runs on the blocking pool. Each render
/// overwrites the configured output path; the handle returned points at
/// that artifact.
pub struct PlottersSurface {
    output_path: PathBuf,
    width: u32,
    height: u32,
    next_id: AtomicU64,
}

impl PlottersSurface {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            output_path: PathBuf::from(&config.output_path),
            width: config.width,
            height: config.height,
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl RenderSurface for PlottersSurface {
    async fn render(&self, spec: &ChartSpec) -> Result<ChartHandle> {
        if let Some(parent) = self.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let spec = spec.clone();
        let path = self.output_path.clone();
        let (width, height) = (self.width, self.height);

        let handle = tokio::task::spawn_blocking(move || draw(&spec, &path, width, height));
        handle
            .await
            .map_err(|e| TrackerError::Render(format!("chart task join failed: {}", e)))??;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        info!(id, path = %self.output_path.display(), "Chart rendered");
        Ok(ChartHandle {
            id,
            artifact: Some(self.output_path.clone()),
        })
    }

    async fn dispose(&self, handle: ChartHandle) -> Result<()> {
        // The artifact stays on disk until the next render overwrites it;
        // disposal only retires the handle
        debug!(id = handle.id, "Chart handle disposed");
        Ok(())
    }
}

fn draw(spec: &ChartSpec, path: &PathBuf, width: u32, height: u32) -> Result<()> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    // No main series means no axis to build; present an empty frame
    if spec.x_labels.is_empty() {
        root.present().map_err(render_err)?;
        return Ok(());
    }

    let (y_min, y_max) = value_bounds(&spec.datasets);
    let x_labels = spec.x_labels.clone();
    let x_max = (x_labels.len() - 1).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Value")
        .x_labels(x_labels.len().min(12))
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .draw()
        .map_err(render_err)?;

    for dataset in &spec.datasets {
        let (r, g, b) = dataset.color;
        let color = RGBColor(r, g, b);
        chart
            .draw_series(LineSeries::new(
                dataset.values.iter().enumerate().map(|(i, &v)| (i, v)),
                ShapeStyle::from(&color).stroke_width(2),
            ))
            .map_err(render_err)?
            .label(&dataset.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !spec.datasets.is_empty() {
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Y-axis bounds with 10% padding; degenerate inputs fall back to 0..1
fn value_bounds(datasets: &[crate::chart::ChartDataset]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for dataset in datasets {
        for &v in &dataset.values {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    let padding = if span > 0.0 {
        span * 0.1
    } else {
        max.abs().max(1.0) * 0.1
    };
    (min - padding, max + padding)
}

fn render_err(e: impl std::fmt::Display) -> TrackerError {
    TrackerError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartDataset;

    fn dataset(values: &[f64]) -> ChartDataset {
        ChartDataset {
            label: "Ethiopia".to_string(),
            values: values.to_vec(),
            color: (4, 106, 56),
        }
    }

    #[test]
    fn bounds_pad_around_min_and_max() {
        let (lo, hi) = value_bounds(&[dataset(&[10.0, 20.0])]);
        assert!(lo < 10.0);
        assert!(hi > 20.0);
    }

    #[test]
    fn bounds_handle_flat_and_empty_series() {
        let (lo, hi) = value_bounds(&[dataset(&[5.0, 5.0])]);
        assert!(lo < 5.0 && hi > 5.0);

        let (lo, hi) = value_bounds(&[]);
        assert_eq!((lo, hi), (0.0, 1.0));
    }
}
