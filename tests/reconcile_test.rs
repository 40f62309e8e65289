use async_trait::async_trait;
use econ_tracker::app::ports::{RenderSurface, TableSurface};
use econ_tracker::chart::reconciler::ChartReconciler;
use econ_tracker::chart::table::TableRow;
use econ_tracker::chart::{ChartHandle, ChartSpec};
use econ_tracker::error::Result;
use econ_tracker::store::{SeriesStore, StoreSnapshot};
use econ_tracker::types::NormalizedSeries;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingSurface {
    rendered: Arc<Mutex<Vec<ChartSpec>>>,
    disposed: Arc<Mutex<Vec<u64>>>,
    next_id: AtomicU64,
}

#[async_trait]
impl RenderSurface for RecordingSurface {
    async fn render(&self, spec: &ChartSpec) -> Result<ChartHandle> {
        self.rendered.lock().await.push(spec.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ChartHandle { id, artifact: None })
    }

    async fn dispose(&self, handle: ChartHandle) -> Result<()> {
        self.disposed.lock().await.push(handle.id);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingTable {
    rows: Arc<Mutex<Vec<Vec<TableRow>>>>,
}

#[async_trait]
impl TableSurface for RecordingTable {
    async fn render_rows(&self, rows: &[TableRow]) -> Result<()> {
        self.rows.lock().await.push(rows.to_vec());
        Ok(())
    }
}

fn series(label: &str, years: &[&str], values: &[f64]) -> NormalizedSeries {
    NormalizedSeries {
        label: label.to_string(),
        indicator_name: "GDP (current US$)".to_string(),
        years: years.iter().map(|y| y.to_string()).collect(),
        values: values.to_vec(),
    }
}

struct Harness {
    reconciler: ChartReconciler,
    rendered: Arc<Mutex<Vec<ChartSpec>>>,
    disposed: Arc<Mutex<Vec<u64>>>,
    rows: Arc<Mutex<Vec<Vec<TableRow>>>>,
}

fn harness() -> Harness {
    let surface = RecordingSurface::default();
    let table = RecordingTable::default();
    let rendered = surface.rendered.clone();
    let disposed = surface.disposed.clone();
    let rows = table.rows.clone();
    Harness {
        reconciler: ChartReconciler::new(Box::new(surface), Box::new(table)),
        rendered,
        disposed,
        rows,
    }
}

#[tokio::test]
async fn clearing_comparison_renders_single_dataset() -> anyhow::Result<()> {
    let mut h = harness();
    let mut store = SeriesStore::new();
    store.set_main(series("Ethiopia", &["2019", "2020"], &[10.0, 12.0]));
    store.set_comparison(Some(series("Kenya", &["2019", "2020"], &[1.0, 2.0])));

    h.reconciler.reconcile(&store.snapshot()).await?;
    assert_eq!(h.rendered.lock().await.last().unwrap().datasets.len(), 2);

    store.set_comparison(None);
    h.reconciler.reconcile(&store.snapshot()).await?;

    let rendered = h.rendered.lock().await;
    let last = rendered.last().unwrap();
    assert_eq!(last.datasets.len(), 1);
    assert_eq!(last.datasets[0].label, "Ethiopia");
    Ok(())
}

#[tokio::test]
async fn reconcile_is_idempotent_and_disposes_one_prior_chart_per_call() -> anyhow::Result<()> {
    let mut h = harness();
    let mut store = SeriesStore::new();
    store.set_main(series("Ethiopia", &["2019", "2020"], &[10.0, 12.0]));
    let snapshot = store.snapshot();

    h.reconciler.reconcile(&snapshot).await?;
    h.reconciler.reconcile(&snapshot).await?;

    let rendered = h.rendered.lock().await;
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0], rendered[1]);

    // no live chart before the first call, exactly one disposal after it
    let disposed = h.disposed.lock().await;
    assert_eq!(disposed.as_slice(), &[1]);
    assert_eq!(h.reconciler.live_chart().unwrap().id, 2);
    Ok(())
}

#[tokio::test]
async fn empty_snapshot_degrades_to_empty_frame_not_error() -> anyhow::Result<()> {
    let mut h = harness();

    h.reconciler
        .reconcile(&StoreSnapshot { main: None, comparison: None })
        .await?;

    let rendered = h.rendered.lock().await;
    assert!(rendered[0].datasets.is_empty());
    assert!(rendered[0].x_labels.is_empty());
    assert_eq!(rendered[0].title, "Economic Indicator");

    let rows = h.rows.lock().await;
    assert!(rows[0].is_empty());
    Ok(())
}

#[tokio::test]
async fn table_rows_come_from_main_series_only() -> anyhow::Result<()> {
    let mut h = harness();
    let mut store = SeriesStore::new();
    store.set_main(series("Ethiopia", &["2019", "2020"], &[10.0, 12.0]));
    store.set_comparison(Some(series("Kenya", &["2018"], &[5.0])));

    h.reconciler.reconcile(&store.snapshot()).await?;

    let rows = h.rows.lock().await;
    let latest = rows.last().unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].year, "2019");
    assert_eq!(latest[0].value, Some(10.0));
    Ok(())
}
