use crate::app::ports::TableSurface;
use crate::chart::table::{format_value, TableRow};
use crate::error::Result;
use async_trait::async_trait;

/// Writes the tabular listing to stdout.
pub struct StdoutTable;

#[async_trait]
impl TableSurface for StdoutTable {
    async fn render_rows(&self, rows: &[TableRow]) -> Result<()> {
        if rows.is_empty() {
            println!("(no data rows)");
            return Ok(());
        }
        println!("{:<8} {:>24}", "Year", "Value");
        for row in rows {
            println!("{:<8} {:>24}", row.year, format_value(row.value));
        }
        Ok(())
    }
}
