use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

mod app;
mod chart;
mod config;
mod constants;
mod error;
mod export;
mod infra;
mod logging;
mod normalize;
mod store;
mod types;

use crate::app::orchestrator::UpdateOrchestrator;
use crate::app::ports::SeriesSource;
use crate::chart::reconciler::ChartReconciler;
use crate::config::Config;
use crate::infra::plotters_surface::PlottersSurface;
use crate::infra::text_table::StdoutTable;
use crate::infra::world_bank::WorldBankSource;
use crate::types::{Controls, YearWindow};
use chrono::{Datelike, Local};

#[derive(Parser)]
#[command(name = "econ_tracker")]
#[command(about = "World Bank economic indicator tracker and chart renderer")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the selected series and render the chart and table
    Render {
        /// Indicator code or alias (gdp, gdp_growth, inflation, unemployment)
        #[arg(long, default_value = "gdp")]
        indicator: String,
        /// Trailing window of years, or 'all'
        #[arg(long, default_value = "10")]
        years: String,
        /// Comparison subject code (KEN, SDN, SSD, DJI), or 'none'
        #[arg(long, default_value = "none")]
        compare: String,
    },
    /// Fetch every cataloged indicator for a subject and write JSON snapshots
    Export {
        /// Subject code to export
        #[arg(long, default_value = constants::PRIMARY_SUBJECT)]
        subject: String,
        /// Trailing window of years, or 'all'
        #[arg(long, default_value = "all")]
        years: String,
        /// Directory snapshots are written into
        #[arg(long, default_value = "data")]
        out_dir: String,
    },
    /// List supported subjects and cataloged indicators
    List,
}

fn parse_window(years: &str) -> Result<YearWindow, Box<dyn std::error::Error>> {
    years.parse::<YearWindow>().map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Render {
            indicator,
            years,
            compare,
        } => {
            let window = parse_window(&years)?;
            let indicator = constants::indicator_alias_to_code(&indicator);
            let compare = Some(compare)
                .filter(|c| !c.eq_ignore_ascii_case("none"))
                .map(|c| c.to_uppercase());

            println!(
                "📈 Rendering {} for {}{}...",
                indicator,
                constants::subject_display_name(constants::PRIMARY_SUBJECT),
                compare
                    .as_deref()
                    .map(|c| format!(" vs {}", constants::subject_display_name(c)))
                    .unwrap_or_default()
            );

            let source: Arc<dyn SeriesSource> = Arc::new(WorldBankSource::new(&config.api)?);
            let reconciler = ChartReconciler::new(
                Box::new(PlottersSurface::new(&config.chart)),
                Box::new(StdoutTable),
            );
            let mut orchestrator = UpdateOrchestrator::new(source, reconciler);

            let controls = Controls {
                indicator,
                window,
                compare,
            };
            orchestrator.apply_controls(&controls).await;

            info!("Update cycle complete");
            println!("\n🖼️  Chart written to {}", config.chart.output_path);
        }
        Commands::Export {
            subject,
            years,
            out_dir,
        } => {
            let window = parse_window(&years)?;
            let subject = subject.to_uppercase();
            println!("🔄 Exporting indicator snapshots for {}...", subject);

            let source = WorldBankSource::new(&config.api)?;
            let range = window.resolve(Local::now().year());
            let written =
                export::export_all(&source, &subject, range, std::path::Path::new(&out_dir))
                    .await?;

            println!("✅ Wrote {} snapshot file(s):", written.len());
            for path in written {
                println!("   - {}", path.display());
            }
        }
        Commands::List => {
            println!("Primary subject: {} ({})",
                constants::subject_display_name(constants::PRIMARY_SUBJECT),
                constants::PRIMARY_SUBJECT
            );
            println!("\nComparison subjects:");
            for code in constants::get_supported_subjects() {
                println!("   {} - {}", code, constants::subject_display_name(code));
            }
            println!("\nIndicators:");
            for (alias, code) in constants::get_cataloged_indicators() {
                println!("   {:<14} {}", alias, code);
            }
        }
    }

    Ok(())
}
