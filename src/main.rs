use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use turnover_ingest::apis::analysis::{AnalysisClient, AnalysisReport};
use turnover_ingest::app::{AnalyzeUseCase, ValidateUseCase};
use turnover_ingest::config::Config;
use turnover_ingest::domain::ParseResult;
use turnover_ingest::infra::{CsvFileSource, HttpAnalysisAdapter};
use turnover_ingest::{logging, observability};

#[derive(Parser)]
#[command(name = "turnover_ingest")]
#[command(about = "HR turnover record ingestion and validation pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a turnover export and report records, errors and stats
    Validate {
        /// Path to the CSV export to ingest
        #[arg(long)]
        file: PathBuf,
    },
    /// Validate a turnover export and submit the records for aggregation
    Analyze {
        /// Path to the CSV export to ingest
        #[arg(long)]
        file: PathBuf,
    },
}

fn print_summary(result: &ParseResult) {
    println!("\n📊 Validation results:");
    println!("   Dataset id: {}", result.dataset_id);
    println!("   Total rows: {}", result.stats.total);
    println!("   Valid records: {}", result.stats.valid);
    println!("   Errors: {}", result.stats.invalid);
    println!("   Detected columns: {}", result.stats.detected_columns.len());

    if !result.errors.is_empty() {
        warn!("{} validation errors accumulated", result.errors.len());
        println!("\n⚠️  Validation errors:");
        for err in &result.errors {
            println!(
                "   - row {} [{}] {}: {}",
                err.row, err.column, err.kind, err.message
            );
        }
    }
}

fn print_report(report: &AnalysisReport) {
    println!("\n📈 Analysis report ({} exits):", report.total_exits);
    for (category, pareto) in &report.pareto {
        println!("   {} — top concentration:", category);
        for pattern in &pareto.critical_set {
            println!(
                "      {}: {} exits ({:.1}%, cumulative {:.1}%)",
                pattern.value, pattern.exits, pattern.share_pct, pattern.cumulative_pct
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();
    observability::init_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => {
            println!("🔄 Validating {}...", file.display());

            let use_case = ValidateUseCase::new(Box::new(CsvFileSource::new(file)));
            match use_case.run().await {
                Ok(result) => {
                    info!("validation finished");
                    print_summary(&result);
                }
                Err(e) => {
                    error!("Validation failed: {}", e);
                    println!("\n❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Analyze { file } => {
            println!("🔄 Validating and analyzing {}...", file.display());

            let config = Config::load()?;
            let client = AnalysisClient::new(&config.analysis)?;
            let use_case = AnalyzeUseCase::new(
                Box::new(CsvFileSource::new(file)),
                Box::new(HttpAnalysisAdapter::new(client)),
            );

            match use_case.run().await {
                Ok((parsed, report)) => {
                    info!("analysis finished");
                    print_summary(&parsed);
                    print_report(&report);
                }
                Err(e) => {
                    error!("Analysis failed: {}", e);
                    println!("\n❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
