use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scout_archetypes::config::AppConfig;
use scout_archetypes::export::{format_percentile, format_rating, write_html, write_json, write_xlsx};
use scout_archetypes::pipeline::{AnalysisInputs, Analyzer};
use scout_archetypes::AnalysisReport;

#[derive(Parser)]
#[command(name = "scout-archetypes")]
#[command(about = "Rank scouted players by playing-style archetype")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./scout.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score exported player tables against every archetype
    Analyze {
        /// Table of players available for transfer (HTML or CSV)
        #[arg(long)]
        transfer: Option<PathBuf>,

        /// Table of players available on loan (HTML or CSV)
        #[arg(long)]
        loan: Option<PathBuf>,

        /// Table of players not transferrable (HTML or CSV)
        #[arg(long)]
        untransferable: Option<PathBuf>,

        /// League power sheet (CSV or spreadsheet with League and Power Rating columns)
        #[arg(long)]
        multipliers: Option<PathBuf>,

        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write one worksheet per archetype
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Write a static HTML report
        #[arg(long)]
        html: Option<PathBuf>,

        /// Players to print per archetype
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// List the archetypes that will be scored
    Archetypes,

    /// Print the effective league power table
    Leagues {
        /// League power sheet (CSV or spreadsheet with League and Power Rating columns)
        #[arg(long)]
        multipliers: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting scout-archetypes v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config)?;
    let analyzer = Analyzer::new(config);

    match cli.command {
        Commands::Analyze {
            transfer,
            loan,
            untransferable,
            multipliers,
            json,
            xlsx,
            html,
            top,
        } => {
            let inputs = AnalysisInputs {
                transfer,
                loan,
                untransferable,
                multipliers,
            };
            let report = analyzer.run(&inputs).await.context("Analysis failed")?;

            print_report(&report, top);

            if let Some(path) = json {
                write_json(&report, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("JSON report:  {}", path.display());
            }
            if let Some(path) = xlsx {
                write_xlsx(&report, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Workbook:     {}", path.display());
            }
            if let Some(path) = html {
                write_html(&report, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("HTML report:  {}", path.display());
            }
        }

        Commands::Archetypes => {
            println!("\n=== Archetypes ===");
            for archetype in analyzer.archetypes() {
                println!("{:<26} {}", archetype.name, archetype.label);
            }
        }

        Commands::Leagues { multipliers } => {
            let sheet = match &multipliers {
                Some(path) => Some(
                    tokio::fs::read(path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let table = analyzer
                .power_table(sheet.as_deref(), multipliers.as_deref())
                .context("Failed to load league power table")?;

            println!("\n=== League Power ===");
            for (league, power) in table.entries() {
                println!("{:<40} {:>6}  x{:.2}", league, power, power / 100.0);
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    AppConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn print_report(report: &AnalysisReport, top: usize) {
    let summary = &report.summary;

    println!("\n=== Analysis Results ===");
    for (source, rows) in &summary.rows_per_source {
        println!("{:<24} {}", source, rows);
    }
    println!("Rows merged:             {}", summary.rows_merged);
    println!("Duplicates removed:      {}", summary.duplicates_removed);
    println!("Below minutes:           {}", summary.rows_below_minutes);
    println!("Rows scored:             {}", summary.rows_scored);
    println!("Archetypes scored:       {}", summary.archetypes_scored);

    for result in &report.archetypes {
        println!("\n--- {} ({} players) ---", result.archetype, result.len());
        for record in result.records.iter().take(top) {
            println!(
                "{:<28} {:<18} {:<24} {:>8} {:>5}",
                record.name,
                record.position,
                record.club,
                format_rating(record.adjusted_rating),
                format_percentile(record.percentile)
            );
        }
    }
}
