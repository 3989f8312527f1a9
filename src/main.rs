use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use va_precincts::app::collect_results_use_case::CollectResultsUseCase;
use va_precincts::app::convert_registration_use_case::ConvertRegistrationUseCase;
use va_precincts::config::Config;
use va_precincts::constants::DEFAULT_PREVIEW_ROWS;
use va_precincts::infra::http_client::{ReqwestHttp, RetryingHttp};
use va_precincts::logging;
use va_precincts::registration::preview::format_preview;
use va_precincts::types::SheetStatus;

#[derive(Parser)]
#[command(name = "va_precincts")]
#[command(about = "Virginia precinct election results and registration counts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to $VA_PRECINCTS_CONFIG, then ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the registration workbook into a precinct CSV
    Convert {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Rows scanned for the "Precinct No" header
        #[arg(long)]
        max_header_rows: Option<usize>,
        /// Rows shown in the preview
        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        preview: usize,
    },
    /// Download precinct result CSVs by walking the "Similar results" list
    Collect {
        #[arg(long)]
        start_id: Option<u64>,
        /// Number of matching elections to download
        #[arg(long)]
        needed: Option<usize>,
        /// Keep elections whose label contains this text
        #[arg(long, conflicts_with = "all")]
        label_filter: Option<String>,
        /// Keep every election regardless of label
        #[arg(long)]
        all: bool,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Pause between elections, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            max_header_rows,
            preview,
        } => {
            let registration = &mut config.registration;
            if let Some(input) = input {
                registration.input = input;
            }
            if let Some(output) = output {
                registration.output = output;
            }
            if let Some(rows) = max_header_rows {
                registration.max_header_scan_rows = rows;
            }
            run_convert(config, preview)
        }
        Commands::Collect {
            start_id,
            needed,
            label_filter,
            all,
            output_dir,
            delay_ms,
        } => {
            let elections = &mut config.elections;
            if let Some(id) = start_id {
                elections.start_election_id = id;
            }
            if let Some(needed) = needed {
                elections.needed = needed;
            }
            if all {
                elections.label_filter = None;
            } else if let Some(filter) = label_filter {
                elections.label_filter = Some(filter);
            }
            if let Some(dir) = output_dir {
                elections.output_dir = dir;
            }
            if let Some(ms) = delay_ms {
                elections.delay_ms = ms;
            }
            run_collect(config)
        }
    }
}

fn run_convert(config: Config, preview_rows: usize) -> anyhow::Result<()> {
    let input = config.registration.input.clone();
    let output = config.registration.output.clone();
    let use_case = ConvertRegistrationUseCase::new(config.registration);

    let extraction = use_case
        .run()
        .with_context(|| format!("Failed to convert {}", input.display()))
        .map_err(|e| {
            error!("{e:#}");
            e
        })?;

    for outcome in &extraction.sheets {
        match &outcome.status {
            SheetStatus::Extracted(rows) => println!("✓ {}: {} rows", outcome.sheet, rows),
            SheetStatus::NoRows => println!("… {}: no rows", outcome.sheet),
            SheetStatus::Skipped(reason) => println!("! {}: {}", outcome.sheet, reason),
        }
    }
    println!("{}", format_preview(&extraction.records, preview_rows));
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_collect(config: Config) -> anyhow::Result<()> {
    let elections = config.elections;
    let http = RetryingHttp::from_config(
        ReqwestHttp::from_config(&elections).context("Failed to build HTTP client")?,
        &elections,
    );
    let use_case = CollectResultsUseCase::new(http, elections);

    let report = use_case
        .run()
        .context("Failed to collect election results")
        .map_err(|e| {
            error!("{e:#}");
            e
        })?;

    println!("\nFinished.");
    for election in &report.kept {
        println!("  {} | {} → {}", election.id, election.label, election.path.display());
    }
    if !report.is_complete() {
        println!(
            "\nNote: only {} matching datasets were available in this list.",
            report.kept.len()
        );
    }
    Ok(())
}
