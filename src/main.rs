//! CLI entry point for the Titanic manifest statistics tool.
//!
//! Provides subcommands for each aggregation view (demographics, families,
//! age division, last names) and for generating a full report bundle of
//! tables and chart descriptions.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use titanic_stats::analysis::aggregate::{
    family_fares, median_age_division, survival_demographics,
};
use titanic_stats::analysis::bands::AgeBands;
use titanic_stats::analysis::names::last_name_counts;
use titanic_stats::loader::{default_sources, load_manifest, source_for};
use titanic_stats::output::{csv_string, write_csv};
use titanic_stats::record::Passenger;
use titanic_stats::report::write_report;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "titanic_stats")]
#[command(about = "Descriptive statistics over the Titanic passenger manifest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which age-band preset a demographic analysis uses. All tables and charts
/// of one invocation share the chosen preset.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum BandPreset {
    /// Child / Teen / Adult / Senior
    Coarse,
    /// Six bands, splitting children and adults more finely
    Fine,
}

impl BandPreset {
    fn build(self, passengers: &[Passenger]) -> AgeBands {
        match self {
            BandPreset::Coarse => AgeBands::coarse_for(passengers),
            BandPreset::Fine => AgeBands::fine_for(passengers),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Survival rates by class, sex, and age band
    Demographics {
        /// Manifest CSV: file path or URL (defaults to the public mirror)
        #[arg(short, long)]
        source: Option<String>,

        /// Age-band preset
        #[arg(long, value_enum, default_value_t = BandPreset::Coarse)]
        bands: BandPreset,

        /// Write the table to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render stdout as pretty JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Fare statistics by class and family size
    Families {
        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Survival rates by class, split at the class median age
    AgeDivision {
        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Last-name frequency table
    LastNames {
        #[arg(short, long)]
        source: Option<String>,

        /// Keep only the N most frequent names
        #[arg(short, long)]
        top: Option<usize>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Generate the full report bundle: all tables, charts, and an index
    Report {
        #[arg(short, long)]
        source: Option<String>,

        /// Directory the bundle is written into
        #[arg(short = 'd', long, default_value = "report")]
        output_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = BandPreset::Coarse)]
        bands: BandPreset,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/titanic_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("titanic_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demographics {
            source,
            bands,
            output,
            json,
        } => {
            let passengers = load(source.as_deref())?;
            let bands = bands.build(&passengers);
            let table = survival_demographics(&passengers, &bands);
            emit(&table, json, output.as_deref())?;
        }
        Commands::Families {
            source,
            output,
            json,
        } => {
            let passengers = load(source.as_deref())?;
            let table = family_fares(&passengers);
            emit(&table, json, output.as_deref())?;
        }
        Commands::AgeDivision {
            source,
            output,
            json,
        } => {
            let passengers = load(source.as_deref())?;
            let table = median_age_division(&passengers);
            emit(&table, json, output.as_deref())?;
        }
        Commands::LastNames {
            source,
            top,
            output,
            json,
        } => {
            let passengers = load(source.as_deref())?;
            let mut table = last_name_counts(&passengers);
            if let Some(top) = top
                && table.len() > top
            {
                debug!(total = table.len(), top, "Truncating last-name table");
                table.truncate(top);
            }
            emit(&table, json, output.as_deref())?;
        }
        Commands::Report {
            source,
            output_dir,
            bands,
        } => {
            let passengers = load(source.as_deref())?;
            let bands = bands.build(&passengers);
            let label = source.as_deref().unwrap_or("default mirrors");
            let index = write_report(&passengers, label, &output_dir, &bands)?;
            info!(
                generated_at = %index.generated_at,
                tables = index.tables.len(),
                "Report complete"
            );
        }
    }

    Ok(())
}

/// Loads the manifest from an explicit file-or-URL argument, or from the
/// default mirror chain when none is given.
fn load(source: Option<&str>) -> Result<Vec<Passenger>> {
    let sources = match source {
        Some(arg) => vec![source_for(arg)],
        None => default_sources(),
    };
    load_manifest(&sources)
}

/// Writes a table to a CSV file, or renders it on stdout as CSV or JSON.
fn emit<T: Serialize + Debug>(rows: &[T], json: bool, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        write_csv(path, rows)?;
        info!(path = %path.display(), rows = rows.len(), "Table written");
    } else if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        print!("{}", csv_string(rows)?);
    }
    Ok(())
}
