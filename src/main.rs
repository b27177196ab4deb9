//! CLI entry point for the school results trend tool.
//!
//! Loads yearly exam results for one city, predicts next year's scores per
//! subject and prints the schools ranked by a chosen average or trend.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use school_trends::analyzers::analyzer::build_report;
use school_trends::analyzers::types::Report;
use school_trends::config::ReportConfig;
use school_trends::output::{render_table, to_json, write_csv};
use school_trends::params::{FixedSource, ParameterSource, PromptSource};
use school_trends::parser::{list_cities, read_schools};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "school_trends")]
#[command(about = "Rank schools by exam averages and predicted trends", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON config file with data_dir, file_prefix, years and trend_year
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the yearly results files
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Years to load, comma separated (e.g. 2021,2022,2023)
    #[arg(short, long, global = true, value_delimiter = ',')]
    years: Option<Vec<i32>>,

    /// Year to predict the trend for (default: last loaded year + 1)
    #[arg(short = 't', long, global = true)]
    trend_year: Option<i32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the schools of a city. Missing parameters are prompted for.
    Rank {
        /// City to report on
        #[arg(long)]
        city: Option<String>,

        /// Subject code: P (polish), E (english), M (math), A (all)
        #[arg(short, long)]
        subject: Option<String>,

        /// Order code: A (average), T (trend)
        #[arg(short, long)]
        order: Option<String>,

        /// Never prompt; fail if a parameter is missing or invalid
        #[arg(long, default_value_t = false)]
        no_prompt: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// File to write when the format is csv
        #[arg(long, default_value = "report.csv")]
        output: PathBuf,
    },
    /// List the cities present in the results files
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/school_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("school_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli.source)?;

    match cli.command {
        Commands::Rank {
            city,
            subject,
            order,
            no_prompt,
            format,
            output,
        } => {
            let params = if no_prompt {
                FixedSource::new(
                    city.as_deref().unwrap_or_default(),
                    subject.as_deref().unwrap_or_default(),
                    order.as_deref().unwrap_or_default(),
                )
                .parameters()?
            } else {
                PromptSource::new(io::stdin().lock(), io::stdout())
                    .with_known(city, subject, order)
                    .parameters()?
            };
            let field = params.field()?;
            let target_year = config.target_year()?;

            let schools = read_schools(
                &config.data_dir,
                &config.file_prefix,
                &config.years,
                &params.city,
            )?;
            let rows = build_report(&schools, target_year, field)?;

            match format {
                Format::Table => println!("{}", render_table(&rows)),
                Format::Json => {
                    let report = Report::new(&params.city, field, target_year, &config.years, rows);
                    println!("{}", to_json(&report)?);
                }
                Format::Csv => {
                    write_csv(&output, &rows)?;
                    info!(path = %output.display(), rows = rows.len(), "CSV report written");
                }
            }
        }
        Commands::Cities => {
            for city in list_cities(&config.data_dir, &config.file_prefix, &config.years)? {
                println!("{city}");
            }
        }
    }

    Ok(())
}

/// Builds the run configuration: defaults, then the config file, then flags.
fn resolve_config(args: &SourceArgs) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReportConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(years) = &args.years {
        config.years = years.clone();
    }
    if let Some(year) = args.trend_year {
        config.trend_year = Some(year);
    }

    config.validate()?;
    Ok(config)
}
