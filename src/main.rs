//! Toronto COVID-19 Dashboard
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Settings come from `--config <file>`, else `config.toml` in the user config
//! directory or the working directory, else defaults. Environment variables
//! override file values:
//! - `TORONTO_COVID_CSV_PATH`: Case CSV (default: toronto_data.csv)
//! - `TORONTO_COVID_HOST`: Host to bind to (default: 127.0.0.1)
//! - `TORONTO_COVID_PORT`: Port to listen on (default: 8050)
//! - `TORONTO_COVID_DEBUG`: Debug mode (default: true)
//! - `RUST_LOG`: Log filter (default follows debug mode)

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use toronto_covid::api::{serve, AppState};
use toronto_covid::config::{generate_default_config, Config, LogFormat};
use toronto_covid::dashboard::{Dashboard, DashboardCharts};
use toronto_covid::data::CaseTable;
use toronto_covid::Figure;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "toronto-covid")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive dashboard of Toronto COVID-19 cases")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Case CSV, overrides the configured path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Port to listen on, overrides the configured port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard (default)
    Serve,

    /// Load the case file and print the precomputed histograms
    Summary {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {}", path.display()))?;
                eprintln!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (mut config, report) = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data) = cli.data {
        config.data.csv_path = data;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config);
    report.log();

    tracing::info!("Toronto COVID-19 Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Case file: {:?}", config.data.csv_path);

    let table = match CaseTable::load(&config.data.csv_path) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Failed to load case file: {}", e);
            return Err(e).context("loading case file");
        }
    };

    match cli.command {
        Some(Commands::Summary { format }) => print_summary(&table, &format)?,
        _ => {
            let state = AppState::new(Dashboard::new(table), &config.server);
            serve(state, &config.server).await?;
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive(config.server.debug).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[derive(Serialize)]
struct Summary {
    records: usize,
    offset_range: Option<[i64; 2]>,
    charts: Vec<ChartSummary>,
}

#[derive(Serialize)]
struct ChartSummary {
    name: &'static str,
    bars: Vec<BarCount>,
}

#[derive(Serialize)]
struct BarCount {
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<String>,
    count: u64,
}

fn chart_summary(name: &'static str, figure: &Figure) -> ChartSummary {
    let mut bars = Vec::new();
    for category in figure.categories() {
        for trace in &figure.data {
            let count = trace.count_for(category);
            if count > 0 {
                bars.push(BarCount {
                    category: category.to_string(),
                    series: trace.name.clone(),
                    count,
                });
            }
        }
    }
    ChartSummary { name, bars }
}

fn print_summary(table: &CaseTable, format: &str) -> anyhow::Result<()> {
    let charts = DashboardCharts::build(table);
    let summary = Summary {
        records: table.len(),
        offset_range: table.offset_range().map(|(lo, hi)| [lo, hi]),
        charts: vec![
            chart_summary("case_by_age", &charts.case_by_age),
            chart_summary("case_by_gender", &charts.case_by_gender),
            chart_summary("outcome_by_age", &charts.outcome_by_age),
        ],
    };

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => {
            println!("Records: {}", summary.records);
            match summary.offset_range {
                Some([lo, hi]) => println!("Days since first case: {} to {}", lo, hi),
                None => println!("Days since first case: (no data)"),
            }
            for chart in &summary.charts {
                println!();
                println!("{}", chart.name);
                println!("{}", "-".repeat(40));
                for bar in &chart.bars {
                    let label = match &bar.series {
                        Some(series) => format!("{} / {}", bar.category, series),
                        None => bar.category.clone(),
                    };
                    println!("{:<30} {:>8}", label, bar.count);
                }
            }
        }
    }

    Ok(())
}
