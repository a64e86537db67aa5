//! Crashviz CLI
//!
//! Command-line interface for the accident charts:
//! - Render either chart to an SVG file
//! - Print the aggregates behind the charts
//! - List filter categories
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crashviz::aggregate::{by_condition, by_month, categories_for, total, Filter};
use crashviz::config::{generate_default_config, Config};
use crashviz::dataset::{source_for, Dataset};
use crashviz::render::{BarRenderer, LineRenderer, SvgBuffer, BAR_TARGET_ID, LINE_TARGET_ID};

#[derive(Parser)]
#[command(name = "crashviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Charts of US car-accident fatalities")]
#[command(long_about = "Crashviz aggregates a car-accident CSV dataset and renders\na bar chart per atmospheric condition and a monthly line chart per gender.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset CSV path or http(s) URL (overrides config)
    #[arg(short, long, global = true)]
    pub dataset: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a chart to SVG
    Render {
        /// Which chart
        chart: ChartKind,
        /// Gender filter for the line chart (default: All)
        #[arg(short, long)]
        filter: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print condition totals and monthly totals
    Summary {
        /// Gender filter for the monthly totals (default: All)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List the line chart filter labels
    Categories,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartKind {
    Bar,
    Line,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_output(output.as_ref(), &generate_default_config());
    }

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(location) = cli.dataset {
        config.dataset.location = location;
    }
    crashviz::logging::init(&config.logging);

    let dataset = load_dataset(&config.dataset.location).await?;

    match cli.command {
        Commands::Render {
            chart,
            filter,
            output,
        } => {
            let markup = match chart {
                ChartKind::Bar => {
                    let mut renderer =
                        BarRenderer::new(SvgBuffer::new(BAR_TARGET_ID), config.charts.bar.clone());
                    renderer.on_loaded(Ok(dataset))?;
                    renderer.into_target().into_contents()
                }
                ChartKind::Line => {
                    let mut renderer =
                        LineRenderer::new(SvgBuffer::new(LINE_TARGET_ID), config.charts.line.clone());
                    renderer.on_loaded(Ok(dataset))?;
                    if let Some(label) = filter {
                        renderer.on_filter_selected(&label)?;
                    }
                    renderer.into_target().into_contents()
                }
            };
            write_output(output.as_ref(), &markup)?;
        }

        Commands::Summary { filter } => {
            let filter = filter.as_deref().map(Filter::parse).unwrap_or_default();
            print_summary(&dataset, &filter);
        }

        Commands::Categories => {
            for label in categories_for(dataset.records()) {
                println!("{}", label);
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

async fn load_dataset(location: &str) -> anyhow::Result<Dataset> {
    let source = source_for(location);
    let dataset = source
        .fetch()
        .await
        .with_context(|| format!("Failed to load dataset from {}", source.describe()))?;

    let report = dataset.report();
    tracing::info!(
        records = dataset.len(),
        rows_failed = report.rows_failed,
        values_coerced = report.values_coerced,
        dates_missing = report.dates_missing,
        "Dataset loaded"
    );
    for error in &report.errors {
        tracing::warn!("{}", error);
    }
    Ok(dataset)
}

fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn print_summary(dataset: &Dataset, filter: &Filter) {
    let conditions = by_condition(dataset.records());
    let width = conditions
        .iter()
        .map(|b| b.key.chars().count())
        .max()
        .unwrap_or(0)
        .max("Condition".len());

    println!("{:<width$}  {:>10}", "Condition", "Fatalities", width = width);
    println!("{}", "-".repeat(width + 12));
    for bucket in &conditions {
        println!("{:<width$}  {:>10}", bucket.key, bucket.total, width = width);
    }
    println!("{:<width$}  {:>10}", "Total", total(&conditions), width = width);

    let months = by_month(filter.apply(dataset.records()));
    println!();
    println!("Monthly fatalities ({})", filter);
    println!("{:<7}  {:>10}", "Month", "Fatalities");
    println!("{}", "-".repeat(19));
    for bucket in &months {
        println!("{:<7}  {:>10}", bucket.key.to_string(), bucket.total);
    }
    println!("{:<7}  {:>10}", "Total", total(&months));
}
