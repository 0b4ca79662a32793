extern crate solar_viability;

use clap::Parser;
use solar_viability::config::SystemConfiguration;
use solar_viability::{run_assessment, ConsumptionInput};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct SolarViabilityArgs {
    #[arg(
        long,
        short,
        help = "Path to irradiation table (.xlsx, .ods or .csv) with JAN..DEC columns, overriding the configured file"
    )]
    irradiation_file: Option<PathBuf>,
    #[arg(
        long,
        short = 'f',
        help = "Read monthly consumption from a month,kwh CSV file instead of prompting"
    )]
    consumption_file: Option<PathBuf>,
    #[arg(long, short, help = "Path to JSON file overriding the panel and tariff settings")]
    config: Option<PathBuf>,
    #[arg(long, help = "Where to save the consumption chart (SVG)")]
    chart_file: Option<PathBuf>,
    #[arg(long, short, help = "Write per-month results to this CSV file")]
    results_file: Option<PathBuf>,
    #[clap(long, short, default_value_t = false, help = "Log debug information to stderr")]
    verbose: bool,
    #[clap(long, default_value_t = false, help = "Whether to log out spans")]
    log_spans: bool,
}

fn main() -> anyhow::Result<()> {
    let args = SolarViabilityArgs::parse();

    // logs go to stderr so they stay out of the report
    let tracing_subscriber = {
        let level = if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        let mut builder = tracing_subscriber::fmt::fmt()
            .with_max_level(level)
            .with_writer(io::stderr);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)?;

    let mut config = SystemConfiguration::load(args.config.as_deref())?;
    if let Some(irradiation_file) = args.irradiation_file {
        config.irradiation_file = irradiation_file;
    }
    if let Some(chart_file) = args.chart_file {
        config.chart_file = chart_file;
    }
    debug!(?config, "running assessment");

    let consumption_input = match args.consumption_file {
        Some(path) => ConsumptionInput::CsvFile(path),
        None => ConsumptionInput::Prompt(io::stdin().lock()),
    };

    run_assessment(
        &config,
        consumption_input,
        io::stdout().lock(),
        args.results_file.as_deref(),
    )?;

    Ok(())
}
