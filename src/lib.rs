pub mod calendar;
pub mod chart;
mod compare_floats;
pub mod config;
pub mod core;
pub mod errors;
pub mod read_irradiation_file;
pub mod report;
pub mod results_export;
mod statistics;
#[cfg(test)]
mod test_utils;

use crate::chart::render_consumption_chart;
use crate::config::SystemConfiguration;
use crate::core::analysis::{analyse_consumption, ConsumptionAnalysis};
use crate::core::collector::{collect_consumption, consumption_from_csv};
use crate::core::comparison::{compare_generation_with_consumption, GenerationComparison};
use crate::core::consumption::{
    BilledConsumption, MonthlyConsumption, MonthlyGeneration, MonthlyIrradiation,
};
use crate::read_irradiation_file::load_irradiation;
use crate::report::{write_conclusion, write_consumption_analysis, write_solar_simulation};
use crate::results_export::write_results_csv;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Where the monthly consumption readings come from.
pub enum ConsumptionInput<R: BufRead> {
    /// Prompt for each month on the given input, writing prompts to the report output.
    Prompt(R),
    /// Read a `month,kwh` CSV file.
    CsvFile(PathBuf),
}

/// Everything computed during an assessment run.
#[derive(Clone, Debug)]
pub struct Assessment {
    pub consumption: MonthlyConsumption,
    pub billed: BilledConsumption,
    pub analysis: ConsumptionAnalysis,
    pub generation: MonthlyGeneration,
    pub comparison: GenerationComparison,
}

/// Bill, analyse, simulate and compare, writing the three report stages to `output`.
///
/// The cost per kWh derived by the analysis is what the comparison values savings at, so the
/// analysis always runs first.
pub fn assess(
    config: &SystemConfiguration,
    consumption: MonthlyConsumption,
    irradiation: &MonthlyIrradiation,
    mut output: impl Write,
) -> anyhow::Result<Assessment> {
    let billed = config.tariff().bill(&consumption);
    let analysis =
        analyse_consumption(&billed).context("There is no consumption data to analyse")?;
    write_consumption_analysis(&mut output, &analysis)?;

    let generation = config.pv_array().simulate_generation(irradiation);
    let comparison = compare_generation_with_consumption(
        &generation,
        &consumption,
        analysis.average_cost_per_kwh,
    );
    write_solar_simulation(&mut output, &comparison)?;
    write_conclusion(&mut output, &comparison)?;

    Ok(Assessment {
        consumption,
        billed,
        analysis,
        generation,
        comparison,
    })
}

/// Run a full assessment: load irradiation, collect consumption, report, then save the chart and
/// (optionally) the per-month results.
#[instrument(skip_all)]
pub fn run_assessment<R: BufRead>(
    config: &SystemConfiguration,
    consumption_input: ConsumptionInput<R>,
    mut output: impl Write,
    results_file: Option<&Path>,
) -> anyhow::Result<Assessment> {
    let irradiation = load_irradiation(&config.irradiation_file, &mut output)?;

    let consumption = match consumption_input {
        ConsumptionInput::Prompt(input) => collect_consumption(input, &mut output)?,
        ConsumptionInput::CsvFile(path) => {
            let file = File::open(&path).with_context(|| {
                format!("Could not open consumption file {}", path.display())
            })?;
            consumption_from_csv(BufReader::new(file))?
        }
    };

    let assessment = assess(config, consumption, &irradiation, &mut output)?;

    // a chart failure is reported but does not fail the run
    if let Err(err) = render_consumption_chart(&assessment.consumption, &config.chart_file) {
        warn!("{err}");
        writeln!(output, "ERROR! {err}")?;
    }

    if let Some(results_file) = results_file {
        let file = File::create(results_file).with_context(|| {
            format!("Could not create results file {}", results_file.display())
        })?;
        write_results_csv(BufWriter::new(file), &assessment.billed, &assessment.comparison)?;
        info!(path = %results_file.display(), "results written");
    }

    output.flush()?;
    Ok(assessment)
}
