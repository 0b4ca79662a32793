use crate::calendar::Month;
use crate::core::comparison::GenerationComparison;
use crate::core::consumption::BilledConsumption;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ResultsRow {
    month: Month,
    consumption_kwh: f64,
    cost_reais: f64,
    generation_kwh: f64,
    used_kwh: f64,
    savings_reais: f64,
    covered: bool,
}

/// Write one CSV row per month with consumption, cost, generation and savings.
pub fn write_results_csv(
    output: impl Write,
    billed: &BilledConsumption,
    comparison: &GenerationComparison,
) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);

    for month in &comparison.months {
        writer.serialize(ResultsRow {
            month: month.month,
            consumption_kwh: month.consumption_kwh,
            cost_reais: billed.month(month.month).cost_reais,
            generation_kwh: month.generation_kwh,
            used_kwh: month.used_kwh,
            savings_reais: month.savings_reais,
            covered: month.covered,
        })?;
    }

    writer.flush()?;
    Ok(())
}
