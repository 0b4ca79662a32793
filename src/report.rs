use crate::core::analysis::ConsumptionAnalysis;
use crate::core::comparison::{GenerationComparison, Verdict};
use itertools::Itertools;
use std::io::{self, Write};

/// The textual summary is printed in three stages: consumption analysis, solar simulation and
/// conclusion.

const NARROW_RULE: usize = 50;
const WIDE_RULE: usize = 60;

fn write_banner(output: &mut impl Write, title: &str, width: usize) -> io::Result<()> {
    writeln!(output, "\n{}", "=".repeat(width))?;
    writeln!(output, "{title:^width$}")?;
    writeln!(output, "{}", "=".repeat(width))
}

pub fn write_consumption_analysis(
    mut output: impl Write,
    analysis: &ConsumptionAnalysis,
) -> io::Result<()> {
    let (max_month, max_kwh) = analysis.max_month;
    let (min_month, min_kwh) = analysis.min_month;

    write_banner(&mut output, "DATA ANALYSIS", NARROW_RULE)?;
    writeln!(output, "Month of HIGHEST consumption: {max_month} ({max_kwh:.1} kWh)")?;
    writeln!(output, "Month of LOWEST consumption: {min_month} ({min_kwh:.1} kWh)")?;
    writeln!(output, "Average consumption: {:.2} kWh", analysis.avg_energy)?;
    writeln!(output, "AVERAGE bill: R$ {:.2}", analysis.avg_cost)?;
    writeln!(
        output,
        "> AVERAGE COST per kWh: R$ {:.2}",
        analysis.average_cost_per_kwh
    )?;
    if !analysis.months_without_ratio.is_empty() {
        writeln!(
            output,
            "  (months without consumption left out of the cost per kWh: {})",
            analysis.months_without_ratio.iter().join(", ")
        )?;
    }

    Ok(())
}

pub fn write_solar_simulation(
    mut output: impl Write,
    comparison: &GenerationComparison,
) -> io::Result<()> {
    write_banner(&mut output, "SOLAR SIMULATION", WIDE_RULE)?;
    match (comparison.max_generation, comparison.min_generation) {
        (Some((max_month, max_kwh)), Some((min_month, min_kwh))) => {
            writeln!(
                output,
                "Month of highest solar generation: {max_month} --> {max_kwh:.1} kWh"
            )?;
            writeln!(
                output,
                "Month of lowest solar generation: {min_month} --> {min_kwh:.1} kWh"
            )?;
        }
        _ => writeln!(
            output,
            "Solar generation not available: no irradiation data was loaded."
        )?,
    }
    writeln!(
        output,
        "     Estimated annual savings: R$ {:.2}",
        comparison.total_annual_savings
    )?;
    writeln!(output, " Months covered:  {}", comparison.sufficient_months)?;
    writeln!(output, " Months not covered:  {}", comparison.insufficient_months)?;
    writeln!(output, "{}", "-".repeat(WIDE_RULE))
}

pub fn conclusion(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Advantageous => {
            "Solar energy, under these conditions, will be advantageous for you!"
        }
        Verdict::Borderline => {
            "Solar energy may be advantageous, but it varies a lot between months. Weigh it up carefully."
        }
        Verdict::NotAdvantageous => {
            "The current system is not advantageous. Consider adjusting it."
        }
    }
}

pub fn write_conclusion(
    mut output: impl Write,
    comparison: &GenerationComparison,
) -> io::Result<()> {
    writeln!(output, "\n>> CONCLUSION: {}", conclusion(comparison.verdict))
}
