use crate::calendar::{Month, MONTHS_IN_YEAR};
use crate::compare_floats::{first_max_by_value, first_min_by_value};
use crate::core::consumption::BilledConsumption;
use crate::statistics::{average_over_periods, mean};
use tracing::{debug, instrument, warn};

/// Descriptive statistics over a year of billed consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsumptionAnalysis {
    /// Month of greatest consumption and its kWh. The earliest month wins ties.
    pub max_month: (Month, f64),
    /// Month of least consumption and its kWh. The earliest month wins ties.
    pub min_month: (Month, f64),
    /// Mean monthly consumption in kWh (total over twelve).
    pub avg_energy: f64,
    /// Mean monthly bill in R$ (total over twelve).
    pub avg_cost: f64,
    /// Mean of the per-month R$/kWh ratios (not total cost over total energy).
    pub average_cost_per_kwh: f64,
    /// Months with zero consumption, which have no R$/kWh ratio and are left out of
    /// `average_cost_per_kwh`.
    pub months_without_ratio: Vec<Month>,
}

/// Analyse billed consumption.
///
/// Returns `None` only when there is no consumption data at all.
#[instrument(skip_all)]
pub fn analyse_consumption(billed: &BilledConsumption) -> Option<ConsumptionAnalysis> {
    let max_month = first_max_by_value(billed.iter().map(|(month, b)| (month, b.energy_kwh)))?;
    let min_month = first_min_by_value(billed.iter().map(|(month, b)| (month, b.energy_kwh)))?;

    let energies = billed.iter().map(|(_, b)| b.energy_kwh).collect::<Vec<_>>();
    let costs = billed.iter().map(|(_, b)| b.cost_reais).collect::<Vec<_>>();

    let mut ratios = vec![];
    let mut months_without_ratio = vec![];
    for (month, billed_month) in billed.iter() {
        if billed_month.energy_kwh == 0. {
            debug!(%month, "no consumption, leaving month out of the cost per kWh average");
            months_without_ratio.push(month);
        } else {
            ratios.push(billed_month.cost_reais / billed_month.energy_kwh);
        }
    }

    let average_cost_per_kwh = mean(&ratios).unwrap_or_else(|| {
        warn!("no month has any consumption, so the cost per kWh cannot be derived");
        0.
    });

    Some(ConsumptionAnalysis {
        max_month,
        min_month,
        avg_energy: average_over_periods(&energies, MONTHS_IN_YEAR),
        avg_cost: average_over_periods(&costs, MONTHS_IN_YEAR),
        average_cost_per_kwh,
        months_without_ratio,
    })
}
