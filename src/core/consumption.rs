use crate::calendar::{Month, MONTHS_IN_YEAR};
use crate::errors::ReadingError;
use indexmap::IndexMap;
use strum::IntoEnumIterator;

/// Mean daily irradiation per month, in Wh/m²/day. An empty map means no irradiation data could be
/// loaded.
pub type MonthlyIrradiation = IndexMap<Month, f64>;

/// Estimated generated energy per month, in kWh. Empty when there was no irradiation data.
pub type MonthlyGeneration = IndexMap<Month, f64>;

/// Validate a single consumption reading in kWh.
pub fn validate_reading(energy_kwh: f64) -> Result<f64, ReadingError> {
    if !energy_kwh.is_finite() {
        return Err(ReadingError::NotANumber);
    }
    if energy_kwh < 0. {
        return Err(ReadingError::Negative);
    }

    Ok(energy_kwh)
}

/// Energy consumed in each of the twelve months, in kWh, before any billing has been applied.
///
/// Always holds every month in calendar order with a non-negative reading.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyConsumption {
    energy_kwh: IndexMap<Month, f64>,
}

impl MonthlyConsumption {
    /// Build from one reading per month, January first.
    pub fn new(readings: [f64; MONTHS_IN_YEAR]) -> Result<Self, (Month, ReadingError)> {
        let energy_kwh = Month::iter()
            .zip(readings)
            .map(|(month, reading)| {
                validate_reading(reading)
                    .map(|reading| (month, reading))
                    .map_err(|err| (month, err))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(Self { energy_kwh })
    }

    /// Build from readings that have already been validated. Months are put into calendar order.
    pub(crate) fn from_validated(readings: &IndexMap<Month, f64>) -> Option<Self> {
        let energy_kwh = Month::iter()
            .map(|month| readings.get(&month).map(|reading| (month, *reading)))
            .collect::<Option<IndexMap<_, _>>>()?;

        Some(Self { energy_kwh })
    }

    pub fn energy_kwh(&self, month: Month) -> f64 {
        self.energy_kwh[&month]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        self.energy_kwh.iter().map(|(month, kwh)| (*month, *kwh))
    }
}

/// Consumption and estimated cost for a single month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BilledMonth {
    pub energy_kwh: f64,
    pub cost_reais: f64,
}

/// Monthly consumption once the billing estimate has been applied, so every month carries a cost.
#[derive(Clone, Debug, PartialEq)]
pub struct BilledConsumption {
    months: IndexMap<Month, BilledMonth>,
}

impl BilledConsumption {
    pub(crate) fn new(months: IndexMap<Month, BilledMonth>) -> Self {
        Self { months }
    }

    pub fn month(&self, month: Month) -> BilledMonth {
        self.months[&month]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, BilledMonth)> + '_ {
        self.months.iter().map(|(month, billed)| (*month, *billed))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
