use crate::core::consumption::{BilledConsumption, BilledMonth, MonthlyConsumption};
use serde_valid::Validate;

/// This module contains the two-component electricity tariff and the billing estimate built from it.
///
/// The estimate excludes taxes (ICMS, PIS and COFINS), which can add up to around 30% to a real bill.

#[derive(Clone, Copy, Debug, PartialEq, Validate)]
pub struct Tariff {
    /// Energy component (TE), in R$/kWh
    #[validate(minimum = 0.)]
    pub te: f64,
    /// Distribution component (TUSD), in R$/kWh
    #[validate(minimum = 0.)]
    pub tusd: f64,
}

impl Tariff {
    pub fn new(te: f64, tusd: f64) -> Self {
        Self { te, tusd }
    }

    /// Combined price per kWh, in R$.
    pub fn rate(&self) -> f64 {
        self.te + self.tusd
    }

    /// Estimate the cost of every month's consumption.
    pub fn bill(&self, consumption: &MonthlyConsumption) -> BilledConsumption {
        BilledConsumption::new(
            consumption
                .iter()
                .map(|(month, energy_kwh)| {
                    (
                        month,
                        BilledMonth {
                            energy_kwh,
                            cost_reais: energy_kwh * self.rate(),
                        },
                    )
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn tariff() -> Tariff {
        Tariff::new(0.35921, 0.76273)
    }

    #[rstest]
    fn should_bill_every_month_at_combined_rate(tariff: Tariff) {
        let consumption = MonthlyConsumption::new([
            150., 162.5, 0., 180., 210., 199.9, 230., 240., 175., 160., 155., 300.,
        ])
        .unwrap();

        let billed = tariff.bill(&consumption);

        assert_eq!(billed.len(), 12);
        for (month, billed_month) in billed.iter() {
            let energy_kwh = consumption.energy_kwh(month);
            assert_eq!(billed_month.energy_kwh, energy_kwh);
            assert_eq!(billed_month.cost_reais, energy_kwh * (0.35921 + 0.76273));
        }
    }

    #[rstest]
    fn should_bill_200_kwh_at_default_rates(tariff: Tariff) {
        let billed = tariff.bill(&MonthlyConsumption::new([200.; 12]).unwrap());

        assert_relative_eq!(billed.month(Month::August).cost_reais, 224.388, max_relative = 1e-12);
    }

    #[rstest]
    fn should_reject_negative_rates_on_validation() {
        assert!(Tariff::new(-0.1, 0.5).validate().is_err());
        assert!(Tariff::new(0.1, 0.5).validate().is_ok());
    }
}
