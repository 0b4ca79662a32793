use crate::calendar::Month;
use crate::compare_floats::{first_max_by_value, first_min_by_value, min_of_2};
use crate::core::consumption::{MonthlyConsumption, MonthlyGeneration};
use std::fmt::{Display, Formatter};
use tracing::instrument;

/// Overall judgement on whether the simulated array pays off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// More months covered than not
    Advantageous,
    /// As many months covered as not
    Borderline,
    NotAdvantageous,
}

impl Verdict {
    fn from_counts(sufficient_months: usize, insufficient_months: usize) -> Self {
        match sufficient_months.cmp(&insufficient_months) {
            std::cmp::Ordering::Greater => Verdict::Advantageous,
            std::cmp::Ordering::Equal => Verdict::Borderline,
            std::cmp::Ordering::Less => Verdict::NotAdvantageous,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Verdict::Advantageous => "advantageous",
                Verdict::Borderline => "borderline",
                Verdict::NotAdvantageous => "not advantageous",
            }
        )
    }
}

/// Generation set against consumption for a single month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthComparison {
    pub month: Month,
    pub consumption_kwh: f64,
    pub generation_kwh: f64,
    /// Generated energy that displaces consumption, never more than either.
    pub used_kwh: f64,
    pub savings_reais: f64,
    /// Whether generation meets consumption.
    pub covered: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationComparison {
    /// Month of greatest generation, absent when nothing was simulated.
    pub max_generation: Option<(Month, f64)>,
    pub min_generation: Option<(Month, f64)>,
    pub months: Vec<MonthComparison>,
    pub total_annual_savings: f64,
    pub sufficient_months: usize,
    pub insufficient_months: usize,
    pub verdict: Verdict,
}

impl GenerationComparison {
    /// Whether any generation was simulated at all.
    pub fn has_generation(&self) -> bool {
        self.max_generation.is_some()
    }
}

/// Compare simulated generation with actual consumption, month by month.
///
/// Savings are valued at `average_cost_per_kwh`. Months missing from `generation` count as zero
/// generation, so an empty generation map gives no savings and no covered months.
#[instrument(skip_all)]
pub fn compare_generation_with_consumption(
    generation: &MonthlyGeneration,
    consumption: &MonthlyConsumption,
    average_cost_per_kwh: f64,
) -> GenerationComparison {
    let max_generation = first_max_by_value(generation.iter().map(|(month, kwh)| (*month, *kwh)));
    let min_generation = first_min_by_value(generation.iter().map(|(month, kwh)| (*month, *kwh)));

    let months = consumption
        .iter()
        .map(|(month, consumption_kwh)| {
            let generation_kwh = generation.get(&month).copied().unwrap_or(0.);
            let used_kwh = min_of_2(consumption_kwh, generation_kwh);

            MonthComparison {
                month,
                consumption_kwh,
                generation_kwh,
                used_kwh,
                savings_reais: average_cost_per_kwh * used_kwh,
                covered: generation_kwh >= consumption_kwh,
            }
        })
        .collect::<Vec<_>>();

    let total_annual_savings = months.iter().map(|month| month.savings_reais).sum();
    let sufficient_months = months.iter().filter(|month| month.covered).count();
    let insufficient_months = months.len() - sufficient_months;

    GenerationComparison {
        max_generation,
        min_generation,
        months,
        total_annual_savings,
        sufficient_months,
        insufficient_months,
        verdict: Verdict::from_counts(sufficient_months, insufficient_months),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use strum::IntoEnumIterator;

    #[fixture]
    fn consumption() -> MonthlyConsumption {
        MonthlyConsumption::new([200.; 12]).unwrap()
    }

    fn generation_from(values: [f64; 12]) -> MonthlyGeneration {
        Month::iter().zip(values).collect()
    }

    #[rstest]
    #[case(7, 5, Verdict::Advantageous)]
    #[case(6, 6, Verdict::Borderline)]
    #[case(0, 12, Verdict::NotAdvantageous)]
    fn should_judge_from_month_counts(
        #[case] sufficient: usize,
        #[case] insufficient: usize,
        #[case] expected: Verdict,
    ) {
        assert_eq!(Verdict::from_counts(sufficient, insufficient), expected);
    }

    #[rstest]
    fn should_value_used_energy_at_average_cost(consumption: MonthlyConsumption) {
        let generation = generation_from([
            250., 230., 210., 190., 170., 150., 160., 180., 200., 220., 240., 260.,
        ]);
        let comparison = compare_generation_with_consumption(&generation, &consumption, 1.12194);

        assert_eq!(comparison.max_generation, Some((Month::December, 260.)));
        assert_eq!(comparison.min_generation, Some((Month::June, 150.)));
        assert_eq!(comparison.sufficient_months, 7);
        assert_eq!(comparison.insufficient_months, 5);
        assert_eq!(comparison.verdict, Verdict::Advantageous);

        let used_total = 200. * 7. + 190. + 170. + 150. + 160. + 180.;
        assert_relative_eq!(
            comparison.total_annual_savings,
            used_total * 1.12194,
            max_relative = 1e-12
        );
    }

    #[rstest]
    fn should_never_use_more_than_consumed_or_generated() {
        let consumption = MonthlyConsumption::new([
            0., 50., 120., 300., 80., 95., 400., 10., 220., 130., 60., 75.,
        ])
        .unwrap();
        let generation = generation_from([
            10., 60., 100., 310., 80., 0., 200., 15., 230., 120., 61., 74.,
        ]);
        let comparison = compare_generation_with_consumption(&generation, &consumption, 1.);

        for month in &comparison.months {
            assert!(month.used_kwh <= month.consumption_kwh);
            assert!(month.used_kwh <= month.generation_kwh);
            assert_eq!(month.covered, month.generation_kwh >= month.consumption_kwh);
        }
    }

    #[rstest]
    fn should_count_equal_generation_as_covered(consumption: MonthlyConsumption) {
        let comparison =
            compare_generation_with_consumption(&generation_from([200.; 12]), &consumption, 1.);

        assert_eq!(comparison.sufficient_months, 12);
        assert_eq!(comparison.verdict, Verdict::Advantageous);
    }

    #[rstest]
    fn should_handle_missing_generation(consumption: MonthlyConsumption) {
        let comparison =
            compare_generation_with_consumption(&MonthlyGeneration::new(), &consumption, 1.12194);

        assert!(!comparison.has_generation());
        assert_eq!(comparison.sufficient_months, 0);
        assert_eq!(comparison.insufficient_months, 12);
        assert_eq!(comparison.total_annual_savings, 0.);
        assert_eq!(comparison.verdict, Verdict::NotAdvantageous);
    }

    #[rstest]
    fn should_default_months_absent_from_generation_to_zero(consumption: MonthlyConsumption) {
        let generation = IndexMap::from([(Month::January, 500.), (Month::February, 100.)]);
        let comparison = compare_generation_with_consumption(&generation, &consumption, 2.);

        assert_eq!(comparison.months[0].used_kwh, 200.);
        assert_eq!(comparison.months[1].used_kwh, 100.);
        assert_eq!(comparison.months[2].generation_kwh, 0.);
        assert_eq!(comparison.sufficient_months, 1);
        assert_relative_eq!(comparison.total_annual_savings, 600., max_relative = 1e-12);
    }
}
