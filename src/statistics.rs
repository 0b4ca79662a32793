/// A simple statistics module with averaging helpers used by the consumption analysis.
use statrs::statistics::Statistics;

/// Arithmetic mean of the values, or `None` when there are none.
pub fn mean(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }

    Some(numbers.mean())
}

/// Sum of the values divided by a fixed number of periods, regardless of how many values there
/// are.
pub fn average_over_periods(numbers: &[f64], periods: usize) -> f64 {
    numbers.iter().sum::<f64>() / periods as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::*;

    #[fixture]
    fn numbers() -> [f64; 10] {
        [9.0, 3.0, 3.0, 4.0, 5.0, 4.9, 8.0, 3.3, 2.0, 0.1]
    }

    #[rstest]
    fn test_mean(numbers: [f64; 10]) {
        assert_relative_eq!(mean(&numbers).unwrap(), 4.23, max_relative = 1e-12);
    }

    #[rstest]
    fn test_mean_of_nothing() {
        assert_eq!(mean(&[]), None);
    }

    #[rstest]
    fn test_average_over_periods(numbers: [f64; 10]) {
        assert_relative_eq!(average_over_periods(&numbers, 12), 42.3 / 12., max_relative = 1e-12);
    }
}
