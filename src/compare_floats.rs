pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

/// The entry with the greatest value. The first such entry wins on ties, so callers iterating in
/// calendar order get the earliest month.
pub(crate) fn first_max_by_value<K: Copy>(
    entries: impl IntoIterator<Item = (K, f64)>,
) -> Option<(K, f64)> {
    entries.into_iter().fold(None, |best, (key, value)| match best {
        Some((_, best_value)) if value <= best_value => best,
        _ => Some((key, value)),
    })
}

/// The entry with the smallest value, first one winning on ties.
pub(crate) fn first_min_by_value<K: Copy>(
    entries: impl IntoIterator<Item = (K, f64)>,
) -> Option<(K, f64)> {
    entries.into_iter().fold(None, |best, (key, value)| match best {
        Some((_, best_value)) if value >= best_value => best,
        _ => Some((key, value)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    pub fn should_calc_2_as_min_of_2_and_4_ints() {
        assert_eq!(min_of_2(2, 4), 2);
    }

    #[rstest]
    pub fn should_calc_2_as_min_of_4_and_2_floats() {
        assert_eq!(min_of_2(4., 2.), 2.);
    }

    #[rstest]
    fn should_find_first_max() {
        let entries = [("a", 1.), ("b", 3.), ("c", 3.), ("d", 2.)];
        assert_eq!(first_max_by_value(entries), Some(("b", 3.)));
    }

    #[rstest]
    fn should_find_first_min() {
        let entries = [("a", 4.), ("b", 0.5), ("c", 2.), ("d", 0.5)];
        assert_eq!(first_min_by_value(entries), Some(("b", 0.5)));
    }

    #[rstest]
    fn should_return_first_entry_when_all_equal() {
        let entries = [("a", 7.), ("b", 7.), ("c", 7.)];
        assert_eq!(first_max_by_value(entries), Some(("a", 7.)));
        assert_eq!(first_min_by_value(entries), Some(("a", 7.)));
    }

    #[rstest]
    fn should_return_none_for_no_entries() {
        let entries: [(&str, f64); 0] = [];
        assert_eq!(first_max_by_value(entries), None);
        assert_eq!(first_min_by_value(entries), None);
    }
}
