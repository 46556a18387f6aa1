use crate::types::price::PriceStats;

/// Reduce a cycle's raw observations for one source to min/avg/median.
///
/// Missing entries (and NaN, which is how a missing number usually shows up
/// after parsing) are dropped first. Returns `None` when nothing is left.
/// Negative values are passed through untouched.
pub fn reduce(observations: &[Option<f64>]) -> Option<PriceStats> {
    let mut sorted: Vec<f64> = usable(observations).collect();

    if sorted.is_empty() {
        return None;
    }

    // Mean is order independent, take it before sorting
    let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;

    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    Some(PriceStats {
        min: sorted[0],
        avg,
        median,
    })
}

fn usable(observations: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    observations.iter()
        .flatten()
        .copied()
        .filter(|p| !p.is_nan())
}

/// How many observations `reduce` would actually use.
pub fn usable_count(observations: &[Option<f64>]) -> usize {
    usable(observations).count()
}

pub fn reduce_prices(prices: &[f64]) -> Option<PriceStats> {
    let observations: Vec<Option<f64>> = prices.iter().copied().map(Some).collect();
    reduce(&observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_all_missing_are_absent() {
        assert_eq!(reduce(&[]), None);
        assert_eq!(reduce(&[None, None]), None);
        assert_eq!(reduce(&[Some(f64::NAN)]), None);
    }

    #[test]
    fn single_element() {
        assert_eq!(reduce(&[Some(5.0)]), Some(PriceStats::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(reduce_prices(&[4.0, 1.0, 3.0, 2.0]).unwrap().median, 2.5);
        assert_eq!(reduce_prices(&[3.0, 1.0, 2.0]).unwrap().median, 2.0);
    }

    #[test]
    fn all_zero_is_data() {
        assert_eq!(reduce_prices(&[0.0, 0.0]), Some(PriceStats::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn missing_entries_are_skipped() {
        let stats = reduce(&[None, Some(80.0), None, Some(120.0)]).unwrap();
        assert_eq!(stats, PriceStats::new(80.0, 100.0, 100.0));
    }

    #[test]
    fn usable_count_matches_what_reduce_sees() {
        assert_eq!(usable_count(&[None, Some(f64::NAN), Some(3.0), Some(3.0)]), 2);
        assert_eq!(usable_count(&[]), 0);
    }

    #[test]
    fn negatives_pass_through() {
        let stats = reduce_prices(&[-5.0, 5.0]).unwrap();
        assert_eq!(stats.min, -5.0);
        assert_eq!(stats.avg, 0.0);
    }
}
