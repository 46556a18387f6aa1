use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use crate::error::{Error, Result};
use crate::price_infra::synthetic::PRICE_FLOOR;
use crate::types::price::PriceSummary;

pub const SPREAD_LISTING_COUNT: usize = 40;
pub const DEFAULT_CENTER: f64 = 100.0;
const MIN_SIGMA: f64 = 8.0;

/// Turn a low/avg/median/high summary into a plausible listing set so the
/// reducer can treat summary-only upstreams like every other source.
///
/// The reported figures are written over random slots after sampling, so
/// they always survive into the reduced stats. Later overwrites may land on
/// the same slot as earlier ones.
pub fn expand_summary(summary: &PriceSummary, seed: Option<u64>) -> Result<Vec<f64>> {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    let low = finite(summary.low);
    let avg = finite(summary.avg);
    let median = finite(summary.median);
    let high = finite(summary.high);

    let center = avg.or(median).or(low).or(high).unwrap_or(DEFAULT_CENTER);
    let mut floor = low.unwrap_or_else(|| PRICE_FLOOR.max(0.6 * center));
    let mut ceil = high.unwrap_or_else(|| (1.3 * center).max(center + 40.0));
    if floor > ceil {
        std::mem::swap(&mut floor, &mut ceil);
    }

    let sigma = MIN_SIGMA.max((ceil - floor) / 10.0);
    let normal = Normal::new(center, sigma)
        .map_err(|e| Error::InvalidSummary(format!("{:?}: {}", summary, e)))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut prices: Vec<f64> = (0..SPREAD_LISTING_COUNT)
        .map(|_| normal.sample(&mut rng).max(floor).min(ceil))
        .collect();

    for reported in [low, high, median, avg].into_iter().flatten() {
        let idx = rng.gen_range(0..prices.len());
        prices[idx] = reported;
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_inside_reported_range() {
        let summary = PriceSummary { low: Some(60.0), avg: Some(90.0), median: Some(85.0), high: Some(200.0) };
        let prices = expand_summary(&summary, Some(42)).unwrap();

        assert_eq!(prices.len(), SPREAD_LISTING_COUNT);
        assert!(prices.iter().all(|p| (60.0..=200.0).contains(p)));
    }

    #[test]
    fn same_seed_same_spread() {
        let summary = PriceSummary { low: Some(40.0), high: Some(95.0), ..Default::default() };
        assert_eq!(
            expand_summary(&summary, Some(9)).unwrap(),
            expand_summary(&summary, Some(9)).unwrap(),
        );
    }

    #[test]
    fn empty_summary_uses_default_center() {
        let prices = expand_summary(&PriceSummary::default(), Some(3)).unwrap();
        // floor = max(10, 60), ceil = max(130, 140)
        assert!(prices.iter().all(|p| (60.0..=140.0).contains(p)));
    }

    #[test]
    fn inverted_range_is_swapped() {
        let summary = PriceSummary { low: Some(120.0), high: Some(80.0), ..Default::default() };
        let prices = expand_summary(&summary, Some(5)).unwrap();
        assert!(prices.iter().all(|p| (80.0..=120.0).contains(p)));
    }
}
