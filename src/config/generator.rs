use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTING_COUNT: usize = 60;
pub const MAX_OUTLIER_PROB: f64 = 0.5;

/// Knobs for the synthetic market simulator.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationParameters {
    pub base_price: f64,
    pub volatility: f64,
    pub trend_per_hour: f64,
    pub spike_pct: f64,
    pub spike_period_hours: f64,
    pub outlier_prob: f64,
    pub listing_count: usize,
    pub seed: Option<u64>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            base_price: 150.0,
            volatility: 20.0,
            trend_per_hour: 0.1,
            spike_pct: 0.25,         // +25% at the top of a spike
            spike_period_hours: 24.0,
            outlier_prob: 0.05,      // 5% of listings
            listing_count: DEFAULT_LISTING_COUNT,
            seed: None,
        }
    }
}

impl GenerationParameters {
    /// Clamp every knob into its valid range instead of failing.
    pub fn sanitized(&self) -> Self {
        let defaults = GenerationParameters::default();

        let finite_or = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };

        let spike_period_hours = finite_or(self.spike_period_hours, 0.0);

        GenerationParameters {
            base_price: finite_or(self.base_price, defaults.base_price).max(0.0),
            volatility: finite_or(self.volatility, 0.0).max(0.0),
            trend_per_hour: finite_or(self.trend_per_hour, 0.0),
            spike_pct: finite_or(self.spike_pct, 0.0).max(0.0),
            // A non-positive period turns spikes off
            spike_period_hours: spike_period_hours.max(0.0),
            outlier_prob: finite_or(self.outlier_prob, 0.0).clamp(0.0, MAX_OUTLIER_PROB),
            listing_count: if self.listing_count == 0 { DEFAULT_LISTING_COUNT } else { self.listing_count },
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        let params = GenerationParameters::default();
        assert_eq!(params.sanitized(), params);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = GenerationParameters {
            base_price: -10.0,
            volatility: -3.0,
            trend_per_hour: f64::NAN,
            spike_pct: -0.5,
            spike_period_hours: -1.0,
            outlier_prob: 0.9,
            listing_count: 0,
            seed: Some(7),
        }
        .sanitized();

        assert_eq!(params.base_price, 0.0);
        assert_eq!(params.volatility, 0.0);
        assert_eq!(params.trend_per_hour, 0.0);
        assert_eq!(params.spike_pct, 0.0);
        assert_eq!(params.spike_period_hours, 0.0);
        assert_eq!(params.outlier_prob, MAX_OUTLIER_PROB);
        assert_eq!(params.listing_count, DEFAULT_LISTING_COUNT);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn non_finite_base_falls_back_to_default() {
        let params = GenerationParameters { base_price: f64::INFINITY, ..Default::default() }.sanitized();
        assert_eq!(params.base_price, GenerationParameters::default().base_price);
    }
}
