use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use crate::config::generator::GenerationParameters;

/// Synthetic listings never go below this.
pub const PRICE_FLOOR: f64 = 10.0;

/// Where inside a spike window the bump peaks, and how wide it is (both as
/// a fraction of the window).
const SPIKE_PEAK_PHASE: f64 = 0.05;
const SPIKE_WIDTH: f64 = 0.05;

/// Outliers land this many volatilities away from the center.
const OUTLIER_SHIFT: f64 = 2.5;

/// Stable seed for an event identity (`artist|venue|date`).
pub fn seed_from_context(context_key: &str) -> u64 {
    let digest = Sha256::digest(context_key.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Mix the base seed with the whole-hour bucket so consecutive polls inside
/// the same hour replay identical noise.
fn cycle_seed(seed: u64, elapsed_hours: f64) -> u64 {
    let bucket = elapsed_hours.max(0.0).floor() as u64;
    seed ^ bucket.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Price level the listings scatter around at `elapsed_hours`.
pub fn center_price(params: &GenerationParameters, elapsed_hours: f64) -> f64 {
    let mut center = params.base_price + params.trend_per_hour * elapsed_hours;

    if params.spike_period_hours > 0.0 {
        let phase = elapsed_hours.rem_euclid(params.spike_period_hours) / params.spike_period_hours;
        let bump = (-((phase - SPIKE_PEAK_PHASE) / SPIKE_WIDTH).powi(2)).exp();
        center *= 1.0 + params.spike_pct * bump;
    }

    center
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Generate one cycle's worth of synthetic listing prices.
///
/// Output is a pure function of the (sanitized) parameters, the whole-hour
/// bucket of `elapsed_hours` for the noise, and the exact `elapsed_hours`
/// for the center. Without an explicit seed the event's `context_key`
/// decides the noise.
pub fn generate(params: &GenerationParameters, elapsed_hours: f64, context_key: &str) -> Vec<f64> {
    let params = params.sanitized();
    let elapsed_hours = if elapsed_hours.is_finite() { elapsed_hours.max(0.0) } else { 0.0 };

    let seed = params.seed.unwrap_or_else(|| seed_from_context(context_key));
    let mut rng = StdRng::seed_from_u64(cycle_seed(seed, elapsed_hours));

    let center = center_price(&params, elapsed_hours);

    (0..params.listing_count)
        .map(|_| {
            // Mean of three uniforms: cheap bell-shaped noise bounded to [-1, 1]
            let noise = (rng.gen_range(-1.0..=1.0)
                + rng.gen_range(-1.0..=1.0)
                + rng.gen_range(-1.0..=1.0)) / 3.0;
            let mut price = center + noise * params.volatility;

            if rng.gen_bool(params.outlier_prob) {
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                price += sign * OUTLIER_SHIFT * params.volatility;
            }

            round_cents(price.max(PRICE_FLOOR))
        })
        .collect()
}
