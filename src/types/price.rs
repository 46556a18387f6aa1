use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one source's observations in one poll cycle.
///
/// Only ever built from a non-empty set of observations; "no data" is
/// represented by `Option::None` at the call site, never by a zeroed record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub avg: f64,
    pub median: f64,
}

impl PriceStats {
    pub fn new(min: f64, avg: f64, median: f64) -> Self {
        PriceStats { min, avg, median }
    }

    pub fn field(&self, field: StatField) -> f64 {
        match field {
            StatField::Min => self.min,
            StatField::Avg => self.avg,
            StatField::Median => self.median,
        }
    }
}

impl fmt::Display for PriceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min={:.2}, avg={:.2}, median={:.2}", self.min, self.avg, self.median)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    Min,
    Avg,
    Median,
}

impl StatField {
    pub const ALL: [StatField; 3] = [StatField::Min, StatField::Avg, StatField::Median];
}

/// Figures reported by upstreams that expose a price summary instead of listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub low: Option<f64>,
    pub avg: Option<f64>,
    pub median: Option<f64>,
    pub high: Option<f64>,
}

impl PriceSummary {
    pub fn is_empty(&self) -> bool {
        self.low.is_none() && self.avg.is_none() && self.median.is_none() && self.high.is_none()
    }
}
