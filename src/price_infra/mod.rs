pub mod connectors;
pub mod aggregator;
pub mod stats;
pub mod synthetic;
pub mod spread;
pub mod parsers;

use serde::{Deserialize, Serialize};
use crate::types::price::PriceSummary;

/// One source's raw observations for one cycle; `None` marks a missing entry.
pub type PriceObservationSet = Vec<Option<f64>>;

/// What a single fetch against a source produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceQuote {
    Listings(PriceObservationSet),
    Summary(PriceSummary),
}

impl SourceQuote {
    pub fn empty() -> Self {
        SourceQuote::Listings(Vec::new())
    }

    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Self {
        SourceQuote::Listings(prices.into_iter().map(Some).collect())
    }
}
