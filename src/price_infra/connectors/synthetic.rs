use std::time::Instant;
use async_trait::async_trait;
use crate::config::event::EventIdentity;
use crate::config::generator::GenerationParameters;
use crate::error::Result;
use crate::price_infra::connectors::PriceSource;
use crate::price_infra::synthetic::generate;
use crate::price_infra::SourceQuote;
use crate::types::source::SourceName;

/// Stand-in upstream used in dummy mode or when nothing live is configured.
pub struct SyntheticSource {
    name: SourceName,
    params: GenerationParameters,
    started_at: Instant,
}

impl SyntheticSource {
    pub fn new(name: SourceName, params: GenerationParameters) -> Self {
        Self::started_at(name, params, Instant::now())
    }

    pub fn started_at(name: SourceName, params: GenerationParameters, started_at: Instant) -> Self {
        SyntheticSource {
            name,
            params: params.sanitized(),
            started_at,
        }
    }

    pub fn elapsed_hours(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() / 3600.0
    }
}

#[async_trait]
impl PriceSource for SyntheticSource {
    fn name(&self) -> &SourceName {
        &self.name
    }

    async fn fetch(&self, event: &EventIdentity) -> Result<SourceQuote> {
        let elapsed_hours = self.elapsed_hours();
        let prices = generate(&self.params, elapsed_hours, &event.context_key());

        tracing::debug!(
            "Generated {} synthetic prices for {} ({:.2}h since start)",
            prices.len(),
            event,
            elapsed_hours
        );

        Ok(SourceQuote::from_prices(prices))
    }
}
