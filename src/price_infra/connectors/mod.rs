pub mod listing_page;
pub mod synthetic;
pub mod ticketmaster;

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use crate::config::TrackerConfig;
use crate::config::event::EventIdentity;
use crate::config::sources::{synthetic_source_name, SourcePlan};
use crate::error::Result;
use crate::price_infra::SourceQuote;
use crate::types::source::SourceName;
use self::listing_page::ListingPageSource;
use self::synthetic::SyntheticSource;
use self::ticketmaster::TicketmasterSource;

/// Somewhere raw prices for the tracked event come from.
///
/// Implementations return an error on any fetch problem; the poller turns
/// that into "no data" for the source and carries on with the others.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &SourceName;
    async fn fetch(&self, event: &EventIdentity) -> Result<SourceQuote>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ticketwatch/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Instantiate the configured sources in declared order.
pub fn build_sources(config: &TrackerConfig) -> Result<Vec<Arc<dyn PriceSource>>> {
    let mut sources: Vec<Arc<dyn PriceSource>> = Vec::new();

    match &config.sources {
        SourcePlan::Synthetic => {
            sources.push(Arc::new(SyntheticSource::new(
                synthetic_source_name(),
                config.generator.clone(),
            )));
        }
        SourcePlan::Live { ticketmaster, pages } => {
            let client = http_client(config.fetch_timeout)?;

            if let Some(tm) = ticketmaster {
                sources.push(Arc::new(TicketmasterSource::new(tm.clone(), client.clone())));
            }
            for page in pages {
                sources.push(Arc::new(ListingPageSource::new(
                    page.name.clone(),
                    page.url.clone(),
                    client.clone(),
                )));
            }
        }
    }

    Ok(sources)
}

/// Synthetic stand-in for a live plan, used by the poller in cycles where
/// no live source produced usable prices. A synthetic plan needs none.
pub fn build_fallback(config: &TrackerConfig) -> Option<Arc<dyn PriceSource>> {
    match &config.sources {
        SourcePlan::Synthetic => None,
        SourcePlan::Live { .. } => Some(Arc::new(SyntheticSource::new(
            synthetic_source_name(),
            config.generator.clone(),
        ))),
    }
}
