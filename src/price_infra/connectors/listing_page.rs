use async_trait::async_trait;
use reqwest::{Client, Url};
use crate::config::event::EventIdentity;
use crate::error::{Error, Result};
use crate::price_infra::connectors::PriceSource;
use crate::price_infra::parsers::extract_listing_prices;
use crate::price_infra::SourceQuote;
use crate::types::source::SourceName;

/// Resale marketplace event page; prices are scraped out of the HTML.
pub struct ListingPageSource {
    name: SourceName,
    url: Url,
    client: Client,
}

impl ListingPageSource {
    pub fn new(name: SourceName, url: Url, client: Client) -> Self {
        ListingPageSource { name, url, client }
    }
}

#[async_trait]
impl PriceSource for ListingPageSource {
    fn name(&self) -> &SourceName {
        &self.name
    }

    async fn fetch(&self, _event: &EventIdentity) -> Result<SourceQuote> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                source_name: self.name.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let prices = extract_listing_prices(&html);
        tracing::info!("{} scraped {} prices from {}", self.name, prices.len(), self.url);

        Ok(SourceQuote::from_prices(prices))
    }
}
