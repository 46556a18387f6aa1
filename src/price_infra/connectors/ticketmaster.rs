use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use crate::config::event::EventIdentity;
use crate::config::sources::TicketmasterPlan;
use crate::error::{Error, Result};
use crate::price_infra::connectors::PriceSource;
use crate::price_infra::stats::reduce_prices;
use crate::price_infra::SourceQuote;
use crate::types::price::PriceSummary;
use crate::types::source::SourceName;

/// Ticketmaster Discovery API. It only publishes price ranges, so each fetch
/// comes back as a summary that the poller expands into listings.
pub struct TicketmasterSource {
    plan: TicketmasterPlan,
    client: Client,
}

impl TicketmasterSource {
    pub fn new(plan: TicketmasterPlan, client: Client) -> Self {
        TicketmasterSource { plan, client }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.client.get(url)
            .query(&[("apikey", self.plan.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                source_name: self.plan.name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::DeserializationError(format!("{}: {}", self.plan.name, e)))
    }

    async fn price_endpoints(&self, event: &EventIdentity) -> Result<Vec<f64>> {
        let events = match &self.plan.event_id {
            Some(event_id) => {
                // Direct event lookup
                let url = format!("{}/events/{}.json", self.plan.base_url, event_id);
                vec![self.get_json::<TmEvent>(&url, &[]).await?]
            }
            None => {
                // Search by artist/venue/date
                let url = format!("{}/events.json", self.plan.base_url);
                let date = event.date_string();
                let query = [
                    ("keyword", event.artist.clone()),
                    ("venueId", event.venue.clone()),
                    ("startDateTime", format!("{}T00:00:00Z", date)),
                    ("endDateTime", format!("{}T23:59:59Z", date)),
                ];
                let search: TmSearch = self.get_json(&url, &query).await?;
                search.embedded.map(|e| e.events).unwrap_or_default()
            }
        };

        Ok(events.iter()
            .flat_map(|e| e.price_ranges.iter())
            .flat_map(|range| [range.min.as_ref(), range.max.as_ref()])
            .flatten()
            .filter_map(Value::as_f64)
            .filter(|p| p.is_finite())
            .collect())
    }
}

#[async_trait]
impl PriceSource for TicketmasterSource {
    fn name(&self) -> &SourceName {
        &self.plan.name
    }

    async fn fetch(&self, event: &EventIdentity) -> Result<SourceQuote> {
        let endpoints = self.price_endpoints(event).await?;
        tracing::info!("{} price range endpoints: {:?}", self.plan.name, endpoints);

        let (Some(stats), Some(high)) = (
            reduce_prices(&endpoints),
            endpoints.iter().copied().reduce(f64::max),
        ) else {
            tracing::warn!("{} returned no priceRanges for {}", self.plan.name, event);
            return Ok(SourceQuote::empty());
        };

        Ok(SourceQuote::Summary(PriceSummary {
            low: Some(stats.min),
            avg: Some(stats.avg),
            median: Some(stats.median),
            high: Some(high),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct TmEvent {
    #[serde(default, rename = "priceRanges")]
    price_ranges: Vec<TmPriceRange>,
}

/// Endpoints stay untyped: a string or null in one range only drops that endpoint.
#[derive(Debug, Deserialize)]
struct TmPriceRange {
    min: Option<Value>,
    max: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TmSearch {
    #[serde(rename = "_embedded")]
    embedded: Option<TmEmbedded>,
}

#[derive(Debug, Deserialize)]
struct TmEmbedded {
    #[serde(default)]
    events: Vec<TmEvent>,
}
