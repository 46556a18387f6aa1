pub mod ticker;

use std::sync::Arc;
use std::time::{Duration, Instant};
use futures::future::join_all;
use tracing::{info, warn, error, Instrument};
use crate::config::TrackerConfig;
use crate::config::event::EventIdentity;
use crate::error::{Error, Result};
use crate::interfaces::stats_sink::StatsSink;
use crate::observability::tracing::trace_poll_cycle;
use crate::price_infra::aggregator::{aggregate, PollCycleResult};
use crate::price_infra::connectors::{build_fallback, PriceSource};
use crate::price_infra::spread::expand_summary;
use crate::price_infra::stats::usable_count;
use crate::price_infra::{PriceObservationSet, SourceQuote};
use crate::types::ids::CycleId;
use crate::types::source::SourceName;

/// Runs one fetch → reduce → aggregate → publish pass over every source.
///
/// Shared by the recurring ticker and the on-demand REST trigger. Cycles
/// hold no locks, so two of them may run at the same time.
///
/// With a fallback set, a cycle in which no live source produced a single
/// usable price asks the fallback instead. The fallback is always listed
/// last so its gauges go back to NaN once live data returns.
pub struct TicketPoller {
    event: EventIdentity,
    sources: Vec<Arc<dyn PriceSource>>,
    fallback: Option<Arc<dyn PriceSource>>,
    sink: Arc<dyn StatsSink>,
    fetch_timeout: Duration,
    spread_seed: Option<u64>,
}

impl TicketPoller {
    pub fn new(
        event: EventIdentity,
        sources: Vec<Arc<dyn PriceSource>>,
        sink: Arc<dyn StatsSink>,
        fetch_timeout: Duration,
        spread_seed: Option<u64>,
    ) -> Self {
        TicketPoller {
            event,
            sources,
            fallback: None,
            sink,
            fetch_timeout,
            spread_seed,
        }
    }

    pub fn from_config(
        config: &TrackerConfig,
        sources: Vec<Arc<dyn PriceSource>>,
        sink: Arc<dyn StatsSink>,
    ) -> Self {
        let poller = Self::new(
            config.event.clone(),
            sources,
            sink,
            config.fetch_timeout,
            config.spread_seed,
        );

        match build_fallback(config) {
            Some(fallback) => poller.with_fallback(fallback),
            None => poller,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn PriceSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn event(&self) -> &EventIdentity {
        &self.event
    }

    /// Run a full cycle. Never fails: a broken source only loses its own data.
    pub async fn run_cycle(&self) -> PollCycleResult {
        let cycle_id = CycleId::new();
        let span = trace_poll_cycle(&cycle_id, &self.event);

        async {
            let started = Instant::now();
            info!(
                "Polling ticket platforms... (artist='{}', venue='{}', date='{}')",
                self.event.artist,
                self.event.venue,
                self.event.date_string()
            );

            // Step 1: Fetch every source concurrently
            let mut raw = self.fetch_all().await;

            // Step 2: Stand in for live sources that all came back empty
            if let Some(fallback) = &self.fallback {
                let live_has_data = raw.iter().any(|(_, observations)| usable_count(observations) > 0);
                if live_has_data {
                    raw.push((fallback.name().clone(), Vec::new()));
                } else {
                    warn!("No live source returned usable prices, using {}", fallback.name());
                    raw.push(self.fetch_source(fallback.as_ref()).await);
                }
            }

            let listing_counts: Vec<(SourceName, usize)> = raw.iter()
                .map(|(source, observations)| (source.clone(), usable_count(observations)))
                .collect();

            // Step 3: Reduce and pick Best
            let result = match aggregate(raw) {
                Ok(result) => result,
                Err(e) => {
                    error!("Aggregation rejected this cycle: {}", e);
                    PollCycleResult::default()
                }
            };

            // Step 4: Publish
            self.publish(&result, &listing_counts);

            let elapsed = started.elapsed();
            self.sink.record_cycle(elapsed.as_secs_f64());
            info!(
                "Poll cycle finished in {:?}: {}/{} sources with data",
                elapsed,
                result.sources_with_data(),
                result.sources.len()
            );

            result
        }
        .instrument(span)
        .await
    }

    async fn fetch_all(&self) -> Vec<(SourceName, PriceObservationSet)> {
        let fetches = self.sources.iter()
            .map(|source| self.fetch_source(source.as_ref()));

        // join_all keeps the declared source order
        join_all(fetches).await
    }

    async fn fetch_source(&self, source: &dyn PriceSource) -> (SourceName, PriceObservationSet) {
        let name = source.name().clone();
        let observations = match self.fetch_one(source).await {
            Ok(observations) => observations,
            Err(e) => {
                if e.is_fetch_failure() {
                    warn!("{} fetch failed, treating as empty: {}", name, e);
                } else {
                    error!("{} returned unusable data, treating as empty: {}", name, e);
                }
                self.sink.record_fetch_failure(&name);
                Vec::new()
            }
        };
        (name, observations)
    }

    async fn fetch_one(&self, source: &dyn PriceSource) -> Result<PriceObservationSet> {
        let quote = tokio::time::timeout(self.fetch_timeout, source.fetch(&self.event))
            .await
            .map_err(|_| Error::FetchTimeout {
                source_name: source.name().to_string(),
                timeout: self.fetch_timeout,
            })??;

        match quote {
            SourceQuote::Listings(observations) => Ok(observations),
            SourceQuote::Summary(summary) if summary.is_empty() => Ok(Vec::new()),
            SourceQuote::Summary(summary) => {
                let prices = expand_summary(&summary, self.spread_seed)?;
                Ok(prices.into_iter().map(Some).collect())
            }
        }
    }

    fn publish(&self, result: &PollCycleResult, listing_counts: &[(SourceName, usize)]) {
        let count_of = |source: &SourceName| listing_counts.iter()
            .find(|(name, _)| name == source)
            .map_or(0, |(_, count)| *count);

        for (source, stats) in result.entries() {
            let listings = match &result.best {
                Some(best) if source.is_best() => count_of(&best.source),
                _ => count_of(&source),
            };
            self.sink.publish_stats(&source, stats);
            self.sink.record_listings(&source, listings);
        }

        for (source, stats) in &result.sources {
            match stats {
                Some(stats) => info!("{} -> {}", source, stats),
                None => info!("{} -> no data this poll", source),
            }
        }
        match &result.best {
            Some(best) => info!("Best ({}) -> {}", best.source, best.stats),
            None => info!("Best -> no data this poll"),
        }
    }
}
