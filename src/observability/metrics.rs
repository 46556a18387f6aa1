use std::collections::BTreeMap;
use dashmap::DashMap;
use prometheus::{
    GaugeVec, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use serde::Serialize;
use crate::config::event::EventIdentity;
use crate::error::Result;
use crate::interfaces::stats_sink::StatsSink;
use crate::types::price::{PriceStats, StatField};
use crate::types::source::SourceName;

const PRICE_LABELS: [&str; 4] = ["artist", "venue", "date", "source"];

/// Last published values for one source, `None` where the source had no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PublishedStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub median: Option<f64>,
    pub listings: u64,
}

/// Prometheus-backed sink for per-source price gauges.
///
/// Every (source, field) pair is written independently, last writer wins.
/// Two overlapping cycles can leave one source's min and median from
/// different cycles; nothing here tries to prevent that.
pub struct PriceMetrics {
    registry: Registry,
    labels: [String; 3],

    min_price: GaugeVec,
    avg_price: GaugeVec,
    median_price: GaugeVec,
    listings_count: IntGaugeVec,

    poll_cycles: IntCounter,
    fetch_failures: IntCounterVec,
    cycle_duration: Histogram,

    last_published: DashMap<(SourceName, StatField), f64>,
    last_listings: DashMap<SourceName, u64>,
}

impl PriceMetrics {
    pub fn new(event: &EventIdentity) -> Result<Self> {
        let registry = Registry::new();

        let min_price = GaugeVec::new(
            Opts::new("ticket_min_price", "Lowest listing price"),
            &PRICE_LABELS,
        )?;
        let avg_price = GaugeVec::new(
            Opts::new("ticket_avg_price", "Average listing price"),
            &PRICE_LABELS,
        )?;
        let median_price = GaugeVec::new(
            Opts::new("ticket_median_price", "Median listing price"),
            &PRICE_LABELS,
        )?;
        let listings_count = IntGaugeVec::new(
            Opts::new("ticket_listings_count", "Usable listings behind the published stats"),
            &PRICE_LABELS,
        )?;

        let poll_cycles = IntCounter::new(
            "ticket_poll_cycles_total",
            "Total number of completed poll cycles",
        )?;
        let fetch_failures = IntCounterVec::new(
            Opts::new("ticket_source_fetch_failures_total", "Failed or timed out source fetches"),
            &["source"],
        )?;
        let cycle_duration = Histogram::with_opts(
            HistogramOpts::new(
                "ticket_poll_cycle_duration_seconds",
                "Wall time of one poll cycle"
            ).buckets(vec![0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0])
        )?;

        registry.register(Box::new(min_price.clone()))?;
        registry.register(Box::new(avg_price.clone()))?;
        registry.register(Box::new(median_price.clone()))?;
        registry.register(Box::new(listings_count.clone()))?;
        registry.register(Box::new(poll_cycles.clone()))?;
        registry.register(Box::new(fetch_failures.clone()))?;
        registry.register(Box::new(cycle_duration.clone()))?;

        Ok(PriceMetrics {
            registry,
            labels: [event.artist.clone(), event.venue.clone(), event.date_string()],
            min_price,
            avg_price,
            median_price,
            listings_count,
            poll_cycles,
            fetch_failures,
            cycle_duration,
            last_published: DashMap::new(),
            last_listings: DashMap::new(),
        })
    }

    fn gauge_vec(&self, field: StatField) -> &GaugeVec {
        match field {
            StatField::Min => &self.min_price,
            StatField::Avg => &self.avg_price,
            StatField::Median => &self.median_price,
        }
    }

    fn label_values<'a>(&'a self, source: &'a SourceName) -> [&'a str; 4] {
        let [artist, venue, date] = &self.labels;
        [artist.as_str(), venue.as_str(), date.as_str(), source.as_str()]
    }

    /// The single update operation for one (source, field). NaN marks "no data".
    pub fn set(&self, source: &SourceName, field: StatField, value: f64) {
        self.gauge_vec(field)
            .with_label_values(&self.label_values(source))
            .set(value);
        self.last_published.insert((source.clone(), field), value);
    }

    pub fn get(&self, source: &SourceName, field: StatField) -> Option<f64> {
        self.last_published.get(&(source.clone(), field))
            .map(|v| *v)
            .filter(|v| !v.is_nan())
    }

    pub fn listings(&self, source: &SourceName) -> u64 {
        self.last_listings.get(source).map_or(0, |v| *v)
    }

    /// Everything published so far, keyed by source name.
    pub fn snapshot(&self) -> BTreeMap<String, PublishedStats> {
        let mut out: BTreeMap<String, PublishedStats> = BTreeMap::new();

        for entry in self.last_published.iter() {
            let (source, field) = entry.key();
            let value = Some(*entry.value()).filter(|v| !v.is_nan());
            let stats = out.entry(source.to_string()).or_default();
            match field {
                StatField::Min => stats.min = value,
                StatField::Avg => stats.avg = value,
                StatField::Median => stats.median = value,
            }
        }

        for entry in self.last_listings.iter() {
            out.entry(entry.key().to_string()).or_default().listings = *entry.value();
        }

        out
    }

    pub fn poll_cycles(&self) -> u64 {
        self.poll_cycles.get()
    }

    pub fn fetch_failures(&self, source: &SourceName) -> u64 {
        self.fetch_failures.with_label_values(&[source.as_str()]).get()
    }

    /// Prometheus text exposition of the whole registry.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = String::new();
        encoder.encode_utf8(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

impl StatsSink for PriceMetrics {
    fn publish_stats(&self, source: &SourceName, stats: Option<PriceStats>) {
        for field in StatField::ALL {
            let value = stats.map_or(f64::NAN, |s| s.field(field));
            self.set(source, field, value);
        }
    }

    fn record_listings(&self, source: &SourceName, count: usize) {
        let count = count as u64;
        self.listings_count
            .with_label_values(&self.label_values(source))
            .set(count as i64);
        self.last_listings.insert(source.clone(), count);
    }

    fn record_fetch_failure(&self, source: &SourceName) {
        self.fetch_failures.with_label_values(&[source.as_str()]).inc();
    }

    fn record_cycle(&self, duration_secs: f64) {
        self.poll_cycles.inc();
        self.cycle_duration.observe(duration_secs);
    }
}
