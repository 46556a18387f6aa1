use crate::types::price::PriceStats;
use crate::types::source::SourceName;

/// Where cycle results are published. Fire-and-forget: `None` means the
/// source had no data this cycle and must still be recorded as such.
#[cfg_attr(test, mockall::automock)]
pub trait StatsSink: Send + Sync {
    fn publish_stats(&self, source: &SourceName, stats: Option<PriceStats>);

    /// Usable listings behind the stats just published, 0 when absent.
    fn record_listings(&self, _source: &SourceName, _count: usize) {}

    fn record_fetch_failure(&self, _source: &SourceName) {}

    fn record_cycle(&self, _duration_secs: f64) {}
}
