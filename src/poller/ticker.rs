use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use crate::poller::TicketPoller;

/// Recurring timer driving `TicketPoller::run_cycle`.
///
/// The first tick fires immediately, so the service polls once on startup
/// before settling into the configured period.
pub struct PollTicker {
    poller: Arc<TicketPoller>,
    interval: Duration,
}

impl PollTicker {
    pub fn new(poller: Arc<TicketPoller>, interval: Duration) -> Self {
        PollTicker { poller, interval }
    }

    pub async fn run(&self) {
        self.run_cycles(None).await;
    }

    /// Run `max_cycles` ticks (or forever) and return how many completed.
    pub async fn run_cycles(&self, max_cycles: Option<usize>) -> usize {
        let mut ticker = interval(self.interval);
        // A cycle that overruns the period should not trigger a burst afterwards
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            "Poll ticker started for {} every {:?}",
            self.poller.event(),
            self.interval
        );

        let mut completed = 0;
        while max_cycles.map_or(true, |max| completed < max) {
            ticker.tick().await;
            self.poller.run_cycle().await;
            completed += 1;
        }

        completed
    }
}
