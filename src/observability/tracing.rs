use tracing::Span;
use tracing_subscriber::EnvFilter;
use crate::config::event::EventIdentity;
use crate::types::ids::CycleId;

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // A second init (tests, embedding) is harmless
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

pub fn trace_poll_cycle(cycle_id: &CycleId, event: &EventIdentity) -> Span {
    tracing::info_span!(
        "poll_cycle",
        cycle_id = %cycle_id,
        artist = %event.artist,
        venue = %event.venue,
        date = %event.date_string(),
    )
}
