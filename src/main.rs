use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use tracing::{error, info};
use ticketwatch::api::rest::{create_router, ApiState};
use ticketwatch::config::loader::AppConfig;
use ticketwatch::observability::metrics::PriceMetrics;
use ticketwatch::observability::tracing::init_tracing;
use ticketwatch::poller::TicketPoller;
use ticketwatch::poller::ticker::PollTicker;
use ticketwatch::price_infra::connectors::build_sources;
use ticketwatch::utils::task_supervisor::TaskSupervisor;

const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

    let raw = AppConfig::load(&env).context("loading configuration")?;
    init_tracing(raw.server.json_logs);

    // Refuse to start polling with an unusable event identity
    let config = raw.validate().context("invalid configuration")?;
    info!(
        "Tracking {} from {:?} (poll every {:?})",
        config.event,
        config.sources.source_names().iter().map(|n| n.as_str()).collect::<Vec<_>>(),
        config.poll_interval
    );

    let metrics = Arc::new(PriceMetrics::new(&config.event)?);
    let sources = build_sources(&config)?;
    let poller = Arc::new(TicketPoller::from_config(&config, sources, metrics.clone()));

    let ticker = PollTicker::new(poller.clone(), config.poll_interval);
    let router = create_router(Arc::new(ApiState { poller, metrics }));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Server is running on http://{}", config.bind_addr);

    let mut supervisor = TaskSupervisor::new();
    supervisor
        .spawn("poll_ticker", async move { ticker.run().await })
        .spawn("http_server", async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("HTTP server stopped: {}", e);
            }
        });

    let mut health = tokio::time::interval(HEALTH_CHECK_INTERVAL);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
            _ = health.tick() => {
                if let Err(e) = supervisor.check_health() {
                    supervisor.shutdown_all().await;
                    return Err(e.into());
                }
            }
        }
    }

    supervisor.shutdown_all().await;
    Ok(())
}
