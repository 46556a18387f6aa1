use std::net::SocketAddr;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub mod event;
pub mod generator;
pub mod loader;
pub mod schedule;
pub mod sources;

use crate::config::event::EventIdentity;
use crate::config::generator::GenerationParameters;
use crate::config::sources::SourcePlan;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// `<n>s`, `<n>m` or `<n>h`
    pub schedule: String,
    pub fetch_timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            schedule: "15m".to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0:8080".to_string(),
            json_logs: false,
        }
    }
}

/// Validated, immutable runtime configuration. Built once at startup by
/// `AppConfig::validate` and handed to every component explicitly.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub event: EventIdentity,
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub json_logs: bool,
    pub sources: SourcePlan,
    pub generator: GenerationParameters,
    pub spread_seed: Option<u64>,
}
