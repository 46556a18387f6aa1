use std::net::SocketAddr;
use std::time::Duration;
use crate::config::event::EventIdentity;
use crate::config::generator::GenerationParameters;
use crate::config::schedule::parse_schedule;
use crate::config::sources::SourcesConfig;
use crate::config::{PollConfig, ServerConfig, TrackerConfig};
use crate::error::{Error, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "TICKETWATCH";

/// Raw configuration as layered from files and the environment.
/// Nothing here is trusted until `validate` has run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artist: String,
    pub venue: String,
    pub date: String,
    pub poll: PollConfig,
    pub server: ServerConfig,
    pub sources: SourcesConfig,
    pub generator: GenerationParameters,
    pub spread_seed: Option<u64>,
}

impl AppConfig {
    /// `config/default.toml`, then `config/{env}.toml`, then `TICKETWATCH_*`
    /// variables (`__` separates nested keys, e.g. `TICKETWATCH_POLL__SCHEDULE`).
    pub fn load(env: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        Self::build(Self::with_env(builder))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn with_env(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<TrackerConfig> {
        let event = EventIdentity::new(&self.artist, &self.venue, &self.date)?;
        let poll_interval = parse_schedule(&self.poll.schedule)?;

        if self.poll.fetch_timeout_secs == 0 {
            return Err(Error::ConfigError("poll.fetch_timeout_secs must be positive".to_string()));
        }

        let bind_addr: SocketAddr = self.server.bind_addr.parse()
            .map_err(|e| Error::ConfigError(format!("invalid bind address {:?}: {}", self.server.bind_addr, e)))?;

        Ok(TrackerConfig {
            event,
            poll_interval,
            fetch_timeout: Duration::from_secs(self.poll.fetch_timeout_secs),
            bind_addr,
            json_logs: self.server.json_logs,
            sources: self.sources.plan()?,
            generator: self.generator.sanitized(),
            spread_seed: self.spread_seed,
        })
    }
}
