use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::types::source::SourceName;

pub const TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TicketmasterConfig {
    #[serde(default = "default_ticketmaster_name")]
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default = "default_ticketmaster_base_url")]
    pub base_url: String,
}

fn default_ticketmaster_name() -> String {
    "TicketmasterAPI".to_string()
}

fn default_ticketmaster_base_url() -> String {
    TICKETMASTER_BASE_URL.to_string()
}

/// A listing page scraped for visible prices (StubHub, VividSeats, ...).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PageSourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub dummy_mode: bool,
    pub ticketmaster: Option<TicketmasterConfig>,
    pub pages: Vec<PageSourceConfig>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TicketmasterPlan {
    pub name: SourceName,
    pub api_key: String,
    pub event_id: Option<String>,
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    pub name: SourceName,
    pub url: reqwest::Url,
}

/// How raw prices are obtained, decided once at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum SourcePlan {
    Synthetic,
    Live {
        ticketmaster: Option<TicketmasterPlan>,
        pages: Vec<PagePlan>,
    },
}

impl SourcePlan {
    /// Declared source names, in polling order.
    pub fn source_names(&self) -> Vec<SourceName> {
        match self {
            SourcePlan::Synthetic => vec![synthetic_source_name()],
            SourcePlan::Live { ticketmaster, pages } => ticketmaster.iter()
                .map(|tm| tm.name.clone())
                .chain(pages.iter().map(|p| p.name.clone()))
                .collect(),
        }
    }
}

pub fn synthetic_source_name() -> SourceName {
    SourceName::new("Synthetic").expect("static source name is valid")
}

/// Live source names, which may not shadow the synthetic stand-in.
fn source_name(raw: &str) -> Result<SourceName> {
    let name = SourceName::new(raw)
        .map_err(|e| Error::ConfigError(format!("source name {:?}: {}", raw, e)))?;
    if name == synthetic_source_name() {
        return Err(Error::ConfigError(format!("source name {:?} is reserved for synthetic prices", raw)));
    }
    Ok(name)
}

impl SourcesConfig {
    pub fn plan(&self) -> Result<SourcePlan> {
        if self.dummy_mode {
            return Ok(SourcePlan::Synthetic);
        }

        let mut seen = HashSet::new();

        let ticketmaster = match &self.ticketmaster {
            Some(tm) if tm.api_key.trim().is_empty() => {
                tracing::warn!("No Ticketmaster API key configured, skipping {}", tm.name);
                None
            }
            Some(tm) => {
                let name = source_name(&tm.name)?;
                seen.insert(name.clone());
                Some(TicketmasterPlan {
                    name,
                    api_key: tm.api_key.trim().to_string(),
                    event_id: tm.event_id.as_ref()
                        .map(|id| id.trim().to_string())
                        .filter(|id| !id.is_empty()),
                    base_url: tm.base_url.trim_end_matches('/').to_string(),
                })
            }
            None => None,
        };

        let mut pages = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let name = source_name(&page.name)?;
            if !seen.insert(name.clone()) {
                return Err(Error::ConfigError(format!("source {} configured more than once", name)));
            }
            let url = reqwest::Url::parse(page.url.trim())
                .map_err(|e| Error::ConfigError(format!("source {} has invalid url {:?}: {}", name, page.url, e)))?;
            pages.push(PagePlan { name, url });
        }

        if ticketmaster.is_none() && pages.is_empty() {
            tracing::info!("No live price source configured, using synthetic prices");
            return Ok(SourcePlan::Synthetic);
        }

        Ok(SourcePlan::Live { ticketmaster, pages })
    }
}
