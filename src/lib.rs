pub mod api;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod observability;
pub mod poller;
pub mod price_infra;
pub mod types;
pub mod utils;

pub use crate::error::{Error, Result};
