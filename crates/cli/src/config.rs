//! Runtime configuration, read once from the environment.
//!
//! - `RUST_LOG`: tracing filter directive (default `warn`)
//! - `BESTBUY_LOG_FORMAT`: `text` (default) or `json`

use bestbuy_observability::{LogConfig, LogFormat};

pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const LOG_FORMAT_VAR: &str = "BESTBUY_LOG_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub log: LogConfig,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut log = LogConfig::default();

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            log.filter = filter;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match LogFormat::parse(&raw) {
                Some(format) => log.format = format,
                None => eprintln!("warning: unknown {LOG_FORMAT_VAR}={raw:?}, using text"),
            }
        }

        Self { log }
    }
}
