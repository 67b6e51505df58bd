//! Environment-driven server configuration.

use std::net::{AddrParseError, SocketAddr};

use shop_observability::{LogFormat, ParseLogFormatError};
use thiserror::Error;

pub const LISTEN_ADDR_VAR: &str = "SHOP_LISTEN_ADDR";
pub const LOG_FORMAT_VAR: &str = "SHOP_LOG_FORMAT";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SHOP_LISTEN_ADDR {value:?}: {source}")]
    ListenAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid SHOP_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::ListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            listen_addr,
            log_format,
        })
    }
}
