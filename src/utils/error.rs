//! The `error` module defines the error types used within `popbus`.
//!
//! Broker operations never fail; only the configuration layer produces
//! errors, and they surface here.

use config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
