use serde::Deserialize;

use crate::utils::error::{Error, Result};
use crate::utils::logging;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the broker.
///
/// `channel_capacity` sizes the bounded subscriber channels the binary creates.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BrokerSettings {
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Default, Deserialize)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub channel_capacity: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings {
                channel_capacity: 16,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Overlays whatever `partial` provides on top of the defaults.
    pub fn merged(partial: PartialSettings) -> Self {
        let default = Self::default();
        Self {
            broker: BrokerSettings {
                channel_capacity: partial
                    .broker
                    .and_then(|b| b.channel_capacity)
                    .unwrap_or(default.broker.channel_capacity),
            },
            logging: LoggingSettings {
                level: partial
                    .logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.broker.channel_capacity == 0 {
            return Err(Error::InvalidSetting {
                key: "broker.channel_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if logging::parse_level(&self.logging.level).is_none() {
            return Err(Error::InvalidSetting {
                key: "logging.level",
                reason: format!("unknown level `{}`", self.logging.level),
            });
        }
        Ok(())
    }
}
