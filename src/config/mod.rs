mod settings;

use config::{Config, Environment, File};

pub use settings::{
    BrokerSettings, LoggingSettings, PartialBrokerSettings, PartialLoggingSettings,
    PartialSettings, Settings,
};

use crate::utils::error::Result;

/// Default configuration file, looked up relative to the working directory
/// with any extension the `config` crate understands.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Prefix for environment overrides, e.g. `POPBUS_BROKER__CHANNEL_CAPACITY=32`.
pub const ENV_PREFIX: &str = "POPBUS";

/// Loads the configuration from the default file and environment variables.
pub fn load_config() -> Result<Settings> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Loads the configuration from `name` (optional) and environment variables,
/// merges it over the defaults and validates the result.
pub fn load_config_from(name: &str) -> Result<Settings> {
    let builder = Config::builder()
        .add_source(File::with_name(name).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    let settings = Settings::merged(partial);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests;
