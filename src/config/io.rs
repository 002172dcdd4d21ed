use std::path::Path;

use super::{schema::Config, validate::ConfigError};

pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
pub const CHANNEL_ENV: &str = "CHANNEL_DESTINATION";
pub const API_KEY_ENV: &str = "UKRAINE_ALARM_API_KEY";

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            log::info!("config_file_missing path={} using=defaults_and_env", path_str);
            String::new()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path_str,
                source,
            });
        }
    };
    let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path_str,
        source,
    })?;
    let config = apply_overrides(config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Replaces secrets with values from `lookup` when it yields a non-empty value.
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(token) = non_empty(BOT_TOKEN_ENV) {
        config.bot_token = token;
    }
    if let Some(channel) = non_empty(CHANNEL_ENV) {
        config.channel = channel;
    }
    if let Some(api_key) = non_empty(API_KEY_ENV) {
        config.source.api_key = api_key;
    }

    config
}
