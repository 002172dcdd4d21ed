use chrono::NaiveTime;
use chrono_tz::Tz;
use regex::Regex;
use teloxide::types::{ChatId, Recipient};
use thiserror::Error;

use super::schema::{Config, SourceKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bot_token must not be empty (set it in the config file or BOT_TOKEN)".to_string(),
            ));
        }
        self.channel_recipient()?;
        if self.monitor_interval == 0 {
            return Err(ConfigError::Validation(
                "monitor_interval must be greater than 0".to_string(),
            ));
        }
        if self.area_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "area_name must not be empty".to_string(),
            ));
        }

        self.validate_source()?;

        let backoff = &self.source.backoff;
        if backoff.multiplier == 0 {
            return Err(ConfigError::Validation(
                "source.backoff.multiplier must be at least 1".to_string(),
            ));
        }
        if backoff.max_secs < backoff.initial_secs {
            return Err(ConfigError::Validation(
                "source.backoff.max_secs must not be lower than source.backoff.initial_secs"
                    .to_string(),
            ));
        }

        self.commemoration_timezone()?;
        self.commemoration_time()?;
        let min_window = self.monitor_interval.saturating_mul(2);
        if self.commemoration.window_secs < min_window {
            return Err(ConfigError::Validation(format!(
                "commemoration.window_secs must be at least twice monitor_interval ({} < {})",
                self.commemoration.window_secs, min_window
            )));
        }
        if self.commemoration.window_secs >= 24 * 3600 {
            return Err(ConfigError::Validation(
                "commemoration.window_secs must be shorter than one day".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_source(&self) -> Result<(), ConfigError> {
        let source = &self.source;
        if source.kind == SourceKind::Simulated {
            return Ok(());
        }

        if source.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source.url must not be empty when source.kind is {}",
                source.kind.as_str()
            )));
        }
        if source.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "source.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        match source.kind {
            SourceKind::UkraineAlarm => {
                if source.api_key.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "source.api_key must not be empty for ukraine_alarm (set it in the config file or UKRAINE_ALARM_API_KEY)"
                            .to_string(),
                    ));
                }
                if source.region_id.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "source.region_id must not be empty for ukraine_alarm".to_string(),
                    ));
                }
            }
            SourceKind::AlertsStates => {
                if source.region_name.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "source.region_name must not be empty for alerts_states".to_string(),
                    ));
                }
            }
            SourceKind::HtmlPage => {
                validate_pattern("source.active_pattern", source.active_pattern.as_deref())?;
                validate_pattern("source.inactive_pattern", source.inactive_pattern.as_deref())?;
            }
            SourceKind::Simulated => {}
        }

        Ok(())
    }

    pub fn channel_recipient(&self) -> Result<Recipient, ConfigError> {
        let channel = self.channel.trim();
        if channel.is_empty() {
            return Err(ConfigError::Validation(
                "channel must not be empty (set it in the config file or CHANNEL_DESTINATION)"
                    .to_string(),
            ));
        }

        if let Ok(id) = channel.parse::<i64>() {
            return Ok(Recipient::Id(ChatId(id)));
        }

        if channel.starts_with('@') && channel.len() > 1 {
            return Ok(Recipient::ChannelUsername(channel.to_string()));
        }

        Err(ConfigError::Validation(format!(
            "channel must be a numeric chat id or an @username, got {}",
            channel
        )))
    }

    pub fn commemoration_timezone(&self) -> Result<Tz, ConfigError> {
        self.commemoration.timezone.parse::<Tz>().map_err(|_| {
            ConfigError::Validation(format!(
                "commemoration.timezone is not a known IANA timezone: {}",
                self.commemoration.timezone
            ))
        })
    }

    pub fn commemoration_time(&self) -> Result<NaiveTime, ConfigError> {
        if self.commemoration.hour > 23 {
            return Err(ConfigError::Validation(
                "commemoration.hour must be between 0 and 23".to_string(),
            ));
        }
        if self.commemoration.minute > 59 {
            return Err(ConfigError::Validation(
                "commemoration.minute must be between 0 and 59".to_string(),
            ));
        }

        NaiveTime::from_hms_opt(
            self.commemoration.hour as u32,
            self.commemoration.minute as u32,
            0,
        )
        .ok_or_else(|| ConfigError::Validation("commemoration time is invalid".to_string()))
    }
}

fn validate_pattern(field: &str, pattern: Option<&str>) -> Result<(), ConfigError> {
    let Some(pattern) = pattern.filter(|value| !value.trim().is_empty()) else {
        return Err(ConfigError::Validation(format!(
            "{} must be set when source.kind is html_page",
            field
        )));
    };

    Regex::new(pattern)
        .map(|_| ())
        .map_err(|error| ConfigError::Validation(format!("{} is not a valid regex: {}", field, error)))
}
