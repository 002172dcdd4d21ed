use chrono::Duration;
use teloxide::Bot;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::monitor::{
    ActiveStatusSource, DailySchedule, IntentTemplates, MonitorService, ProbeError,
};
use crate::notifier::{ActivePublisher, DryRunPublisher, TelegramPublisher};

pub type AppService = MonitorService<ActiveStatusSource, ActivePublisher>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("status source setup failed: {0}")]
    Source(#[from] ProbeError),
}

pub fn build_monitor_service(config: &Config) -> Result<AppService, StartupError> {
    let source = ActiveStatusSource::from_config(&config.source)?;

    let publisher = if config.dry_run {
        log::warn!("dry_run_enabled notifications=log_only");
        ActivePublisher::DryRun(DryRunPublisher)
    } else {
        ActivePublisher::Telegram(TelegramPublisher::new(
            Bot::new(&config.bot_token),
            config.channel_recipient()?,
        ))
    };

    let schedule = if config.commemoration.enabled {
        Some(DailySchedule::new(
            config.commemoration_timezone()?,
            config.commemoration_time()?,
            Duration::seconds(config.commemoration.window_secs as i64),
        ))
    } else {
        log::info!("commemoration_disabled");
        None
    };

    Ok(MonitorService::new(
        source,
        publisher,
        IntentTemplates::from_config(config),
        schedule,
    ))
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, SourceKind};
    use crate::monitor::AlarmState;

    use super::{StartupError, build_monitor_service};

    fn config() -> Config {
        let mut config: Config = toml::from_str("").expect("defaults parse");
        config.bot_token = "42:token".to_string();
        config.channel = "@air_alerts".to_string();
        config.dry_run = true;
        config.source.kind = SourceKind::Simulated;
        config
    }

    #[tokio::test]
    async fn dry_run_service_starts_uninitialized() {
        let mut service = build_monitor_service(&config()).expect("service should build");
        assert_eq!(service.state().alarm(), AlarmState::Uninitialized);

        let report = service.tick(chrono::Utc::now()).await;
        assert_ne!(service.state().alarm(), AlarmState::Uninitialized);
        assert_eq!(report.notified, None);
    }

    #[test]
    fn bad_timezone_fails_startup() {
        let mut config = config();
        config.commemoration.timezone = "Nowhere/Land".to_string();
        assert!(matches!(
            build_monitor_service(&config),
            Err(StartupError::Config(_))
        ));
    }

    #[test]
    fn html_source_with_broken_pattern_fails_startup() {
        let mut config = config();
        config.source.kind = SourceKind::HtmlPage;
        config.source.active_pattern = Some("(".to_string());
        config.source.inactive_pattern = Some("calm".to_string());
        assert!(matches!(
            build_monitor_service(&config),
            Err(StartupError::Source(_))
        ));
    }
}
