use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval: u64,
    #[serde(default = "default_area_name")]
    pub area_name: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub commemoration: Commemoration,
    #[serde(default)]
    pub assets: Assets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    UkraineAlarm,
    AlertsStates,
    HtmlPage,
    Simulated,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::UkraineAlarm => "ukraine_alarm",
            SourceKind::AlertsStates => "alerts_states",
            SourceKind::HtmlPage => "html_page",
            SourceKind::Simulated => "simulated",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_region_id")]
    pub region_id: String,
    #[serde(default = "default_region_name")]
    pub region_name: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub active_pattern: Option<String>,
    #[serde(default)]
    pub inactive_pattern: Option<String>,
    #[serde(default)]
    pub backoff: Backoff,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Backoff {
    #[serde(default = "default_backoff_grace_failures")]
    pub grace_failures: u32,
    #[serde(default = "default_backoff_initial_secs")]
    pub initial_secs: u64,
    #[serde(default = "default_backoff_max_secs")]
    pub max_secs: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub multiplier: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commemoration {
    #[serde(default = "default_commemoration_enabled")]
    pub enabled: bool,
    #[serde(default = "default_commemoration_timezone")]
    pub timezone: String,
    #[serde(default = "default_commemoration_hour")]
    pub hour: u8,
    #[serde(default = "default_commemoration_minute")]
    pub minute: u8,
    #[serde(default = "default_commemoration_window_secs")]
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assets {
    #[serde(default = "default_alarm_image")]
    pub alarm_image: String,
    #[serde(default = "default_all_clear_image")]
    pub all_clear_image: String,
    #[serde(default = "default_commemoration_image")]
    pub commemoration_image: String,
}
