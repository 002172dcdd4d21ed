use super::schema::{Assets, Backoff, Commemoration, SourceConfig, SourceKind};

pub(super) fn default_monitor_interval() -> u64 {
    60
}

pub(super) fn default_area_name() -> String {
    "Броварський район (Київська область)".to_string()
}

pub(super) fn default_source_kind() -> SourceKind {
    SourceKind::UkraineAlarm
}

pub(super) fn default_source_url() -> String {
    "https://api.ukrainealarm.com/api/v3/alerts/status".to_string()
}

pub(super) fn default_region_id() -> String {
    "11".to_string()
}

pub(super) fn default_region_name() -> String {
    "Київська область".to_string()
}

pub(super) fn default_request_timeout_secs() -> u64 {
    10
}

pub(super) fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

pub(super) fn default_backoff_grace_failures() -> u32 {
    3
}

pub(super) fn default_backoff_initial_secs() -> u64 {
    60
}

pub(super) fn default_backoff_max_secs() -> u64 {
    300
}

pub(super) fn default_backoff_multiplier() -> u32 {
    2
}

pub(super) fn default_commemoration_enabled() -> bool {
    true
}

pub(super) fn default_commemoration_timezone() -> String {
    "Europe/Kyiv".to_string()
}

pub(super) fn default_commemoration_hour() -> u8 {
    9
}

pub(super) fn default_commemoration_minute() -> u8 {
    0
}

pub(super) fn default_commemoration_window_secs() -> u64 {
    300
}

pub(super) fn default_alarm_image() -> String {
    "assets/air_alert.png".to_string()
}

pub(super) fn default_all_clear_image() -> String {
    "assets/all_clear.png".to_string()
}

pub(super) fn default_commemoration_image() -> String {
    "assets/commemoration.png".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            url: default_source_url(),
            api_key: String::new(),
            region_id: default_region_id(),
            region_name: default_region_name(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            active_pattern: None,
            inactive_pattern: None,
            backoff: Backoff::default(),
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            grace_failures: default_backoff_grace_failures(),
            initial_secs: default_backoff_initial_secs(),
            max_secs: default_backoff_max_secs(),
            multiplier: default_backoff_multiplier(),
        }
    }
}

impl Default for Commemoration {
    fn default() -> Self {
        Self {
            enabled: default_commemoration_enabled(),
            timezone: default_commemoration_timezone(),
            hour: default_commemoration_hour(),
            minute: default_commemoration_minute(),
            window_secs: default_commemoration_window_secs(),
        }
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            alarm_image: default_alarm_image(),
            all_clear_image: default_all_clear_image(),
            commemoration_image: default_commemoration_image(),
        }
    }
}
