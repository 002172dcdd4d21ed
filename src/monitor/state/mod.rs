use chrono::NaiveDate;

mod alert_logic;
mod daily_trigger;

pub use alert_logic::Transition;
pub use daily_trigger::DailySchedule;

/// Normalized outcome of one upstream probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    Active,
    Inactive,
    Unknown,
}

impl AlarmStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmStatus::Active => "active",
            AlarmStatus::Inactive => "inactive",
            AlarmStatus::Unknown => "unknown",
        }
    }
}

/// Last committed alarm status of the monitored area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    #[default]
    Uninitialized,
    Clear,
    Alarmed,
}

impl AlarmState {
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmState::Uninitialized => "uninitialized",
            AlarmState::Clear => "clear",
            AlarmState::Alarmed => "alarmed",
        }
    }
}

/// Process-lifetime state. Owned by the tick loop and reset on restart.
#[derive(Debug, Default)]
pub struct MonitorState {
    pub(crate) alarm: AlarmState,
    pub(crate) last_commemoration: Option<NaiveDate>,
}

impl MonitorState {
    pub fn alarm(&self) -> AlarmState {
        self.alarm
    }

    pub fn last_commemoration(&self) -> Option<NaiveDate> {
        self.last_commemoration
    }

    /// Advances the debounce date. Never moves it backwards.
    pub(crate) fn mark_commemoration_posted(&mut self, date: NaiveDate) {
        if self.last_commemoration.is_none_or(|last| date > last) {
            self.last_commemoration = Some(date);
        }
    }
}
