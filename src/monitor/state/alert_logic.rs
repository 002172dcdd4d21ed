use super::{AlarmState, AlarmStatus, MonitorState};

/// Effect of a single probe on the committed alarm state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// First defined probe after start. Never announced.
    Initialized(AlarmState),
    Raised,
    Cleared,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Unchanged => "unchanged",
            Transition::Initialized(_) => "initialized",
            Transition::Raised => "raised",
            Transition::Cleared => "cleared",
        }
    }
}

impl MonitorState {
    pub(crate) fn apply_probe(&mut self, status: AlarmStatus) -> Transition {
        let (next, transition) = next_state(self.alarm, status);
        self.alarm = next;
        transition
    }
}

fn next_state(current: AlarmState, status: AlarmStatus) -> (AlarmState, Transition) {
    match (current, status) {
        (current, AlarmStatus::Unknown) => (current, Transition::Unchanged),
        (AlarmState::Uninitialized, AlarmStatus::Active) => (
            AlarmState::Alarmed,
            Transition::Initialized(AlarmState::Alarmed),
        ),
        (AlarmState::Uninitialized, AlarmStatus::Inactive) => (
            AlarmState::Clear,
            Transition::Initialized(AlarmState::Clear),
        ),
        (AlarmState::Clear, AlarmStatus::Active) => (AlarmState::Alarmed, Transition::Raised),
        (AlarmState::Alarmed, AlarmStatus::Inactive) => (AlarmState::Clear, Transition::Cleared),
        (current, _) => (current, Transition::Unchanged),
    }
}
