use crate::monitor::state::AlarmStatus;

use super::StatusSource;

const CYCLE_TICKS: u64 = 30;
const ALARM_TICKS: u64 = 10;
const UNKNOWN_EVERY: u64 = 7;

/// Synthetic feed for dry runs: a 10-tick alarm every 30 ticks with
/// periodic indeterminate probes mixed in.
pub struct SimulatedStatusSource {
    tick: u64,
}

impl SimulatedStatusSource {
    pub fn new() -> Self {
        Self { tick: 0 }
    }
}

impl StatusSource for SimulatedStatusSource {
    async fn probe(&mut self) -> AlarmStatus {
        self.tick = self.tick.saturating_add(1);

        if self.tick.is_multiple_of(UNKNOWN_EVERY) {
            return AlarmStatus::Unknown;
        }

        if self.tick % CYCLE_TICKS >= CYCLE_TICKS - ALARM_TICKS {
            AlarmStatus::Active
        } else {
            AlarmStatus::Inactive
        }
    }
}
