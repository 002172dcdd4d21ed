use chrono::{DateTime, Utc};

use crate::notifier::{Publisher, log_publish_failure};

use super::super::{
    intent::{IntentTemplates, NotificationIntent},
    provider::StatusSource,
    state::{AlarmStatus, DailySchedule, MonitorState, Transition},
};

/// What one tick observed and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// `Some(delivered)` when the daily post was attempted.
    pub commemoration: Option<bool>,
    pub status: AlarmStatus,
    pub transition: Transition,
    /// `Some(delivered)` when an alarm change was announced.
    pub notified: Option<bool>,
}

/// Owns the monitor state and drives one sequential tick at a time.
pub struct MonitorService<S, P> {
    source: S,
    pub(super) publisher: P,
    templates: IntentTemplates,
    schedule: Option<DailySchedule>,
    state: MonitorState,
}

impl<S: StatusSource, P: Publisher> MonitorService<S, P> {
    pub fn new(
        source: S,
        publisher: P,
        templates: IntentTemplates,
        schedule: Option<DailySchedule>,
    ) -> Self {
        Self {
            source,
            publisher,
            templates,
            schedule,
            state: MonitorState::default(),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub async fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let commemoration = self.run_commemoration(now).await;

        let status = self.source.probe().await;
        let previous = self.state.alarm();
        let transition = self.state.apply_probe(status);

        match transition {
            Transition::Unchanged => {}
            Transition::Initialized(state) => {
                log::warn!("alarm_state_initialized state={} notify=false", state.as_str());
            }
            Transition::Raised | Transition::Cleared => {
                log::warn!(
                    "alarm_state_changed from={} to={}",
                    previous.as_str(),
                    self.state.alarm().as_str()
                );
            }
        }

        // State is already committed; delivery failures do not roll it back.
        let notified = match self.templates.for_transition(transition) {
            Some(intent) => Some(self.deliver(&intent).await),
            None => None,
        };

        TickReport {
            commemoration,
            status,
            transition,
            notified,
        }
    }

    async fn run_commemoration(&mut self, now: DateTime<Utc>) -> Option<bool> {
        let schedule = self.schedule?;
        let date = self.state.commemoration_due(&schedule, now)?;

        log::warn!(
            "commemoration_due date={} local_time={}",
            date,
            now.with_timezone(&schedule.timezone()).format("%H:%M:%S")
        );

        let intent = self.templates.commemoration();
        let delivered = self.deliver(&intent).await;
        if delivered {
            self.state.mark_commemoration_posted(date);
        }

        Some(delivered)
    }

    async fn deliver(&self, intent: &NotificationIntent) -> bool {
        match self.publisher.publish(intent).await {
            Ok(delivery) => {
                log::info!(
                    "notification_sent kind={} delivery={}",
                    intent.kind.as_str(),
                    delivery.as_str()
                );
                true
            }
            Err(error) => {
                log_publish_failure(intent, &error);
                false
            }
        }
    }
}
