mod dry_run;
mod error;
mod telegram;

use crate::monitor::NotificationIntent;

pub use dry_run::DryRunPublisher;
pub use error::PublishError;
pub use telegram::TelegramPublisher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Photo,
    /// Image asset was unavailable; the caption went out as plain text.
    TextFallback,
    Logged,
}

impl Delivery {
    pub fn as_str(self) -> &'static str {
        match self {
            Delivery::Photo => "photo",
            Delivery::TextFallback => "text_fallback",
            Delivery::Logged => "logged",
        }
    }
}

/// At-most-once delivery of a notification to the channel. No retries.
pub trait Publisher {
    async fn publish(&self, intent: &NotificationIntent) -> Result<Delivery, PublishError>;
}

pub enum ActivePublisher {
    Telegram(TelegramPublisher),
    DryRun(DryRunPublisher),
}

impl Publisher for ActivePublisher {
    async fn publish(&self, intent: &NotificationIntent) -> Result<Delivery, PublishError> {
        match self {
            ActivePublisher::Telegram(publisher) => publisher.publish(intent).await,
            ActivePublisher::DryRun(publisher) => publisher.publish(intent).await,
        }
    }
}

pub(crate) fn log_publish_failure(intent: &NotificationIntent, error: &PublishError) {
    if error.is_permission_denied() {
        log::error!(
            "CRITICAL: bot cannot post to the channel, grant it admin rights manually kind={} error={}",
            intent.kind.as_str(),
            error
        );
    } else {
        log::error!(
            "notification_send_failed kind={} error={} retry=none",
            intent.kind.as_str(),
            error
        );
    }
}
