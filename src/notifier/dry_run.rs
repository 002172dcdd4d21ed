use crate::monitor::NotificationIntent;

use super::{Delivery, PublishError, Publisher};

/// Logs intents instead of sending them. Used with `dry_run = true`.
pub struct DryRunPublisher;

impl Publisher for DryRunPublisher {
    async fn publish(&self, intent: &NotificationIntent) -> Result<Delivery, PublishError> {
        log::info!(
            "dry_run_publish kind={} image={} caption={:?}",
            intent.kind.as_str(),
            intent.image.display(),
            intent.caption
        );
        Ok(Delivery::Logged)
    }
}
