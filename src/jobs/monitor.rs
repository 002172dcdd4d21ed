use std::any::Any;
use std::panic::AssertUnwindSafe;

use chrono::Utc;
use futures::FutureExt;
use tokio::time::{Duration, sleep};

use crate::monitor::{MonitorService, StatusSource};
use crate::notifier::Publisher;

/// Runs ticks back to back, sleeping `monitor_interval` seconds between them.
/// Never returns.
pub async fn run_monitor_job<S: StatusSource, P: Publisher>(
    mut service: MonitorService<S, P>,
    monitor_interval: u64,
) {
    let mut previous_tick = None;

    loop {
        let now = Utc::now();

        if let Some(previous) = previous_tick {
            let elapsed_secs = now.signed_duration_since(previous).num_seconds().max(0);
            let threshold_secs = monitor_interval.saturating_mul(2).min(i64::MAX as u64) as i64;
            if elapsed_secs > threshold_secs {
                log::warn!(
                    "monitor_loop_delayed elapsed_secs={} threshold_secs={}",
                    elapsed_secs,
                    threshold_secs
                );
            }
        }

        previous_tick = Some(now);

        match AssertUnwindSafe(service.tick(now)).catch_unwind().await {
            Ok(report) => {
                tracing::info!(
                    target: "monitor",
                    module = "monitor",
                    status = report.status.as_str(),
                    transition = report.transition.as_str(),
                    state = service.state().alarm().as_str(),
                    notified = ?report.notified,
                    commemoration = ?report.commemoration,
                    last_commemoration = ?service.state().last_commemoration(),
                    "monitor_tick"
                );
            }
            Err(payload) => {
                log::error!(
                    "monitor_tick_panicked error={} state={}",
                    panic_message(payload.as_ref()),
                    service.state().alarm().as_str()
                );
            }
        }

        sleep(Duration::from_secs(monitor_interval)).await;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
