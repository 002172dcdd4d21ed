use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::MonitorState;

/// Once-per-day posting window in the monitored timezone.
#[derive(Debug, Clone, Copy)]
pub struct DailySchedule {
    timezone: Tz,
    at: NaiveTime,
    window: Duration,
}

impl DailySchedule {
    pub fn new(timezone: Tz, at: NaiveTime, window: Duration) -> Self {
        Self {
            timezone,
            at,
            window,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the local date to post for when `now` falls inside that date's
    /// window `[at, at + window)` and nothing was posted for it yet. A window
    /// running past midnight still belongs to the date it opened on.
    pub fn due_date(&self, now: DateTime<Utc>, last_posted: Option<NaiveDate>) -> Option<NaiveDate> {
        let local_now = now.with_timezone(&self.timezone);
        let today = local_now.date_naive();

        let date = [Some(today), today.pred_opt()]
            .into_iter()
            .flatten()
            .find(|date| self.window_contains(*date, &local_now))?;

        (last_posted != Some(date)).then_some(date)
    }

    fn window_contains(&self, date: NaiveDate, local_now: &DateTime<Tz>) -> bool {
        // Wall times skipped by a DST jump have no instant; that day is skipped.
        let Some(window_start) = self
            .timezone
            .from_local_datetime(&date.and_time(self.at))
            .earliest()
        else {
            return false;
        };
        let window_end = window_start + self.window;

        window_start <= *local_now && *local_now < window_end
    }
}

impl MonitorState {
    pub(crate) fn commemoration_due(
        &self,
        schedule: &DailySchedule,
        now: DateTime<Utc>,
    ) -> Option<NaiveDate> {
        schedule.due_date(now, self.last_commemoration)
    }
}
