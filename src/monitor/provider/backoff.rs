use std::time::{Duration, Instant};

use exponential_backoff::Backoff as Exponential;

use crate::config::Backoff;

/// Exponential delay applied once the grace budget of failures is spent.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    grace_failures: u32,
    max: Duration,
    backoff: Exponential,
}

impl BackoffPolicy {
    pub fn new(grace_failures: u32, initial: Duration, max: Duration, multiplier: u32) -> Self {
        let mut backoff = Exponential::new(u32::MAX, initial, Some(max));
        backoff.set_factor(multiplier.max(1));

        Self {
            grace_failures,
            max,
            backoff,
        }
    }

    pub fn from_config(config: &Backoff) -> Self {
        Self::new(
            config.grace_failures,
            Duration::from_secs(config.initial_secs),
            Duration::from_secs(config.max_secs),
            config.multiplier,
        )
    }

    pub fn delay_after(&self, consecutive_failures: u32) -> Duration {
        if consecutive_failures <= self.grace_failures {
            return Duration::ZERO;
        }

        let attempt = consecutive_failures - self.grace_failures - 1;
        self.backoff
            .next(attempt)
            .map_or(self.max, |delay| delay.min(self.max))
    }
}

#[derive(Debug)]
pub struct ProbeBackoff {
    policy: BackoffPolicy,
    consecutive_failures: u32,
    retry_at: Option<Instant>,
}

impl ProbeBackoff {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            policy,
            consecutive_failures: 0,
            retry_at: None,
        }
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.retry_at.is_none_or(|at| now >= at)
    }

    pub fn retry_in(&self, now: Instant) -> Duration {
        self.retry_at
            .map_or(Duration::ZERO, |at| at.saturating_duration_since(now))
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Resets the failure streak and returns its length.
    pub fn record_success(&mut self) -> u32 {
        let streak = self.consecutive_failures;
        self.consecutive_failures = 0;
        self.retry_at = None;
        streak
    }

    pub fn record_failure(&mut self, now: Instant) -> Duration {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let delay = self.policy.delay_after(self.consecutive_failures);
        self.retry_at = if delay.is_zero() {
            None
        } else {
            now.checked_add(delay)
        };
        delay
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{BackoffPolicy, ProbeBackoff};

    const INITIAL: Duration = Duration::from_secs(60);
    const MAX: Duration = Duration::from_secs(600);

    fn policy() -> BackoffPolicy {
        BackoffPolicy::new(2, INITIAL, MAX, 2)
    }

    #[test]
    fn grace_failures_carry_no_delay() {
        let policy = policy();
        for failures in 0..=2 {
            assert!(policy.delay_after(failures).is_zero(), "failures={failures}");
        }
    }

    #[test]
    fn delay_grows_and_stays_within_bounds() {
        let policy = policy();
        let first = policy.delay_after(3);
        assert!(first >= INITIAL && first <= INITIAL * 2, "first={first:?}");

        let later = policy.delay_after(6);
        assert!(later > first, "later={later:?} first={first:?}");

        for failures in 3..=20 {
            let delay = policy.delay_after(failures);
            assert!(delay >= INITIAL && delay <= MAX, "failures={failures} delay={delay:?}");
        }
    }

    #[test]
    fn huge_streaks_never_exceed_max() {
        let delay = policy().delay_after(u32::MAX);
        assert!(delay >= INITIAL && delay <= MAX, "delay={delay:?}");
    }

    #[test]
    fn gate_closes_after_grace_and_reopens_on_success() {
        let mut backoff = ProbeBackoff::new(policy());
        let start = Instant::now();

        assert!(backoff.record_failure(start).is_zero());
        assert!(backoff.record_failure(start).is_zero());
        assert!(backoff.is_ready(start));

        let delay = backoff.record_failure(start);
        assert!(!delay.is_zero());
        assert!(!backoff.is_ready(start + delay - Duration::from_secs(1)));
        assert_eq!(
            backoff.retry_in(start + Duration::from_secs(20)),
            delay - Duration::from_secs(20)
        );
        assert!(backoff.is_ready(start + delay));

        assert_eq!(backoff.record_success(), 3);
        assert_eq!(backoff.consecutive_failures(), 0);
        assert!(backoff.is_ready(start));
    }
}
