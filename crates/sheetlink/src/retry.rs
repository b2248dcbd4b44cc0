//! Bounded retry policy for quota errors.

use std::time::Duration;

/// How append writes react to the service's quota errors.
///
/// A bounded loop with a fixed base delay, optionally growing by
/// `backoff_multiplier` between attempts. The default — one retry after
/// 2.5 seconds — matches the service's observed recovery time for burst
/// quota; once the budget is spent the quota error surfaces to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub delay: Duration,
    /// Growth factor applied to the delay after each retry. 1.0 keeps
    /// the delay fixed.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 1,
            delay: Duration::from_millis(2500),
            backoff_multiplier: 1.0,
        }
    }
}

impl RetryPolicy {
    /// No retries at all; every quota error surfaces immediately.
    pub fn none() -> Self {
        RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        }
    }

    /// Delay to wait before retry number `retry` (1-based).
    pub(crate) fn delay_for(&self, retry: u32) -> Duration {
        let mut delay = self.delay;
        for _ in 1..retry {
            delay = delay.mul_f64(self.backoff_multiplier);
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_fixed_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.delay_for(1), Duration::from_millis(2500));
    }

    #[test]
    fn backoff_grows_per_retry() {
        let policy = RetryPolicy {
            max_retries: 3,
            delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn unit_multiplier_keeps_delay_fixed() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(3), Duration::from_millis(2500));
    }
}
