//! Bounded polling for players that apply commands asynchronously.

use log::trace;
use std::future::Future;
use std::time::Duration;

const DEFAULT_INTERVAL_MS: u64 = 75;
const DEFAULT_ATTEMPTS: u32 = 20;

/// How often and how many times to check a condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

/// Check `predicate` up to `policy.attempts` times, sleeping `policy.interval`
/// between checks. Returns whether it ever held; giving up is not an error.
pub async fn poll_until<F, Fut>(policy: PollPolicy, mut predicate: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for attempt in 1..=policy.attempts {
        if predicate().await {
            trace!("Converged after {} checks", attempt);
            return true;
        }
        if attempt < policy.attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    trace!("Gave up after {} checks", policy.attempts);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Instant;

    fn fast(attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(1),
            attempts,
        }
    }

    #[tokio::test]
    async fn test_returns_immediately_when_true() {
        let checks = Cell::new(0);
        let converged = poll_until(fast(20), || {
            checks.set(checks.get() + 1);
            async { true }
        })
        .await;
        assert!(converged);
        assert_eq!(checks.get(), 1);
    }

    #[tokio::test]
    async fn test_stops_once_predicate_holds() {
        let checks = Cell::new(0);
        let converged = poll_until(fast(20), || {
            checks.set(checks.get() + 1);
            let n = checks.get();
            async move { n >= 4 }
        })
        .await;
        assert!(converged);
        assert_eq!(checks.get(), 4);
    }

    #[tokio::test]
    async fn test_gives_up_after_attempt_budget() {
        let checks = Cell::new(0);
        let converged = poll_until(fast(5), || {
            checks.set(checks.get() + 1);
            async { false }
        })
        .await;
        assert!(!converged);
        assert_eq!(checks.get(), 5);
    }

    #[tokio::test]
    async fn test_wait_is_bounded() {
        let policy = PollPolicy {
            interval: Duration::from_millis(10),
            attempts: 3,
        };
        let start = Instant::now();
        poll_until(policy, || async { false }).await;
        // Two sleeps between three checks, nowhere near a hang
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_zero_attempts_never_checks() {
        let checks = Cell::new(0);
        let converged = poll_until(fast(0), || {
            checks.set(checks.get() + 1);
            async { true }
        })
        .await;
        assert!(!converged);
        assert_eq!(checks.get(), 0);
    }

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(75));
        assert_eq!(policy.attempts, 20);
    }
}
