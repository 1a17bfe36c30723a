//! Backoff schedule for resource fetches.

use std::time::Duration;

use crate::config::RetryConfig;

/// Why a fetch failed, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    /// 429 or 503.
    Throttled,
    /// Reset, refused or unresolvable host.
    Connection,
    Http5xx(u16),
    /// Everything else; a missing stylesheet asset will not appear on retry.
    Other,
}

impl ErrorKind {
    fn is_transient(self) -> bool {
        !matches!(self, ErrorKind::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Doubling backoff between fetch attempts, bounded by `max_delay`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per resource, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    /// Out-of-range config values are clamped: at least one attempt, and a
    /// base delay that is finite and no longer than `max_delay_secs`.
    fn from(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        let base_delay = Duration::try_from_secs_f64(cfg.base_delay_secs.max(0.0))
            .unwrap_or(max_delay)
            .min(max_delay);
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Wait before the attempt after `attempt` (1-based).
    fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(8);
        self.base_delay
            .saturating_mul(1 << doublings)
            .min(self.max_delay)
    }

    /// Whether attempt number `attempt` (1-based) that failed with `kind` gets another try.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt < self.max_attempts && kind.is_transient() {
            RetryDecision::RetryAfter(self.backoff(attempt))
        } else {
            RetryDecision::NoRetry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retry_config(base_delay_secs: f64) -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_secs,
            max_delay_secs: 5,
        }
    }

    #[test]
    fn missing_asset_is_not_retried() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let p = RetryPolicy {
            max_attempts: 20,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        };
        assert_eq!(
            p.decide(1, ErrorKind::Timeout),
            RetryDecision::RetryAfter(Duration::from_millis(250))
        );
        assert_eq!(
            p.decide(3, ErrorKind::Connection),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
        assert_eq!(
            p.decide(15, ErrorKind::Http5xx(502)),
            RetryDecision::RetryAfter(Duration::from_secs(5))
        );
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy {
            max_attempts: 3,
            ..RetryPolicy::default()
        };
        assert!(matches!(
            p.decide(2, ErrorKind::Throttled),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Throttled), RetryDecision::NoRetry);
    }

    #[test]
    fn no_retry_policy_never_retries() {
        let p = RetryPolicy::no_retry();
        assert_eq!(p.decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }

    #[test]
    fn built_from_config() {
        let cfg = RetryConfig {
            max_attempts: 0,
            base_delay_secs: 0.5,
            max_delay_secs: 4,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.base_delay, Duration::from_millis(500));
        assert_eq!(p.max_delay, Duration::from_secs(4));
    }

    #[test]
    fn oversized_base_delay_is_clamped() {
        for secs in [1e300, f64::INFINITY, 60.0] {
            let p = RetryPolicy::from(&retry_config(secs));
            assert_eq!(p.base_delay, Duration::from_secs(5), "base_delay_secs = {secs}");
        }
    }

    #[test]
    fn negative_or_nan_base_delay_is_zero() {
        for secs in [-2.0, f64::NAN] {
            let p = RetryPolicy::from(&retry_config(secs));
            assert_eq!(p.base_delay, Duration::ZERO, "base_delay_secs = {secs}");
        }
    }
}
