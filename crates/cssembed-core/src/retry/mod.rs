//! Retry and backoff policy for the HTTP fetcher.
//!
//! Classifies fetch failures (timeouts, throttling, connection failures)
//! and computes exponential backoff so a flaky font host does not leave a
//! stylesheet half-inlined.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
