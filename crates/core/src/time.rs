//! Wall-clock sampling.
//!
//! Every time-sensitive operation samples the clock exactly once and threads
//! the sampled value through its validation helpers, so tests can exercise
//! expiry arithmetic with explicit timestamps instead of sleeping.

use chrono::Utc;

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
