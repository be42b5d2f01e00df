//! # Time Utilities
//!
//! Current time, as chrono values or Unix seconds.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as a Unix timestamp in whole seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
