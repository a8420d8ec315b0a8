use chrono::{DateTime, Utc};

/// Source of "now" for TTL checks and synthesized series.
///
/// Production code uses [`SystemClock`]; tests inject a manually advanced
/// clock so cache expiry is deterministic.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
