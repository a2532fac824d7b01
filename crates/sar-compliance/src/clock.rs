//! Time source for report generation

use chrono::{DateTime, Utc};

/// Supplies the current instant to the pipeline.
///
/// Every clock-derived value in a report (due dates, report id,
/// `generated_at`) is read from one call to [`Clock::now`], so a fixed clock
/// makes the whole report reproducible.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
