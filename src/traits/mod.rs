//! Clock seam for the chain.
//!
//! Every thought timestamp, rollback identifier and session latency reads
//! the time through [`TimeProvider`]. Unit tests swap in the generated
//! `MockTimeProvider`; integration tests and benchmarks use
//! [`FixedTimeProvider`].
//!
//! ```
//! use chain_of_draft::traits::{FixedTimeProvider, TimeProvider};
//! use chrono::{TimeZone, Utc};
//!
//! let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//! assert_eq!(FixedTimeProvider(instant).now(), instant);
//! ```

use chrono::{DateTime, Utc};

/// Source of the current instant.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider(pub DateTime<Utc>);

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
