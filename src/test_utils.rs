//! Test utilities and fixtures.
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::traits::MockTimeProvider;

/// A fixed instant for deterministic tests.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

/// Create a mock time provider frozen at `time`.
///
/// # Example
///
/// ```ignore
/// let mock = mock_time(fixed_time());
/// assert_eq!(mock.now(), fixed_time());
/// ```
#[must_use]
pub fn mock_time(time: DateTime<Utc>) -> MockTimeProvider {
    let mut mock = MockTimeProvider::new();
    mock.expect_now().returning(move || time);
    mock
}

/// Minimal valid submission with `nextThoughtNeeded` set while
/// `number < total`.
#[must_use]
pub fn thought(text: &str, number: u32, total: u32) -> Value {
    json!({
        "thought": text,
        "thoughtNumber": number,
        "totalThoughts": total,
        "nextThoughtNeeded": number < total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TimeProvider;

    #[test]
    fn test_mock_time_is_frozen() {
        let mock = mock_time(fixed_time());
        assert_eq!(mock.now(), fixed_time());
        assert_eq!(mock.now(), fixed_time());
    }

    #[test]
    fn test_thought_fixture() {
        let value = thought("x", 1, 2);
        assert_eq!(value["nextThoughtNeeded"], true);
        assert_eq!(value["thoughtNumber"], 1);
    }
}
