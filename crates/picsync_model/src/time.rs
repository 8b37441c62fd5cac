//! Timestamp helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time as Unix milliseconds.
pub type Timestamp = i64;

/// Returns the current wall-clock time as Unix milliseconds.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

/// Computes the next `last_modified` value for a record.
///
/// `last_modified` must be monotonically non-decreasing across successive
/// updates even when the wall clock steps backwards, so the result is the
/// current time or `previous + 1`, whichever is larger.
pub fn bump_last_modified(previous: Timestamp) -> Timestamp {
    now_millis().max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_positive() {
        assert!(now_millis() > 0);
    }

    #[test]
    fn bump_is_strictly_greater() {
        let previous = now_millis();
        assert!(bump_last_modified(previous) > previous);
    }

    #[test]
    fn bump_outruns_a_future_clock() {
        // A record stamped ahead of the wall clock still moves forward.
        let future = now_millis() + 60_000;
        assert_eq!(bump_last_modified(future), future + 1);
    }
}
