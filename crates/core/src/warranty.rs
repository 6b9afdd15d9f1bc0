//! Warranty coverage math.

use crate::types::Timestamp;

/// Whole days left until `end_date`, never negative.
///
/// Partial days are truncated, so a warranty ending later today reports 0.
pub fn days_remaining(end_date: Timestamp, now: Timestamp) -> i64 {
    (end_date - now).num_days().max(0)
}

/// A warranty is active until the end of its `end_date` instant.
pub fn is_active(end_date: Timestamp, now: Timestamp) -> bool {
    end_date >= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn counts_whole_days() {
        assert_eq!(days_remaining(now() + Duration::days(30), now()), 30);
        assert_eq!(
            days_remaining(now() + Duration::days(2) + Duration::hours(23), now()),
            2
        );
    }

    #[test]
    fn expired_warranty_has_zero_days() {
        assert_eq!(days_remaining(now() - Duration::days(5), now()), 0);
        assert!(!is_active(now() - Duration::seconds(1), now()));
    }

    #[test]
    fn ending_today_is_active_with_zero_days() {
        let end = now() + Duration::hours(3);
        assert_eq!(days_remaining(end, now()), 0);
        assert!(is_active(end, now()));
    }
}
