pub mod add_work_shift_command;

use crate::errors::{ErrorCode, ServiceError};
use chrono::{DateTime, Datelike, Utc};

pub use add_work_shift_command::AddWorkShiftCommand;

/// A shift must start before it ends, with both endpoints inside the
/// schedule's calendar month (UTC).
pub fn shift_within_schedule(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    month: i32,
    year: i32,
) -> bool {
    let in_period =
        |t: DateTime<Utc>| i64::from(t.month()) == i64::from(month) && t.year() == year;
    start < end && in_period(start) && in_period(end)
}

pub fn ensure_shift_within_schedule(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    month: i32,
    year: i32,
) -> Result<(), ServiceError> {
    if shift_within_schedule(start, end, month, year) {
        Ok(())
    } else {
        Err(ServiceError::BusinessRule(
            ErrorCode::InvalidWorkShiftTimeRange,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn shift_in_previous_month_is_rejected() {
        assert!(!shift_within_schedule(
            at(2024, 4, 10, 8),
            at(2024, 4, 10, 16),
            5,
            2024
        ));
        assert!(shift_within_schedule(
            at(2024, 5, 10, 8),
            at(2024, 5, 10, 16),
            5,
            2024
        ));
    }

    #[test]
    fn shift_crossing_month_end_is_rejected() {
        assert!(!shift_within_schedule(
            at(2024, 5, 31, 22),
            at(2024, 6, 1, 6),
            5,
            2024
        ));
    }

    #[test]
    fn empty_or_inverted_range_is_rejected() {
        let t = at(2024, 5, 10, 8);
        assert!(!shift_within_schedule(t, t, 5, 2024));
        assert!(!shift_within_schedule(t + Duration::hours(1), t, 5, 2024));
    }

    proptest! {
        #[test]
        fn accepted_shifts_are_ordered_and_in_month(
            start_min in 0i64..(60 * 24 * 62),
            len_min in -600i64..600,
        ) {
            let base = at(2024, 5, 1, 0) - Duration::days(15);
            let start = base + Duration::minutes(start_min);
            let end = start + Duration::minutes(len_min);
            if shift_within_schedule(start, end, 5, 2024) {
                prop_assert!(start < end);
                prop_assert_eq!(start.month(), 5);
                prop_assert_eq!(end.month(), 5);
            }
        }
    }
}
