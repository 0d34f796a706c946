use crate::reminder::ReminderOffset;
use chrono::{DateTime, Duration, Utc};

/// Raw fire time of a reminder: the target moved back by the offset.
/// No bounds checking, negative offsets move the fire time past the target.
pub fn apply_offset(target: DateTime<Utc>, offset: &ReminderOffset) -> DateTime<Utc> {
    target - Duration::days(offset.days as i64) - Duration::hours(offset.hours as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn subtracts_days_and_hours() {
        let target = dt("2025-08-20T19:00:00+03:00");
        assert_eq!(
            apply_offset(target, &ReminderOffset::new(1, 0)),
            dt("2025-08-19T19:00:00+03:00")
        );
        assert_eq!(
            apply_offset(target, &ReminderOffset::new(0, 2)),
            dt("2025-08-20T17:00:00+03:00")
        );
        assert_eq!(
            apply_offset(target, &ReminderOffset::new(2, 5)),
            dt("2025-08-18T14:00:00+03:00")
        );
    }

    #[test]
    fn zero_offset_is_identity() {
        let target = dt("2025-08-20T19:00:00+03:00");
        assert_eq!(apply_offset(target, &ReminderOffset::default()), target);
    }

    #[test]
    fn negative_offset_fires_after_target() {
        let target = dt("2025-08-20T19:00:00+03:00");
        assert_eq!(
            apply_offset(target, &ReminderOffset::new(0, -3)),
            dt("2025-08-20T22:00:00+03:00")
        );
    }

    #[test]
    fn days_are_absolute_24_hour_spans() {
        // Europe/Athens springs forward on 2025-03-30, the offset does not care
        let target = dt("2025-03-30T12:00:00+03:00");
        assert_eq!(
            apply_offset(target, &ReminderOffset::new(1, 0)),
            dt("2025-03-29T11:00:00+02:00")
        );
    }
}
