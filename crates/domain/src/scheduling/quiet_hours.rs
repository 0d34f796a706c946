use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidQuietHoursError {
    #[error("Quiet hours window must satisfy start < end <= 24, got [{0}, {1})")]
    Window(u32, u32),
}

/// Local wall clock window, `[start_hour, end_hour)`, in which reminders may fire.
///
/// This is the only place in the pipeline that deals with zoned time,
/// everything else handles absolute instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuietHoursPolicy {
    timezone: Tz,
    start_hour: u32,
    end_hour: u32,
}

impl QuietHoursPolicy {
    pub const DEFAULT_START_HOUR: u32 = 7;
    pub const DEFAULT_END_HOUR: u32 = 22;

    pub fn new(timezone: Tz, start_hour: u32, end_hour: u32) -> Result<Self, InvalidQuietHoursError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(InvalidQuietHoursError::Window(start_hour, end_hour));
        }
        Ok(Self {
            timezone,
            start_hour,
            end_hour,
        })
    }

    pub fn with_default_window(timezone: Tz) -> Self {
        Self {
            timezone,
            start_hour: Self::DEFAULT_START_HOUR,
            end_hour: Self::DEFAULT_END_HOUR,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Moves `instant` into the allowed window.
    ///
    /// Before the window it is clamped to the window start on the same local
    /// day, after the window to the window start on the next local day.
    /// Instants inside the window are returned unchanged.
    pub fn adjust(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let local = instant.with_timezone(&self.timezone);
        let hour = local.hour();
        let date = local.date_naive();

        if hour < self.start_hour {
            self.window_start_on(date)
        } else if hour >= self.end_hour {
            match date.succ_opt() {
                Some(next_date) => self.window_start_on(next_date),
                None => instant,
            }
        } else {
            instant
        }
    }

    pub fn is_within_window(&self, instant: DateTime<Utc>) -> bool {
        let hour = instant.with_timezone(&self.timezone).hour();
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Resolved with the UTC offset in effect on `date`, not the one of the
    /// instant being clamped.
    fn window_start_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let start = NaiveTime::from_hms_opt(self.start_hour, 0, 0).unwrap_or_default();
        let mut wall_clock = date.and_time(start);
        loop {
            match self.timezone.from_local_datetime(&wall_clock) {
                LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
                // Skipped by a DST transition
                LocalResult::None => wall_clock += Duration::minutes(15),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reminder::ReminderOffset, scheduling::offset::apply_offset};
    use chrono_tz::{America::New_York, Australia::Lord_Howe, Europe::Athens};

    fn dt(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn athens() -> QuietHoursPolicy {
        QuietHoursPolicy::with_default_window(Athens)
    }

    #[test]
    fn rejects_invalid_windows() {
        assert!(QuietHoursPolicy::new(Athens, 7, 22).is_ok());
        assert!(QuietHoursPolicy::new(Athens, 0, 24).is_ok());
        assert_eq!(
            QuietHoursPolicy::new(Athens, 22, 7),
            Err(InvalidQuietHoursError::Window(22, 7))
        );
        assert!(QuietHoursPolicy::new(Athens, 7, 7).is_err());
        assert!(QuietHoursPolicy::new(Athens, 7, 25).is_err());
    }

    #[test]
    fn keeps_instants_inside_window() {
        let policy = athens();
        for raw in [
            "2025-08-19T19:00:00+03:00",
            "2025-08-19T07:00:00+03:00",
            "2025-08-19T21:59:59+03:00",
        ] {
            assert_eq!(policy.adjust(dt(raw)), dt(raw));
        }
    }

    #[test]
    fn clamps_early_morning_to_same_day() {
        let policy = athens();
        assert_eq!(
            policy.adjust(dt("2025-08-20T04:00:00+03:00")),
            dt("2025-08-20T07:00:00+03:00")
        );
        assert_eq!(
            policy.adjust(dt("2025-08-20T00:00:00+03:00")),
            dt("2025-08-20T07:00:00+03:00")
        );
        assert_eq!(
            policy.adjust(dt("2025-08-20T06:59:59+03:00")),
            dt("2025-08-20T07:00:00+03:00")
        );
    }

    #[test]
    fn clamps_late_evening_to_next_day() {
        let policy = athens();
        assert_eq!(
            policy.adjust(dt("2025-08-19T22:00:00+03:00")),
            dt("2025-08-20T07:00:00+03:00")
        );
        assert_eq!(
            policy.adjust(dt("2025-08-19T23:45:00+03:00")),
            dt("2025-08-20T07:00:00+03:00")
        );
        // Month and year boundaries
        assert_eq!(
            policy.adjust(dt("2025-12-31T22:30:00+02:00")),
            dt("2026-01-01T07:00:00+02:00")
        );
    }

    #[test]
    fn worked_examples() {
        let policy = athens();

        let target = dt("2025-08-20T19:00:00+03:00");
        let raw = apply_offset(target, &ReminderOffset::new(1, 0));
        assert_eq!(raw, dt("2025-08-19T19:00:00+03:00"));
        assert_eq!(policy.adjust(raw), dt("2025-08-19T19:00:00+03:00"));

        let target = dt("2025-08-20T06:00:00+03:00");
        let raw = apply_offset(target, &ReminderOffset::new(0, 2));
        assert_eq!(raw, dt("2025-08-20T04:00:00+03:00"));
        assert_eq!(policy.adjust(raw), dt("2025-08-20T07:00:00+03:00"));
    }

    #[test]
    fn spring_forward_uses_offset_of_resulting_date() {
        // Athens moves from +02:00 to +03:00 at 03:00 local on 2025-03-30
        let policy = athens();
        let clamped = policy.adjust(dt("2025-03-30T02:30:00+02:00"));
        assert_eq!(clamped, dt("2025-03-30T07:00:00+03:00"));
        assert_eq!(clamped, dt("2025-03-30T04:00:00Z"));
    }

    #[test]
    fn fall_back_uses_offset_of_resulting_date() {
        // Athens moves from +03:00 to +02:00 at 04:00 local on 2025-10-26
        let policy = athens();
        let clamped = policy.adjust(dt("2025-10-25T22:30:00+03:00"));
        assert_eq!(clamped, dt("2025-10-26T07:00:00+02:00"));
        assert_eq!(clamped, dt("2025-10-26T05:00:00Z"));
    }

    #[test]
    fn window_start_inside_dst_gap_moves_forward() {
        // 02:00 does not exist in New York on 2025-03-09
        let policy = QuietHoursPolicy::new(New_York, 2, 22).unwrap();
        assert_eq!(
            policy.adjust(dt("2025-03-09T01:30:00-05:00")),
            dt("2025-03-09T03:00:00-04:00")
        );
    }

    #[test]
    fn ambiguous_window_start_picks_earliest() {
        // 01:00 happens twice in New York on 2025-11-02
        let policy = QuietHoursPolicy::new(New_York, 1, 22).unwrap();
        assert_eq!(
            policy.adjust(dt("2025-11-02T00:30:00-04:00")),
            dt("2025-11-02T01:00:00-04:00")
        );
    }

    #[test]
    fn adjusted_time_always_lands_in_window() {
        let start = dt("2025-01-01T00:00:00Z");
        for tz in [Athens, New_York, Lord_Howe] {
            let policy = QuietHoursPolicy::with_default_window(tz);
            let mut raw = start;
            while raw < dt("2026-01-01T00:00:00Z") {
                let adjusted = policy.adjust(raw);
                let local_hour = adjusted.with_timezone(&tz).hour();
                assert!(
                    (7..22).contains(&local_hour),
                    "{} adjusted to {} in {}",
                    raw,
                    adjusted,
                    tz
                );
                assert!(adjusted >= raw);
                assert!(policy.is_within_window(adjusted));
                raw = raw + Duration::minutes(37);
            }
        }
    }

    #[test]
    fn adjusting_is_idempotent() {
        let policy = athens();
        let mut raw = dt("2025-03-28T00:00:00Z");
        while raw < dt("2025-04-02T00:00:00Z") {
            let once = policy.adjust(raw);
            assert_eq!(policy.adjust(once), once);
            raw = raw + Duration::minutes(11);
        }
    }
}
