//! Parsing of user-supplied alarm times.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};

use chime_protocols::error::ToolError;

pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse `HH:MM:SS` or `YYYY-MM-DD HH:MM:SS` in the time zone of `now`.
///
/// A bare time of day refers to today, or tomorrow if it has already
/// passed or does not exist today (a DST gap). A full date-time is returned
/// as-is even when it lies in the past.
pub fn parse_alarm_time<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ToolError> {
    let input = input.trim();
    let tz = now.timezone();

    if let Ok(time) = NaiveTime::parse_from_str(input, TIME_OF_DAY_FORMAT) {
        let today = now.date_naive().and_time(time);
        return match tz.from_local_datetime(&today).earliest() {
            Some(at) if at > *now => Ok(at),
            _ => resolve_local(&tz, today + TimeDelta::days(1), input),
        };
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
        return resolve_local(&tz, naive, input);
    }

    Err(ToolError::InvalidParameters(format!(
        "Invalid time '{}': use HH:MM:SS or YYYY-MM-DD HH:MM:SS",
        input
    )))
}

fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    naive: NaiveDateTime,
    input: &str,
) -> Result<DateTime<Tz>, ToolError> {
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        ToolError::InvalidParameters(format!(
            "Time '{}' does not exist in the local time zone",
            input
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, Utc};

    /// UTC+1, switching to UTC+2 at 2026-03-29 01:00 UTC. Local 02:00-03:00
    /// on that day does not exist.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn winter() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(2 * 3600).unwrap()
        }

        fn local(s: &str) -> NaiveDateTime {
            NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < Self::local("2026-03-29 02:00:00") {
                LocalResult::Single(Self::winter())
            } else if *local < Self::local("2026-03-29 03:00:00") {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::local("2026-03-29 01:00:00") {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_time_of_day_later_today() {
        let now = at("2026-03-01 08:00:00");
        let parsed = parse_alarm_time("09:30:00", &now).unwrap();
        assert_eq!(parsed, at("2026-03-01 09:30:00"));
    }

    #[test]
    fn test_time_of_day_already_passed_rolls_to_tomorrow() {
        let now = at("2026-03-01 08:00:00");
        let parsed = parse_alarm_time("07:00:00", &now).unwrap();
        assert_eq!(parsed, at("2026-03-02 07:00:00"));
    }

    #[test]
    fn test_time_of_day_equal_to_now_rolls() {
        let now = at("2026-03-01 08:00:00");
        let parsed = parse_alarm_time("08:00:00", &now).unwrap();
        assert_eq!(parsed, at("2026-03-02 08:00:00"));
    }

    #[test]
    fn test_full_date_time() {
        let now = at("2026-03-01 08:00:00");
        let parsed = parse_alarm_time(" 2026-12-24 18:00:00 ", &now).unwrap();
        assert_eq!(parsed, at("2026-12-24 18:00:00"));
    }

    #[test]
    fn test_full_date_time_in_past_is_not_rolled() {
        let now = at("2026-03-01 08:00:00");
        let parsed = parse_alarm_time("2020-01-01 00:00:00", &now).unwrap();
        assert!(parsed < now);
    }

    #[test]
    fn test_respects_offset_of_now() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let parsed = parse_alarm_time("09:00:00", &now).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), at("2026-03-01 01:00:00"));
    }

    #[test]
    fn test_time_in_todays_dst_gap_after_now_rolls_to_tomorrow() {
        let now = SpringForward
            .from_local_datetime(&SpringForward::local("2026-03-29 08:00:00"))
            .unwrap();
        let parsed = parse_alarm_time("02:30:00", &now).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), at("2026-03-30 00:30:00"));
    }

    #[test]
    fn test_time_in_tomorrows_dst_gap_is_rejected() {
        let now = SpringForward
            .from_local_datetime(&SpringForward::local("2026-03-28 20:00:00"))
            .unwrap();
        let err = parse_alarm_time("02:30:00", &now).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(msg) if msg.contains("does not exist")));
    }

    #[test]
    fn test_invalid_formats() {
        let now = at("2026-03-01 08:00:00");
        for input in ["", "9am", "25:00:00", "12:00", "2026-13-01 00:00:00", "tomorrow"] {
            let err = parse_alarm_time(input, &now).unwrap_err();
            match err {
                ToolError::InvalidParameters(msg) => {
                    assert!(msg.contains("HH:MM:SS"), "{input}: {msg}");
                    assert!(msg.contains("YYYY-MM-DD HH:MM:SS"));
                }
                e => panic!("Expected InvalidParameters, got {:?}", e),
            }
        }
    }
}
