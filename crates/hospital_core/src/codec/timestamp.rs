//! Appointment schedule column parsing.
//!
//! Files written by this crate store epoch milliseconds. Older files carry
//! human-readable dates; those are read as UTC wall-clock time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a schedule column into epoch milliseconds.
///
/// Accepts integer epoch milliseconds, RFC 3339, and the common date and
/// date-time layouts in `DATE_TIME_FORMATS` / `DATE_FORMATS`. Returns `None`
/// for blank or unrecognized text.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(millis) = value.parse::<i64>() {
        return Some(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }

    let date_time = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(date_time.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;

    #[test]
    fn epoch_millis_pass_through() {
        assert_eq!(parse_timestamp("1760000000000"), Some(1_760_000_000_000));
        assert_eq!(parse_timestamp(" 0 "), Some(0));
    }

    #[test]
    fn dates_and_date_times_parse_as_utc() {
        assert_eq!(parse_timestamp("2024-05-01"), Some(1_714_521_600_000));
        assert_eq!(parse_timestamp("5/1/2024"), Some(1_714_521_600_000));
        assert_eq!(parse_timestamp("2024-05-01 09:30:00"), Some(1_714_555_800_000));
        assert_eq!(parse_timestamp("2024-05-01T09:30"), Some(1_714_555_800_000));
        assert_eq!(
            parse_timestamp("05/01/2024 02:15:00 PM"),
            Some(1_714_572_900_000)
        );
    }

    #[test]
    fn rfc3339_offset_is_honoured() {
        assert_eq!(
            parse_timestamp("2024-05-01T08:00:00+02:00"),
            Some(1_714_543_200_000)
        );
    }

    #[test]
    fn blank_and_free_text_are_not_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("Follow-up"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }
}
