//! RFC 1123 timestamps (`Mon, 02 Jan 2006 15:04:05 GMT`).
//!
//! Timestamps are always rendered in UTC with the `GMT` zone designator, the
//! form HTTP uses for its own dates.

use chrono::{DateTime, NaiveDateTime, Utc};

/// `strftime` layout of an RFC 1123 date in UTC.
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn format_rfc1123(ts: DateTime<Utc>) -> String {
    ts.format(RFC1123_FORMAT).to_string()
}

/// Current time, formatted for a `SysctlResult` timestamp.
pub fn now_rfc1123() -> String {
    format_rfc1123(Utc::now())
}

/// Parses an RFC 1123 date, accepting any zone designator RFC 2822 allows.
pub fn parse_rfc1123(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, RFC1123_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_reference_date() {
        let ts = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(format_rfc1123(ts), "Mon, 02 Jan 2006 15:04:05 GMT");
    }

    #[test]
    fn test_parse_roundtrip_now() {
        let now = now_rfc1123();
        let parsed = parse_rfc1123(&now).unwrap();
        assert_eq!(format_rfc1123(parsed), now);
    }

    #[test]
    fn test_parse_other_zones() {
        let parsed = parse_rfc1123("Mon, 02 Jan 2006 15:04:05 +0100").unwrap();
        assert_eq!(format_rfc1123(parsed), "Mon, 02 Jan 2006 14:04:05 GMT");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_rfc1123("2006-01-02T15:04:05Z").is_none());
        assert!(parse_rfc1123("").is_none());
    }
}
