use crate::error::FetchError;
use chrono::DateTime;

/// Layout used for every start/finish value shown to users
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// ISO-8601 with a compact offset such as `+0000`
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse an ISO-8601 timestamp with offset and render it in [`DISPLAY_FORMAT`].
///
/// The instant keeps its original offset; nothing is converted to UTC or local time.
pub fn format_timestamp(field: &str, raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, COMPACT_OFFSET_FORMAT))
        .map_err(|e| {
            FetchError::MalformedResponse(format!("Invalid {} timestamp '{}': {}", field, raw, e))
        })?;

    Ok(parsed.format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_utc() {
        assert_eq!(
            format_timestamp("start", "2024-07-05T10:00:00+00:00").unwrap(),
            "05-07-2024 10:00:00"
        );
        assert_eq!(
            format_timestamp("start", "2024-12-31T23:59:59Z").unwrap(),
            "31-12-2024 23:59:59"
        );
    }

    #[test]
    fn test_offset_is_preserved() {
        // No conversion to UTC: 18:30 at +05:30 stays 18:30
        assert_eq!(
            format_timestamp("finish", "2025-01-02T18:30:00+05:30").unwrap(),
            "02-01-2025 18:30:00"
        );
        assert_eq!(
            format_timestamp("finish", "2025-03-09T01:05:09-08:00").unwrap(),
            "09-03-2025 01:05:09"
        );
    }

    #[test]
    fn test_compact_offset_accepted() {
        assert_eq!(
            format_timestamp("start", "2024-07-05T10:00:00+0000").unwrap(),
            "05-07-2024 10:00:00"
        );
        assert_eq!(
            format_timestamp("finish", "2025-01-02T18:30:00.500+0530").unwrap(),
            "02-01-2025 18:30:00"
        );
    }

    #[test]
    fn test_fixed_width() {
        for raw in [
            "2024-01-01T00:00:00+00:00",
            "2024-11-30T09:08:07+02:00",
            "2024-02-29T12:00:00.123+00:00",
        ] {
            let formatted = format_timestamp("start", raw).unwrap();
            assert_eq!(formatted.len(), "DD-MM-YYYY HH:MM:SS".len(), "{}", raw);
        }
    }

    #[test]
    fn test_unparseable_is_malformed() {
        for raw in ["", "tomorrow", "2024-07-05", "2024-07-05T10:00:00"] {
            let err = format_timestamp("start", raw).unwrap_err();
            assert!(matches!(err, FetchError::MalformedResponse(_)), "{}", raw);
        }
    }
}
