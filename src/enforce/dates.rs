//! Date and timestamp parsing for string-to-temporal casts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Configuration for date format handling during enforcement.
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Date format strings to try when parsing, in order
    pub date_formats: Vec<String>,
    /// Datetime format strings to try when parsing, in order
    pub datetime_formats: Vec<String>,
    /// Format used when rendering dates back to strings
    pub default_format: String,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO: 2023-01-15
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%d/%m/%Y".to_string(), // UK: 15/01/2023
                "%Y%m%d".to_string(),   // Compact: 20230115
            ],
            datetime_formats: vec![
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
            ],
            default_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Parse a date string against the configured formats, first match wins.
#[must_use]
pub fn parse_date_string(value: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let trimmed = value.trim();
    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_datetime_string(trimmed, config).map(|dt| dt.date()))
}

/// Parse a datetime string against the configured formats; a bare date
/// parses as midnight.
#[must_use]
pub fn parse_datetime_string(value: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    config
        .datetime_formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            config.date_formats.iter().find_map(|format| {
                NaiveDate::parse_from_str(trimmed, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let config = DateFormatConfig::default();
        let date = parse_date_string("2023-01-15", &config).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_alternative_formats() {
        let config = DateFormatConfig::default();
        assert!(parse_date_string("15.01.2023", &config).is_none());
        assert!(parse_date_string("01/15/2023", &config).is_some());
        assert!(parse_date_string("20230115", &config).is_some());
    }

    #[test]
    fn test_parse_datetime_falls_back_to_midnight() {
        let config = DateFormatConfig::default();
        let dt = parse_datetime_string("2023-01-15", &config).unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_datetime_with_fraction() {
        let config = DateFormatConfig::default();
        assert!(parse_datetime_string("2023-01-15T10:30:00.123", &config).is_some());
    }
}
