//! Registration timestamp parsing.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Extract the year from a registration timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` and date-only `YYYY-MM-DD` values.
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(stamp.date().year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.year());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::parse_year;

    #[test]
    fn parses_full_timestamps() {
        assert_eq!(parse_year("1992-02-10 00:00:00"), Some(1992));
        assert_eq!(parse_year(" 2004-11-05 10:30:00 "), Some(2004));
    }

    #[test]
    fn parses_date_only_values() {
        assert_eq!(parse_year("1997-05-14"), Some(1997));
    }

    #[test]
    fn rejects_unparseable_values() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("not a date"), None);
        assert_eq!(parse_year("10/02/1992"), None);
    }
}
