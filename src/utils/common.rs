//! Common utility functions

use chrono::NaiveDate;

/// Date format for sheet storage
pub const SHEET_DATE_FORMAT: &str = "%Y/%m/%d";

/// Legacy ISO date format written by older revisions
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a date to sheet string format
pub fn format_date(date: &NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

/// Parse a sheet date string, returning None for anything unparsable
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, SHEET_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, ISO_DATE_FORMAT))
        .ok()
}

/// Strip the trailing `.0` a spreadsheet adds when it coerces an integer to a float
pub fn normalize_id(s: &str) -> String {
    let trimmed = s.trim();
    match trimmed.strip_suffix(".0") {
        Some(head) if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()) => {
            head.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Parse a decimal cell, treating blanks and garbage as zero
pub fn parse_decimal(s: &str) -> f64 {
    parse_optional_decimal(s).unwrap_or(0.0)
}

/// Parse an optional decimal cell; blanks and garbage yield None
pub fn parse_optional_decimal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative integer cell, accepting float artifacts like `5.0`
///
/// Fractional cells are truncated toward zero (`5.9` reads as 5 reps), so
/// derived metrics always use whole repetitions.
pub fn parse_count(s: &str) -> u32 {
    let s = s.trim();
    if let Ok(v) = s.parse::<u32>() {
        return v;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 => v.trunc() as u32,
        _ => 0,
    }
}

/// Canonical text of a number as a spreadsheet would display it
pub fn canonical_number(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        return None;
    }
    let value = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(format!("{}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(&date), "2024/03/07");
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024/03/07").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 7);

        // Legacy format still readable
        assert_eq!(parse_date("2024-03-07"), Some(date));
        assert_eq!(parse_date(" 2024/03/07 "), Some(date));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024/13/01").is_none());
        assert!(parse_date("2024/02/30").is_none());
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("12.0"), "12");
        assert_eq!(normalize_id("12"), "12");
        assert_eq!(normalize_id(" E7 "), "E7");
        assert_eq!(normalize_id("12.5"), "12.5");
        assert_eq!(normalize_id("EX.0"), "EX.0");
        assert_eq!(normalize_id(".0"), ".0");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("100"), 100.0);
        assert_eq!(parse_decimal("62.5"), 62.5);
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_decimal("heavy"), 0.0);
        assert_eq!(parse_decimal("NaN"), 0.0);
        assert_eq!(parse_optional_decimal(""), None);
        assert_eq!(parse_optional_decimal("8.5"), Some(8.5));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count("5.0"), 5);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("5.9"), 5);
        assert_eq!(parse_count("0.5"), 0);
    }

    #[test]
    fn test_canonical_number() {
        assert_eq!(canonical_number("100.0").as_deref(), Some("100"));
        assert_eq!(canonical_number("62.50").as_deref(), Some("62.5"));
        assert_eq!(canonical_number("7").as_deref(), Some("7"));
        assert_eq!(canonical_number("E1"), None);
        assert_eq!(canonical_number(""), None);
        assert_eq!(canonical_number("inf"), None);
    }
}
