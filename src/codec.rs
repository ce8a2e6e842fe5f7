//! Template exercise list codec
//!
//! A template stores its ordered exercise ids in a single cell. New cells are
//! pipe-delimited; comma-delimited cells from older revisions still decode.

use crate::utils::normalize_id;

/// Delimiter written by `encode`
pub const TEMPLATE_DELIMITER: char = '|';

/// Delimiter of legacy template cells
pub const LEGACY_TEMPLATE_DELIMITER: char = ',';

/// Join exercise ids into one cell
pub fn encode<S: AsRef<str>>(exercise_ids: &[S]) -> String {
    exercise_ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(&TEMPLATE_DELIMITER.to_string())
}

/// Split a template cell back into ordered exercise ids
pub fn decode(cell: &str) -> Vec<String> {
    let delimiter = if cell.contains(TEMPLATE_DELIMITER) {
        TEMPLATE_DELIMITER
    } else {
        LEGACY_TEMPLATE_DELIMITER
    };

    cell.split(delimiter)
        .map(normalize_id)
        .filter(|id| !id.is_empty())
        .collect()
}

/// True if an id can be stored without corrupting the cell
pub fn is_encodable(exercise_id: &str) -> bool {
    !exercise_id.trim().is_empty()
        && !exercise_id.contains(TEMPLATE_DELIMITER)
        && !exercise_id.contains(LEGACY_TEMPLATE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let ids = vec!["E1".to_string(), "E2".to_string(), "E3".to_string()];
        assert_eq!(encode(&ids), "E1|E2|E3");
        assert_eq!(decode(&encode(&ids)), ids);
    }

    #[test]
    fn test_order_preserved() {
        let ids = ["E9", "E1", "E5", "E1"];
        assert_eq!(decode(&encode(&ids)), vec!["E9", "E1", "E5", "E1"]);
    }

    #[test]
    fn test_legacy_comma() {
        assert_eq!(decode("E1,E2"), vec!["E1", "E2"]);
        assert_eq!(decode("E1, E2 ,E3"), vec!["E1", "E2", "E3"]);
    }

    #[test]
    fn test_numeric_artifacts() {
        assert_eq!(decode("12.0|7.0|3"), vec!["12", "7", "3"]);
        assert_eq!(decode("12.0,7.0"), vec!["12", "7"]);
        assert_eq!(decode("12.0"), vec!["12"]);
    }

    #[test]
    fn test_empty_and_blank_segments() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
        assert_eq!(decode("E1||E2|"), vec!["E1", "E2"]);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode::<&str>(&[]), "");
    }

    #[test]
    fn test_is_encodable() {
        assert!(is_encodable("E1"));
        assert!(!is_encodable("E1|E2"));
        assert!(!is_encodable("E1,E2"));
        assert!(!is_encodable(" "));
    }
}
