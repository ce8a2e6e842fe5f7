//! ID allocation utilities

use crate::TEMPLATE_ID_PREFIX;

/// Coerce an id cell to an integer; blanks and garbage become 0
pub fn coerce_id(cell: &str) -> u64 {
    let cell = cell.trim();
    if let Ok(id) = cell.parse::<u64>() {
        return id;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => v as u64,
        _ => 0,
    }
}

/// Next log id: 1 for an empty table, otherwise max + 1
///
/// An id with no successor (`u64::MAX`) is treated like garbage and ignored.
pub fn next_id<I>(existing: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    existing
        .into_iter()
        .filter_map(|id| id.checked_add(1))
        .max()
        .unwrap_or(1)
}

/// Next log id computed from raw id cells
pub fn next_id_from_cells<'a, I>(cells: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    next_id(cells.into_iter().map(coerce_id))
}

/// Format a template id (`TMP` + 3-digit zero padded counter)
pub fn format_template_id(counter: u64) -> String {
    format!("{}{:03}", TEMPLATE_ID_PREFIX, counter)
}

/// Next template id derived from the last known id
///
/// Falls back to the template count + 1 when the last id has no numeric
/// suffix or its suffix cannot be incremented.
pub fn next_template_id<S: AsRef<str>>(existing: &[S]) -> String {
    let next = existing.last().and_then(|last| {
        last.as_ref()
            .trim()
            .strip_prefix(TEMPLATE_ID_PREFIX)
            .and_then(|suffix| suffix.parse::<u64>().ok())
            .and_then(|n| n.checked_add(1))
    });

    format_template_id(next.unwrap_or(existing.len() as u64 + 1))
}

/// Next template id, skipping any id already present
pub fn allocate_template_id<S: AsRef<str>>(existing: &[S]) -> String {
    let taken = |id: &str| existing.iter().any(|e| e.as_ref().trim() == id);

    let mut candidate = next_template_id(existing);
    let mut counter = candidate
        .strip_prefix(TEMPLATE_ID_PREFIX)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    while taken(&candidate) {
        counter = counter.checked_add(1).unwrap_or(1);
        candidate = format_template_id(counter);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(Vec::<u64>::new()), 1);
    }

    #[test]
    fn test_next_id_max_plus_one() {
        assert_eq!(next_id([3, 7, 2]), 8);
        assert_eq!(next_id([0]), 1);
    }

    #[test]
    fn test_next_id_ignores_garbage() {
        assert_eq!(next_id_from_cells(["3", "oops", "", "7.0"]), 8);
        assert_eq!(next_id_from_cells(["n/a"]), 1);
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id("12"), 12);
        assert_eq!(coerce_id(" 12 "), 12);
        assert_eq!(coerce_id("12.0"), 12);
        assert_eq!(coerce_id("12.5"), 0);
        assert_eq!(coerce_id("-4"), 0);
        assert_eq!(coerce_id(""), 0);
    }

    #[test]
    fn test_next_template_id() {
        assert_eq!(next_template_id::<&str>(&[]), "TMP001");
        assert_eq!(next_template_id(&["TMP001", "TMP002"]), "TMP003");
        assert_eq!(next_template_id(&["TMP009"]), "TMP010");
        assert_eq!(next_template_id(&["TMP999"]), "TMP1000");
    }

    #[test]
    fn test_next_template_id_fallback() {
        assert_eq!(next_template_id(&["TMP001", "custom"]), "TMP003");
        assert_eq!(next_template_id(&["x", "y", "z"]), "TMP004");
    }

    #[test]
    fn test_allocate_template_id_skips_taken() {
        assert_eq!(allocate_template_id(&["TMP003", "TMP001", "TMP002"]), "TMP004");
        assert_eq!(allocate_template_id(&["TMP002", "custom"]), "TMP003");
        assert_eq!(allocate_template_id::<&str>(&[]), "TMP001");
    }

    #[test]
    fn test_next_id_ignores_max_value() {
        assert_eq!(next_id([4, u64::MAX]), 5);
        assert_eq!(next_id([u64::MAX]), 1);
        assert_eq!(next_id_from_cells(["2", "18446744073709551615"]), 3);
        assert_eq!(next_id_from_cells(["1.8446744073709552e19", "6"]), 7);
    }

    #[test]
    fn test_template_id_at_max_suffix() {
        let max = format_template_id(u64::MAX);
        let below_max = format_template_id(u64::MAX - 1);
        assert_eq!(next_template_id(&[max.as_str()]), "TMP002");
        assert_eq!(next_template_id(&["TMP001", max.as_str()]), "TMP003");

        // The fallback and the wrap-around search both land on free ids
        assert_eq!(allocate_template_id(&["TMP002", max.as_str()]), "TMP003");
        assert_eq!(allocate_template_id(&[max.as_str(), below_max.as_str()]), "TMP001");
    }
}
