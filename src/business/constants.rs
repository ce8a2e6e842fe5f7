//! Constants operations

use crate::error::Result;
use crate::schema::{Constants, TableKind};
use crate::sheets::Workbook;
use super::tracker::Tracker;

impl<W: Workbook> Tracker<W> {
    /// Allowed set types and units
    pub fn get_constants(&mut self) -> Result<Constants> {
        let snapshot = self.load(TableKind::Constants)?;
        Constants::from_snapshot(&snapshot)
    }

    /// Allowed set types in sheet order
    pub fn set_types(&mut self) -> Result<Vec<String>> {
        Ok(self.get_constants()?.set_types)
    }

    /// Allowed units in sheet order
    pub fn units(&mut self) -> Result<Vec<String>> {
        Ok(self.get_constants()?.units)
    }
}

#[cfg(test)]
mod tests {
    use crate::business::tracker::tests::create_test_tracker;
    use crate::error::StoreError;

    #[test]
    fn test_constants() {
        let (mut tracker, _wb) = create_test_tracker();
        assert_eq!(tracker.set_types().unwrap(), vec!["Warmup", "Main"]);
        assert_eq!(tracker.units().unwrap(), vec!["kg", "lbs"]);
    }

    #[test]
    fn test_constants_missing_value_column() {
        let (mut tracker, wb) = create_test_tracker();
        wb.seed("Constants", &["Category", "Val"], &[&["Unit", "kg"]]);
        assert!(matches!(tracker.get_constants(), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_constants_unreachable() {
        let (mut tracker, wb) = create_test_tracker();
        wb.set_reachable(false);
        let err = tracker.get_constants().unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
        assert!(err.user_message().contains("connect"));
    }
}
