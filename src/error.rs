//! Error types for Liftbook Core

use thiserror::Error;

/// Main error type for record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The remote workbook cannot be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The named sheet does not exist in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A required column is missing from a reference sheet
    #[error("Schema error: {0}")]
    Schema(String),

    /// An append or replace call failed after local state was computed
    #[error("Persist error: {0}")]
    Persist(String),

    /// The sheet was cleared but the rewrite failed, leaving it empty
    #[error("Partial replace of '{table}': sheet was cleared but rewrite failed: {message}")]
    PartialReplace {
        /// Sheet that is now empty
        table: String,
        /// Underlying failure
        message: String,
    },

    /// Malformed user input, rejected before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for failures of a write call (append, clear, rewrite)
    pub fn is_persist(&self) -> bool {
        matches!(self, StoreError::Persist(_) | StoreError::PartialReplace { .. })
    }

    /// Message shown to the user by the presentation layer
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Connection(_) => {
                format!("Failed to connect to the spreadsheet: {}", self)
            }
            StoreError::Persist(_) => {
                format!("Failed to update spreadsheet, please retry: {}", self)
            }
            StoreError::PartialReplace { table, .. } => format!(
                "Sheet '{}' was cleared but could not be rewritten. Restore it from the \
                 spreadsheet version history before retrying.",
                table
            ),
            _ => self.to_string(),
        }
    }

    /// Convert a write-path failure into a persist error
    pub(crate) fn into_persist(self) -> StoreError {
        if self.is_persist() {
            self
        } else {
            StoreError::Persist(self.to_string())
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type alias for record store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::SheetNotFound("Template Master".to_string());
        assert!(err.to_string().contains("Template Master"));

        let err = StoreError::Validation("weight must be non-negative".to_string());
        assert!(err.to_string().contains("weight"));

        let err = StoreError::PartialReplace {
            table: "Training Log".to_string(),
            message: "timeout".to_string(),
        };
        assert!(err.to_string().contains("Training Log"));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_is_persist() {
        assert!(StoreError::Persist("x".to_string()).is_persist());
        assert!(StoreError::PartialReplace {
            table: "t".to_string(),
            message: "m".to_string()
        }
        .is_persist());
        assert!(!StoreError::Connection("x".to_string()).is_persist());
    }

    #[test]
    fn test_into_persist() {
        let err = StoreError::Connection("offline".to_string()).into_persist();
        match err {
            StoreError::Persist(msg) => assert!(msg.contains("offline")),
            _ => panic!("Expected Persist"),
        }

        let err = StoreError::PartialReplace {
            table: "t".to_string(),
            message: "m".to_string(),
        }
        .into_persist();
        assert!(matches!(err, StoreError::PartialReplace { .. }));
    }

    #[test]
    fn test_error_from_rusqlite() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let store_err: StoreError = sqlite_err.into();
        match store_err {
            StoreError::Connection(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Connection"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Config(_)));
    }

    #[test]
    fn test_user_message_partial_replace() {
        let err = StoreError::PartialReplace {
            table: "Training Log".to_string(),
            message: "boom".to_string(),
        };
        assert!(err.user_message().contains("Training Log"));
    }
}
