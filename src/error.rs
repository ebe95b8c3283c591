//! Error types for dataset construction and view queries.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while building a [`Dataset`](crate::dataset::Dataset) or
/// computing a view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A row is missing a field or carries an invalid value. Construction aborts.
    #[error("Schema error in row {row}: {reason}")]
    Schema { row: usize, reason: String },
    /// The selection references an entity (or record) that does not exist.
    #[error("Selection error: {0}")]
    Selection(String),
    /// An aggregate would be computed over zero records.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl EngineError {
    pub(crate) fn schema(row: usize, reason: impl Into<String>) -> Self {
        Self::Schema {
            row,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Non-fatal notice that the `(student, grade, subject)` key matched more
/// than one record and the first match was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataIntegrityWarning {
    pub student_id: u32,
    pub grade: u32,
    pub subject: String,
    pub matches: usize,
}

impl DataIntegrityWarning {
    /// Logs the warning and hands it back so callers can attach it to a result.
    pub(crate) fn emit(student_id: u32, grade: u32, subject: &str, matches: usize) -> Self {
        tracing::warn!(
            student_id,
            grade,
            subject,
            matches,
            "Duplicate records for key, using first match"
        );
        Self {
            student_id,
            grade,
            subject: subject.to_string(),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = EngineError::schema(3, "missing field `Marks`");
        assert_eq!(err.to_string(), "Schema error in row 3: missing field `Marks`");
    }

    #[test]
    fn test_emit_keeps_key() {
        let w = DataIntegrityWarning::emit(1, 2, "Math", 2);
        assert_eq!(w.subject, "Math");
        assert_eq!(w.matches, 2);
    }
}
