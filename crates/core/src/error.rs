//! Error types for GraphGate core
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// A result row that cannot be turned into a [`ResultRecord`](crate::ResultRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordShapeError {
    /// Field and value counts differ
    #[error("record has {values} values for {fields} fields")]
    LengthMismatch {
        /// Number of declared fields
        fields: usize,
        /// Number of values in the row
        values: usize,
    },

    /// The same field name was declared twice
    #[error("duplicate field '{field}' in record")]
    DuplicateField {
        /// Repeated field name
        field: String,
    },
}
