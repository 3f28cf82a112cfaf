//! Error types for gateway operations.
//!
//! Every failure of an operation is one [`Error`] variant. Errors are:
//! - **Structured**: each variant has typed fields
//! - **Serializable**: can be converted to/from JSON for the outer protocol layer
//! - **Lossless**: database messages are carried through unchanged

use serde::{Deserialize, Serialize};

/// Gateway operation errors.
///
/// # Categories
///
/// | Category | Variants | Network call made? |
/// |----------|----------|--------------------|
/// | Input | `InvalidInput`, `UnknownOperation` | no |
/// | Access | `Unauthenticated`, `AccessDenied` | no |
/// | Safety | `ClassificationFailed`, `RejectedStatement` | analysis only |
/// | Database | `SessionFailed`, `ExecutionFailed`, `UnexpectedShape` | yes |
/// | Output | `Formatting` | yes |
/// | System | `Timeout`, `Internal` | maybe |
///
/// # Example
///
/// ```ignore
/// match gateway.execute_read(&ctx, "CREATE (n)", RawParams::new()).await {
///     Ok(json) => println!("{}", json),
///     Err(Error::RejectedStatement { reason }) => eprintln!("{}", reason),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Input ====================
    /// Empty query, malformed arguments or parameters
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No operation with this name
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    // ==================== Access ====================
    /// Multi-tenant call without a usable credential
    #[error("authentication required: {reason}")]
    Unauthenticated { reason: String },

    /// Operation refused by read-only access mode
    #[error("access denied: {command} is not allowed in read-only mode")]
    AccessDenied { command: String },

    // ==================== Safety ====================
    /// The analyzer could not classify the statement; treated as a denial
    #[error("statement classification failed: {reason}")]
    ClassificationFailed { reason: String },

    /// The analyzer declared the statement not read-only on the read path
    #[error("{reason}")]
    RejectedStatement { reason: String },

    // ==================== Database ====================
    /// No session could be opened
    #[error("session error: {reason}")]
    SessionFailed { reason: String },

    /// The statement failed; `reason` is the database's own text
    #[error("{reason}")]
    ExecutionFailed { reason: String },

    /// The database answered with rows that are not well-formed records
    #[error("unexpected result shape: {reason}")]
    UnexpectedShape { reason: String },

    // ==================== Output ====================
    /// The result could not be serialized
    #[error("formatting error: {reason}")]
    Formatting { reason: String },

    // ==================== System ====================
    /// The call's deadline passed
    #[error("operation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Stable category name, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "InvalidInput",
            Error::UnknownOperation { .. } => "UnknownOperation",
            Error::Unauthenticated { .. } => "Unauthenticated",
            Error::AccessDenied { .. } => "AccessDenied",
            Error::ClassificationFailed { .. } => "ClassificationFailed",
            Error::RejectedStatement { .. } => "RejectedStatement",
            Error::SessionFailed { .. } => "SessionFailed",
            Error::ExecutionFailed { .. } => "ExecutionFailed",
            Error::UnexpectedShape { .. } => "UnexpectedShape",
            Error::Formatting { .. } => "Formatting",
            Error::Timeout { .. } => "Timeout",
            Error::Internal { .. } => "Internal",
        }
    }

    /// True for failures raised before any database call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. }
                | Error::UnknownOperation { .. }
                | Error::Unauthenticated { .. }
                | Error::AccessDenied { .. }
        )
    }
}
