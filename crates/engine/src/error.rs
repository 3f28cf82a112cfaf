//! Engine error types.
//!
//! Each variant is one failure class of the database capability layer. The
//! database's own message is kept verbatim in `reason`.

use graphgate_core::RecordShapeError;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while talking to the database or loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The static-analysis call failed or returned no usable answer
    #[error("statement analysis failed: {reason}")]
    Analysis {
        /// Driver or database message
        reason: String,
    },

    /// A session could not be opened (connectivity, rejected credential, ...)
    #[error("could not open session: {reason}")]
    SessionOpen {
        /// Driver or database message
        reason: String,
    },

    /// The statement's transaction failed
    #[error("{reason}")]
    Execution {
        /// Database error text, unmodified
        reason: String,
    },

    /// The database answered with something that is not a well-formed record stream
    #[error("unexpected result shape: {reason}")]
    UnexpectedShape {
        /// What was wrong
        reason: String,
    },

    /// The connectivity check failed
    #[error("database unreachable: {reason}")]
    Connectivity {
        /// Driver message
        reason: String,
    },

    /// Configuration could not be read or is invalid
    #[error("invalid configuration: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::Execution`].
    pub fn execution(reason: impl Into<String>) -> Self {
        Error::Execution {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::SessionOpen`].
    pub fn session_open(reason: impl Into<String>) -> Self {
        Error::SessionOpen {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Config`].
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// The message without the category prefix.
    pub fn reason(&self) -> &str {
        match self {
            Error::Analysis { reason }
            | Error::SessionOpen { reason }
            | Error::Execution { reason }
            | Error::UnexpectedShape { reason }
            | Error::Connectivity { reason }
            | Error::Config { reason } => reason,
        }
    }
}

impl From<RecordShapeError> for Error {
    fn from(e: RecordShapeError) -> Self {
        Error::UnexpectedShape {
            reason: e.to_string(),
        }
    }
}
