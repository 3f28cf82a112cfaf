//! Error conversion from engine error types.
//!
//! Engine errors map to the executor variant for the stage they come from.
//! The database's message is carried over unchanged.

use crate::Error;
use graphgate_engine::Error as EngineError;

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Analysis { reason } => Error::ClassificationFailed { reason },
            EngineError::SessionOpen { reason } | EngineError::Connectivity { reason } => {
                Error::SessionFailed { reason }
            }
            EngineError::Execution { reason } => Error::ExecutionFailed { reason },
            EngineError::UnexpectedShape { reason } => Error::UnexpectedShape { reason },
            EngineError::Config { reason } => Error::Internal { reason },
        }
    }
}

/// Classification stage: any engine failure is a classification failure,
/// including a session that could not be opened for the analysis call.
pub(crate) fn classification_error(err: EngineError) -> Error {
    Error::ClassificationFailed {
        reason: err.to_string(),
    }
}
