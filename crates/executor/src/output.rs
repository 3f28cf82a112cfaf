//! Output enum for command results.

use serde::{Deserialize, Serialize};

/// Successful command results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Connectivity check succeeded
    Pong {
        /// Gateway version
        version: String,
    },

    /// Formatted result set: a pretty-printed JSON array of objects
    Records(String),
}

impl Output {
    /// The formatted records, if this is a `Records` output.
    pub fn into_records(self) -> Option<String> {
        match self {
            Output::Records(json) => Some(json),
            Output::Pong { .. } => None,
        }
    }
}
