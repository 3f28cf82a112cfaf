//! Command enum defining every gateway operation.
//!
//! Commands are:
//! - **Self-contained**: all parameters needed for execution are in the variant
//! - **Serializable**: can be converted to/from JSON
//! - **Pure data**: parameters stay as decoded ([`RawParams`]) until the
//!   executor normalizes them

use graphgate_core::RawParams;
use serde::{Deserialize, Serialize};

/// Name of the read operation at the protocol boundary.
pub const READ_OPERATION: &str = "execute-read";

/// Name of the write operation at the protocol boundary.
pub const WRITE_OPERATION: &str = "execute-write";

/// A self-contained, serializable gateway operation.
///
/// | Command | Output | Classified | Session routing |
/// |---------|--------|------------|-----------------|
/// | `Ping` | `Pong` | no | none |
/// | `ExecuteRead` | `Records` | yes | read |
/// | `ExecuteWrite` | `Records` | no | write |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Check that the database is reachable.
    Ping,

    /// Run a statement only if the database declares it read-only.
    ExecuteRead {
        /// Statement text
        query: String,
        /// Parameters, numbers still as literals
        #[serde(default, skip_serializing_if = "RawParams::is_empty")]
        params: RawParams,
    },

    /// Run any statement.
    ExecuteWrite {
        /// Statement text
        query: String,
        /// Parameters, numbers still as literals
        #[serde(default, skip_serializing_if = "RawParams::is_empty")]
        params: RawParams,
    },
}

impl Command {
    /// Whether this command can mutate data.
    pub fn is_write(&self) -> bool {
        matches!(self, Command::ExecuteWrite { .. })
    }

    /// Boundary name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::ExecuteRead { .. } => READ_OPERATION,
            Command::ExecuteWrite { .. } => WRITE_OPERATION,
        }
    }

    /// The statement text, for commands that carry one.
    pub fn query(&self) -> Option<&str> {
        match self {
            Command::Ping => None,
            Command::ExecuteRead { query, .. } | Command::ExecuteWrite { query, .. } => Some(query),
        }
    }
}
