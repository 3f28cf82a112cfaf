//! # GraphGate Executor
//!
//! The public API of GraphGate - a query gateway that lets an external agent
//! run graph queries without ever letting the read operation mutate data.
//!
//! This is the only crate users need to import. It provides:
//! - [`Gateway`] - typed operations plus the named-operation boundary
//! - [`Executor`] - the pipeline behind every operation
//! - [`Command`]/[`Output`] - low-level command interface
//!
//! ## Quick Start
//!
//! ```text
//! use graphgate_executor::{Gateway, GatewayOptions, RequestContext, RawParams};
//!
//! let gateway = Gateway::new(client, GatewayOptions::new());
//! let json = gateway
//!     .execute_read(&RequestContext::new(), "RETURN 1 AS num", RawParams::new())
//!     .await?;
//! assert_eq!(json, "[\n  {\n    \"num\": 1\n  }\n]");
//! ```
//!
//! ## Operations
//!
//! | Operation | Classified | May write |
//! |-----------|------------|-----------|
//! | `execute-read` | yes, by the database's analyzer | never |
//! | `execute-write` | no | yes (unless read-only mode) |

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod format;
mod gateway;
pub mod json;
mod operations;
mod output;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::{Command, READ_OPERATION, WRITE_OPERATION};
pub use error::Error;
pub use executor::{Executor, NOT_READ_ONLY};
pub use format::format_records;
pub use gateway::{Gateway, Reply};
pub use operations::{operations, OperationDescriptor};
pub use output::Output;

// Re-export value types so users don't need graphgate-core directly
pub use graphgate_core::{normalize, normalize_params, Params, RawParams, RawValue, Value};

// Re-export security types so users don't need graphgate-security directly
pub use graphgate_security::{AccessMode, Credential, GatewayOptions, RequestContext, TransportMode};

// Re-export database seam and configuration types
pub use graphgate_engine::{GatewayConfig, GraphClient, GraphSession, QueryResult, StatementType};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
