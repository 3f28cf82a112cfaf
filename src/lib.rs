//! GraphGate - query execution and safety gateway for graph databases
//!
//! GraphGate sits between an external agent and a graph database. It offers
//! two operations: `execute-read`, which runs a statement only after the
//! database's own analyzer has declared it read-only, and `execute-write`,
//! which runs anything (unless the gateway is read-only).
//!
//! # Quick Start
//!
//! ```ignore
//! use graphgate::{Gateway, GatewayConfig, RequestContext};
//!
//! let config = GatewayConfig::load("graphgate.toml".as_ref())?;
//! let gateway = Gateway::connect(&config).await?; // feature "bolt"
//!
//! let reply = gateway
//!     .handle(&RequestContext::new(), "execute-read", r#"{"query": "RETURN 1 AS num"}"#)
//!     .await;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which normalizes parameters,
//! resolves the caller's credential, classifies (read path only), executes in
//! a single-use session and formats the records. The [`Gateway`] provides the
//! typed and named-operation interfaces on top of it.

// Re-export the public API from graphgate-executor
pub use graphgate_executor::*;
