//! Database layer for GraphGate
//!
//! This crate is the only place that talks to the graph database:
//! - GraphClient / GraphSession: the narrow capability seam over a driver
//! - Statement classification through the database's own analyzer
//! - Session execution with release on every exit path
//! - GatewayConfig: `graphgate.toml` loading and validation
//! - ScriptedClient: in-memory substitute for tests
//! - BoltClient: the `neo4rs` backend (feature `bolt`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod scripted;
pub mod session;

#[cfg(feature = "bolt")]
pub mod bolt;

pub use classifier::{analysis_statement, classify, ClassificationResult, ANALYSIS_PREFIX};
pub use client::{GraphClient, GraphSession, QueryResult, RoutingHint, SessionRequest, StatementType};
pub use config::{CredentialsConfig, GatewayConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use scripted::{ScriptStats, ScriptedClient, SessionRecord};
pub use session::{collect_records, execute_in_session};

#[cfg(feature = "bolt")]
pub use bolt::BoltClient;
