//! Access control and credential handling for GraphGate.
//!
//! This crate provides the types that decide *who* a query runs as and
//! *what* it may do:
//!
//! - [`AccessMode`]: whether the write operation is offered at all
//! - [`TransportMode`]: single-tenant (one configured credential) or
//!   multi-tenant (each call brings its own)
//! - [`Credential`] and [`RequestContext`]: the per-call credential carrier
//! - [`resolve_credential`]: picks the credential a call runs with
//! - [`GatewayOptions`]: the immutable startup configuration of a gateway

#![warn(missing_docs)]

mod credential;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use credential::{resolve_credential, Credential, RequestContext};

/// Controls whether the gateway allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode: the write operation is refused and not advertised.
    ReadOnly,
}

/// Where a call's credential comes from. Fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    /// One credential, configured at startup, serves every caller.
    #[default]
    SingleTenant,
    /// Every call carries its own credential; there is no fallback.
    MultiTenant,
}

impl TransportMode {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::SingleTenant => "single-tenant",
            TransportMode::MultiTenant => "multi-tenant",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized transport mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode '{0}', expected \"single-tenant\" or \"multi-tenant\"")]
pub struct ParseTransportModeError(pub String);

impl FromStr for TransportMode {
    type Err = ParseTransportModeError;

    /// Accepts the canonical names plus the transport aliases `stdio`
    /// (single-tenant) and `http` (multi-tenant), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-tenant" | "single_tenant" | "stdio" => Ok(TransportMode::SingleTenant),
            "multi-tenant" | "multi_tenant" | "http" => Ok(TransportMode::MultiTenant),
            _ => Err(ParseTransportModeError(s.to_string())),
        }
    }
}

/// Startup configuration of a gateway.
///
/// Built once, then shared read-only by every call. Use the builder methods:
///
/// ```ignore
/// use graphgate_security::{AccessMode, Credential, GatewayOptions, TransportMode};
///
/// let opts = GatewayOptions::new()
///     .transport_mode(TransportMode::SingleTenant)
///     .credential(Credential::basic("neo4j", "secret"))
///     .access_mode(AccessMode::ReadOnly)
///     .database("neo4j");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    /// Where call credentials come from.
    pub transport_mode: TransportMode,
    /// The credential used in single-tenant mode. Ignored in multi-tenant mode.
    pub static_credential: Credential,
    /// Whether the write operation is available.
    pub access_mode: AccessMode,
    /// Target database name; `None` means the server default.
    pub database: Option<String>,
    /// Deadline applied to calls that do not bring their own.
    pub default_timeout: Option<Duration>,
}

impl GatewayOptions {
    /// Create options with defaults (single-tenant, no credential, read-write).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport mode.
    pub fn transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    /// Set the single-tenant credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.static_credential = credential;
        self
    }

    /// Set the access mode.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the target database name.
    pub fn database(mut self, name: &str) -> Self {
        self.database = Some(name.to_string());
        self
    }

    /// Set the default per-call timeout.
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}
