//! Database capability traits.
//!
//! The gateway never touches a driver directly. It sees the database through
//! [`GraphClient`] (analysis, sessions, connectivity) and [`GraphSession`]
//! (one statement, then close), so any backend can be substituted: the
//! Bolt driver in production, [`ScriptedClient`](crate::ScriptedClient) in tests.

use async_trait::async_trait;
use graphgate_core::{Params, Value};
use graphgate_security::{Credential, TransportMode};

use crate::Result;

/// Preferred cluster member for a session. Never an authorization input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingHint {
    /// Route to a read replica if available.
    Read,
    /// Route to the primary/writer.
    Write,
}

impl RoutingHint {
    /// Lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingHint::Read => "read",
            RoutingHint::Write => "write",
        }
    }
}

/// Statement type as declared by the database's static analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementType {
    /// Reads only (`r`)
    ReadOnly,
    /// Reads and writes (`rw`)
    ReadWrite,
    /// Writes only (`w`)
    WriteOnly,
    /// Schema or administration changes (`s`)
    SchemaWrite,
    /// Missing or unrecognized type
    Unknown,
}

impl StatementType {
    /// Map the wire code reported in a result summary.
    pub fn from_code(code: &str) -> Self {
        match code {
            "r" => StatementType::ReadOnly,
            "rw" => StatementType::ReadWrite,
            "w" => StatementType::WriteOnly,
            "s" => StatementType::SchemaWrite,
            _ => StatementType::Unknown,
        }
    }
}

/// Everything a backend needs to scope one session or analysis call.
#[derive(Debug, Clone, Copy)]
pub struct SessionRequest<'a> {
    /// Credential resolved for this call
    pub credential: &'a Credential,
    /// Deployment mode; decides whether `credential` or the pool's own is used
    pub mode: TransportMode,
    /// Read or write routing
    pub routing: RoutingHint,
    /// Target database, `None` for the server default
    pub database: Option<&'a str>,
}

/// A statement's raw answer: declared field names plus value rows.
///
/// Rows are not trusted to match `keys`; the session executor validates
/// the shape before building records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    /// Declared field names, in order
    pub keys: Vec<String>,
    /// One vector of values per row
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Build a result from keys and rows.
    pub fn new(keys: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { keys, rows }
    }

    /// A result with no fields and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One row with one field.
    pub fn single(key: &str, value: Value) -> Self {
        Self {
            keys: vec![key.to_string()],
            rows: vec![vec![value]],
        }
    }
}

/// Process-wide handle to the database.
///
/// Implementations own the connection pool and must be safe to share across
/// concurrent calls.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Check that the database is reachable.
    async fn verify_connectivity(&self) -> Result<()>;

    /// Run a non-destructive analysis statement (e.g. `EXPLAIN <query>`) and
    /// report the statement type the analyzer declared.
    async fn run_analysis(
        &self,
        statement: &str,
        params: &Params,
        request: &SessionRequest<'_>,
    ) -> Result<StatementType>;

    /// Open a single-use session.
    async fn open_session(&self, request: &SessionRequest<'_>) -> Result<Box<dyn GraphSession>>;
}

/// A single-use database session.
///
/// Release contract: [`close`](GraphSession::close) releases the session
/// gracefully and is idempotent. A session dropped without being closed
/// (cancellation, panic) must still release its connection in `Drop`.
#[async_trait]
pub trait GraphSession: Send {
    /// Execute `query` in one managed transaction and collect every row.
    async fn run(&mut self, query: &str, params: &Params) -> Result<QueryResult>;

    /// Release the session.
    async fn close(&mut self) -> Result<()>;
}
