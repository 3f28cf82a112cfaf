//! In-memory [`GraphClient`] with scripted answers.
//!
//! `ScriptedClient` stands in for a real database: classifications and
//! results are registered per query text, failures and delays can be
//! injected, and every analysis, session open, close and statement run is
//! counted. Clones share state, so a test can hand one clone to a gateway
//! and inspect the other.
//!
//! ```ignore
//! let client = ScriptedClient::new()
//!     .classify("RETURN 1 AS num", StatementType::ReadOnly)
//!     .respond("RETURN 1 AS num", QueryResult::single("num", Value::Int(1)));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use graphgate_core::Params;
use graphgate_security::{Credential, TransportMode};
use parking_lot::Mutex;

use crate::classifier::ANALYSIS_PREFIX;
use crate::client::{GraphClient, GraphSession, QueryResult, RoutingHint, SessionRequest, StatementType};
use crate::{Error, Result};

/// Computes a statement's result from its parameters.
pub type Handler = Arc<dyn Fn(&Params) -> Result<QueryResult> + Send + Sync>;

#[derive(Clone)]
enum Response {
    Rows(QueryResult),
    Fail(String),
    Handler(Handler),
}

#[derive(Default)]
struct Script {
    classifications: HashMap<String, StatementType>,
    default_classification: Option<StatementType>,
    responses: HashMap<String, Response>,
    fail_analysis: Option<String>,
    fail_open: Option<String>,
    fail_connectivity: Option<String>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    script: Mutex<Script>,
    analyses: AtomicUsize,
    opens: AtomicUsize,
    closes: AtomicUsize,
    runs: AtomicUsize,
    sessions: Mutex<Vec<SessionRecord>>,
    executed: Mutex<Vec<String>>,
    analyzed: Mutex<Vec<String>>,
}

/// Call counters of a [`ScriptedClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptStats {
    /// Analysis calls that reached the client
    pub analyses: usize,
    /// Sessions successfully opened
    pub opens: usize,
    /// Sessions released, by `close` or by drop
    pub closes: usize,
    /// Statements run inside a session
    pub runs: usize,
}

/// What a session was opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Credential passed in the request
    pub credential: Credential,
    /// Transport mode passed in the request
    pub mode: TransportMode,
    /// Routing hint passed in the request
    pub routing: RoutingHint,
    /// Target database passed in the request
    pub database: Option<String>,
}

/// Scripted substitute for a graph database.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    shared: Arc<Shared>,
}

impl ScriptedClient {
    /// A client that classifies everything as `Unknown` and answers every
    /// statement with an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the statement type the analyzer reports for `query`.
    pub fn classify(self, query: &str, declared: StatementType) -> Self {
        self.shared
            .script
            .lock()
            .classifications
            .insert(query.to_string(), declared);
        self
    }

    /// Statement type reported for queries without their own classification.
    pub fn classify_all(self, declared: StatementType) -> Self {
        self.shared.script.lock().default_classification = Some(declared);
        self
    }

    /// Answer `query` with `result`.
    pub fn respond(self, query: &str, result: QueryResult) -> Self {
        self.shared
            .script
            .lock()
            .responses
            .insert(query.to_string(), Response::Rows(result));
        self
    }

    /// Answer `query` by calling `handler` with the statement's parameters.
    pub fn respond_with<F>(self, query: &str, handler: F) -> Self
    where
        F: Fn(&Params) -> Result<QueryResult> + Send + Sync + 'static,
    {
        self.shared
            .script
            .lock()
            .responses
            .insert(query.to_string(), Response::Handler(Arc::new(handler)));
        self
    }

    /// Fail `query`'s transaction with `message`.
    pub fn fail_query(self, query: &str, message: &str) -> Self {
        self.shared
            .script
            .lock()
            .responses
            .insert(query.to_string(), Response::Fail(message.to_string()));
        self
    }

    /// Fail every analysis call.
    pub fn fail_analysis(self, message: &str) -> Self {
        self.shared.script.lock().fail_analysis = Some(message.to_string());
        self
    }

    /// Fail every session open.
    pub fn fail_open(self, message: &str) -> Self {
        self.shared.script.lock().fail_open = Some(message.to_string());
        self
    }

    /// Fail the connectivity check.
    pub fn fail_connectivity(self, message: &str) -> Self {
        self.shared.script.lock().fail_connectivity = Some(message.to_string());
        self
    }

    /// Sleep for `delay` inside every analysis call and statement run.
    pub fn delay(self, delay: Duration) -> Self {
        self.shared.script.lock().delay = Some(delay);
        self
    }

    /// Current counters.
    pub fn stats(&self) -> ScriptStats {
        ScriptStats {
            analyses: self.shared.analyses.load(Ordering::SeqCst),
            opens: self.shared.opens.load(Ordering::SeqCst),
            closes: self.shared.closes.load(Ordering::SeqCst),
            runs: self.shared.runs.load(Ordering::SeqCst),
        }
    }

    /// Every session opened so far, in order.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.shared.sessions.lock().clone()
    }

    /// Every statement run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.shared.executed.lock().clone()
    }

    /// Every analysis statement received so far, in order.
    pub fn analyzed(&self) -> Vec<String> {
        self.shared.analyzed.lock().clone()
    }

    fn current_delay(&self) -> Option<Duration> {
        self.shared.script.lock().delay
    }
}

#[async_trait]
impl GraphClient for ScriptedClient {
    async fn verify_connectivity(&self) -> Result<()> {
        match self.shared.script.lock().fail_connectivity.clone() {
            Some(reason) => Err(Error::Connectivity { reason }),
            None => Ok(()),
        }
    }

    async fn run_analysis(
        &self,
        statement: &str,
        _params: &Params,
        _request: &SessionRequest<'_>,
    ) -> Result<StatementType> {
        self.shared.analyses.fetch_add(1, Ordering::SeqCst);
        self.shared.analyzed.lock().push(statement.to_string());

        if let Some(delay) = self.current_delay() {
            tokio::time::sleep(delay).await;
        }

        let script = self.shared.script.lock();
        if let Some(reason) = script.fail_analysis.clone() {
            return Err(Error::Analysis { reason });
        }
        let query = statement.strip_prefix(ANALYSIS_PREFIX).unwrap_or(statement);
        Ok(script
            .classifications
            .get(query)
            .copied()
            .or(script.default_classification)
            .unwrap_or(StatementType::Unknown))
    }

    async fn open_session(&self, request: &SessionRequest<'_>) -> Result<Box<dyn GraphSession>> {
        if let Some(reason) = self.shared.script.lock().fail_open.clone() {
            return Err(Error::SessionOpen { reason });
        }

        self.shared.opens.fetch_add(1, Ordering::SeqCst);
        self.shared.sessions.lock().push(SessionRecord {
            credential: request.credential.clone(),
            mode: request.mode,
            routing: request.routing,
            database: request.database.map(str::to_string),
        });

        Ok(Box::new(ScriptedSession {
            shared: Arc::clone(&self.shared),
            closed: false,
        }))
    }
}

struct ScriptedSession {
    shared: Arc<Shared>,
    closed: bool,
}

impl ScriptedSession {
    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.shared.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl GraphSession for ScriptedSession {
    async fn run(&mut self, query: &str, params: &Params) -> Result<QueryResult> {
        if self.closed {
            return Err(Error::execution("session is closed"));
        }
        self.shared.runs.fetch_add(1, Ordering::SeqCst);
        self.shared.executed.lock().push(query.to_string());

        let (delay, response) = {
            let script = self.shared.script.lock();
            (script.delay, script.responses.get(query).cloned())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            None => Ok(QueryResult::empty()),
            Some(Response::Rows(result)) => Ok(result),
            Some(Response::Fail(message)) => Err(Error::execution(message)),
            Some(Response::Handler(handler)) => handler(params),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.release();
        Ok(())
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.release();
    }
}
