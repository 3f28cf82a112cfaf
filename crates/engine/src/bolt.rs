//! Bolt backend over the `neo4rs` driver.
//!
//! Single-tenant calls share one pooled `Graph` built from the configured
//! credential. Multi-tenant calls get a connection built from the caller's
//! basic credential for the duration of the call. Bearer tokens are not
//! supported by the driver's handshake and are refused at session open.
//!
//! Connections go straight to the configured URI; the routing hint is
//! logged but does not select a cluster member.

use std::sync::Arc;

use async_trait::async_trait;
use graphgate_core::{Params, Value};
use graphgate_security::{Credential, TransportMode};
use neo4rs::{
    query, BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph, Query,
};
use tracing::{debug, info};

use crate::client::{GraphClient, GraphSession, QueryResult, SessionRequest, StatementType};
use crate::config::GatewayConfig;
use crate::{Error, Result};

/// [`GraphClient`] backed by a Bolt connection pool.
pub struct BoltClient {
    uri: String,
    database: Option<String>,
    fetch_size: usize,
    shared: Arc<Graph>,
}

impl BoltClient {
    /// Connect using `config`. The shared pool authenticates with the
    /// configured static credential.
    pub async fn connect(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let credential = config.static_credential();
        let shared = build_graph(
            &config.uri,
            config.database.as_deref(),
            config.fetch_size,
            &credential,
        )
        .await?;
        info!(target: "graphgate::bolt", uri = %config.uri, credential = credential.kind(), "Connected");
        Ok(Self {
            uri: config.uri.clone(),
            database: config.database.clone(),
            fetch_size: config.fetch_size,
            shared: Arc::new(shared),
        })
    }

    async fn graph_for(&self, request: &SessionRequest<'_>) -> Result<Arc<Graph>> {
        match request.mode {
            TransportMode::SingleTenant if request.database == self.database.as_deref() => {
                Ok(Arc::clone(&self.shared))
            }
            TransportMode::SingleTenant | TransportMode::MultiTenant => {
                let database = request.database.or(self.database.as_deref());
                let graph =
                    build_graph(&self.uri, database, self.fetch_size, request.credential).await?;
                Ok(Arc::new(graph))
            }
        }
    }
}

async fn build_graph(
    uri: &str,
    database: Option<&str>,
    fetch_size: usize,
    credential: &Credential,
) -> Result<Graph> {
    let (user, password) = match credential {
        Credential::None => ("", ""),
        Credential::Basic { username, password } => (username.as_str(), password.as_str()),
        Credential::Bearer { .. } => {
            return Err(Error::session_open(
                "bearer token authentication is not supported by the Bolt backend",
            ))
        }
    };

    let mut builder = ConfigBuilder::default()
        .uri(uri)
        .user(user)
        .password(password)
        .fetch_size(fetch_size);
    if let Some(db) = database {
        builder = builder.db(db);
    }
    let config = builder
        .build()
        .map_err(|e| Error::session_open(e.to_string()))?;
    // The pool connects lazily; credentials are checked on first use.
    Graph::connect(config).map_err(|e| Error::session_open(e.to_string()))
}

fn to_query(text: &str, params: &Params) -> Query {
    params
        .iter()
        .fold(query(text), |q, (key, value)| q.param(key, to_bolt(value)))
}

/// Convert a typed value, keeping integers and floats apart.
fn to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Int(i) => BoltType::Integer(BoltInteger::new(*i)),
        Value::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::List(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Map(map) => {
            let mut bolt = BoltMap::new();
            for (k, v) in map {
                bolt.put(BoltString::new(k), to_bolt(v));
            }
            BoltType::Map(bolt)
        }
    }
}

#[async_trait]
impl GraphClient for BoltClient {
    async fn verify_connectivity(&self) -> Result<()> {
        self.shared
            .run(query("RETURN 1"))
            .await
            .map_err(|e| Error::Connectivity {
                reason: e.to_string(),
            })
    }

    async fn run_analysis(
        &self,
        statement: &str,
        params: &Params,
        request: &SessionRequest<'_>,
    ) -> Result<StatementType> {
        let graph = self.graph_for(request).await?;
        let analysis = |e: neo4rs::Error| Error::Analysis {
            reason: e.to_string(),
        };

        let stream = graph
            .execute(to_query(statement, params))
            .await
            .map_err(analysis)?;
        let summary = stream.finish().await.map_err(analysis)?;
        let declared = summary
            .map(|s| statement_type(&s.query_type))
            .unwrap_or(StatementType::Unknown);
        debug!(target: "graphgate::bolt", declared = ?declared, "Analysis complete");
        Ok(declared)
    }

    async fn open_session(&self, request: &SessionRequest<'_>) -> Result<Box<dyn GraphSession>> {
        let graph = self.graph_for(request).await?;
        debug!(
            target: "graphgate::bolt",
            routing = request.routing.as_str(),
            credential = request.credential.kind(),
            "Session acquired"
        );
        Ok(Box::new(BoltSession { graph: Some(graph) }))
    }
}

fn statement_type(declared: &neo4rs::summary::Type) -> StatementType {
    use neo4rs::summary::Type;
    match declared {
        Type::Read => StatementType::ReadOnly,
        Type::ReadWrite => StatementType::ReadWrite,
        Type::Write => StatementType::WriteOnly,
        Type::Schema => StatementType::SchemaWrite,
    }
}

/// One call's hold on a pooled or per-call connection.
///
/// Pooled connections return to the pool when dropped, so dropping the
/// session without `close` still releases it.
struct BoltSession {
    graph: Option<Arc<Graph>>,
}

#[async_trait]
impl GraphSession for BoltSession {
    async fn run(&mut self, text: &str, params: &Params) -> Result<QueryResult> {
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| Error::execution("session is closed"))?;
        let exec = |e: neo4rs::Error| Error::execution(e.to_string());

        let mut txn = graph.start_txn().await.map_err(exec)?;
        let mut stream = txn.execute(to_query(text, params)).await.map_err(exec)?;

        let mut keys: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await.map_err(exec)? {
            let names: Vec<String> = row.keys().into_iter().map(|k| k.value).collect();
            let mut values = Vec::with_capacity(names.len());
            for name in &names {
                let value: Value = row.get(name).map_err(|e| Error::UnexpectedShape {
                    reason: format!("field '{}': {}", name, e),
                })?;
                values.push(value);
            }
            keys.get_or_insert(names);
            rows.push(values);
        }
        txn.commit().await.map_err(exec)?;

        Ok(QueryResult::new(keys.unwrap_or_default(), rows))
    }

    async fn close(&mut self) -> Result<()> {
        self.graph = None;
        Ok(())
    }
}
