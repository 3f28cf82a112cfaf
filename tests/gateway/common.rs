//! Common test utilities for gateway tests

use std::sync::Arc;

use graphgate::{Gateway, GatewayOptions, QueryResult, StatementType, Value};
use graphgate_engine::ScriptedClient;

/// A database that knows `RETURN 1 as num` (read-only) and
/// `CREATE (n:Test)` (write).
pub fn scripted_db() -> ScriptedClient {
    ScriptedClient::new()
        .classify("RETURN 1 as num", StatementType::ReadOnly)
        .respond("RETURN 1 as num", QueryResult::single("num", Value::Int(1)))
        .classify("CREATE (n:Test)", StatementType::WriteOnly)
}

/// Gateway over a clone of `client`.
pub fn gateway_over(client: &ScriptedClient, options: GatewayOptions) -> Gateway {
    Gateway::new(Arc::new(client.clone()), options)
}

/// `{"query": ..., "params": ...}` argument text.
pub fn args(query: &str, params: Option<&str>) -> String {
    let query = serde_json::to_string(query).unwrap();
    match params {
        Some(p) => format!(r#"{{"query": {}, "params": {}}}"#, query, p),
        None => format!(r#"{{"query": {}}}"#, query),
    }
}
