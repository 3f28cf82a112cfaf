//! Scenario C and numeric typing across the JSON boundary.

use graphgate::{normalize, GatewayOptions, QueryResult, RawValue, RequestContext, StatementType, Value};
use graphgate_engine::ScriptedClient;

use crate::common::*;

const LIMIT_QUERY: &str = "MATCH (n) RETURN n LIMIT $limit";

/// A database whose LIMIT clause only accepts integers, like the real one.
fn strict_limit_db() -> ScriptedClient {
    ScriptedClient::new()
        .classify(LIMIT_QUERY, StatementType::ReadOnly)
        .respond_with(LIMIT_QUERY, |params| match params.get("limit") {
            Some(Value::Int(n)) if *n >= 0 => {
                let rows = (0..*n).map(|i| vec![Value::Int(i)]).collect();
                Ok(QueryResult::new(vec!["n".into()], rows))
            }
            other => Err(graphgate_engine::Error::execution(format!(
                "Invalid input. '{:?}' is not a valid value. Must be a non-negative integer.",
                other
            ))),
        })
}

#[tokio::test]
async fn scenario_c_float_notation_limit() {
    let db = strict_limit_db();
    let gw = gateway_over(&db, GatewayOptions::new());

    let reply = gw
        .handle(
            &RequestContext::new(),
            "execute-read",
            &args(LIMIT_QUERY, Some(r#"{"limit": 1.0}"#)),
        )
        .await;

    assert!(!reply.is_error, "{}", reply.content);
    let rows: Vec<serde_json::Value> = serde_json::from_str(&reply.content).unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn fractional_limit_reaches_database_as_float() {
    let db = strict_limit_db();
    let gw = gateway_over(&db, GatewayOptions::new());

    let reply = gw
        .handle(
            &RequestContext::new(),
            "execute-read",
            &args(LIMIT_QUERY, Some(r#"{"limit": 1.5}"#)),
        )
        .await;

    assert!(reply.is_error);
    assert!(reply.content.contains("Float(1.5)"), "{}", reply.content);
}

#[test]
fn normalizer_on_decoded_payload() {
    let raw = RawValue::parse(r#"{"limit": 1.0, "ids": [1, 2.5, 1e400]}"#).unwrap();
    let value = normalize(raw);
    let map = value.as_map().unwrap();
    assert_eq!(map["limit"], Value::Int(1));
    assert_eq!(
        map["ids"],
        Value::List(vec![Value::Int(1), Value::Float(2.5), Value::from("1e400")])
    );
    assert_eq!(normalize(value.clone()), value);
}
