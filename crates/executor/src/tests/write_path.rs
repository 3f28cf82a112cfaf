//! Write path tests: no classification, write routing.

use graphgate_engine::{QueryResult, RoutingHint, ScriptedClient, StatementType};

use super::gateway;
use crate::json::parse_params;
use crate::{Error, GatewayOptions, RawParams, RequestContext, Value};

#[tokio::test]
async fn test_write_skips_classification() {
    let client = ScriptedClient::new()
        .classify("CREATE (n:Test) RETURN count(n) AS created", StatementType::WriteOnly)
        .respond(
            "CREATE (n:Test) RETURN count(n) AS created",
            QueryResult::single("created", Value::Int(1)),
        );
    let gw = gateway(&client, GatewayOptions::new());

    let json = gw
        .execute_write(
            &RequestContext::new(),
            "CREATE (n:Test) RETURN count(n) AS created",
            RawParams::new(),
        )
        .await
        .unwrap();

    assert_eq!(json, "[\n  {\n    \"created\": 1\n  }\n]");
    assert_eq!(client.stats().analyses, 0);
    assert_eq!(client.sessions()[0].routing, RoutingHint::Write);
}

#[tokio::test]
async fn test_write_without_return_is_empty_array() {
    let client = ScriptedClient::new();
    let gw = gateway(&client, GatewayOptions::new());

    let json = gw
        .execute_write(&RequestContext::new(), "CREATE (n:Test)", RawParams::new())
        .await
        .unwrap();
    assert_eq!(json, "[]");
    assert_eq!(client.executed(), vec!["CREATE (n:Test)".to_string()]);
}

#[tokio::test]
async fn test_write_parameters_are_normalized() {
    let query = "CREATE (n:Item {qty: $qty, price: $price}) RETURN n.qty AS qty, n.price AS price";
    let client = ScriptedClient::new().respond_with(query, |params| {
        Ok(QueryResult::new(
            vec!["qty".into(), "price".into()],
            vec![vec![params["qty"].clone(), params["price"].clone()]],
        ))
    });
    let gw = gateway(&client, GatewayOptions::new());

    let params = parse_params(r#"{"qty": 3.0, "price": 9.99}"#).unwrap();
    let json = gw
        .execute_write(&RequestContext::new(), query, params)
        .await
        .unwrap();

    assert_eq!(json, "[\n  {\n    \"price\": 9.99,\n    \"qty\": 3\n  }\n]");
}

#[tokio::test]
async fn test_constraint_violation_text_is_preserved() {
    let text = "Node(12) already exists with label `User` and property `email` = 'a@b.c'";
    let client = ScriptedClient::new().fail_query("CREATE (:User {email: 'a@b.c'})", text);
    let gw = gateway(&client, GatewayOptions::new());

    let err = gw
        .execute_write(
            &RequestContext::new(),
            "CREATE (:User {email: 'a@b.c'})",
            RawParams::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), text);
}

#[tokio::test]
async fn test_session_open_failure() {
    let client = ScriptedClient::new().fail_open("The client is unauthorized due to authentication failure.");
    let gw = gateway(&client, GatewayOptions::new());

    let err = gw
        .execute_write(&RequestContext::new(), "CREATE (n)", RawParams::new())
        .await
        .unwrap_err();
    match err {
        Error::SessionFailed { reason } => assert!(reason.contains("authentication failure")),
        other => panic!("expected SessionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_result_is_not_empty() {
    let client = ScriptedClient::new().respond(
        "RETURN 1",
        QueryResult::new(vec![], vec![vec![Value::Int(1)]]),
    );
    let gw = gateway(&client, GatewayOptions::new());

    let result = gw
        .execute_write(&RequestContext::new(), "RETURN 1", RawParams::new())
        .await;
    assert!(matches!(result, Err(Error::UnexpectedShape { .. })));
    assert_eq!(client.stats().closes, 1);
}

#[tokio::test]
async fn test_non_finite_result_is_formatting_error() {
    let client = ScriptedClient::new().respond("RETURN 0.0/0.0 AS x", QueryResult::single("x", Value::Float(f64::NAN)));
    let gw = gateway(&client, GatewayOptions::new());

    let result = gw
        .execute_write(&RequestContext::new(), "RETURN 0.0/0.0 AS x", RawParams::new())
        .await;
    assert!(matches!(result, Err(Error::Formatting { .. })));
    assert_eq!(client.stats().closes, 1);
}
