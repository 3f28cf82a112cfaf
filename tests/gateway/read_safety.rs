//! Read-path safety: nothing but an analyzer-declared read reaches a session.

use graphgate::{Error, GatewayOptions, RawParams, RequestContext, StatementType};
use graphgate_engine::ScriptedClient;

use crate::common::*;

#[tokio::test]
async fn non_read_statements_never_execute() {
    let statements = [
        ("CREATE (n:Test)", StatementType::WriteOnly),
        ("MATCH (n) SET n.x = 1 RETURN n", StatementType::ReadWrite),
        ("CREATE INDEX FOR (n:User) ON (n.email)", StatementType::SchemaWrite),
        ("CALL db.unknownProcedure()", StatementType::Unknown),
    ];

    for (query, declared) in statements {
        let db = ScriptedClient::new().classify(query, declared);
        let gw = gateway_over(&db, GatewayOptions::new());

        let result = gw
            .execute_read(&RequestContext::new(), query, RawParams::new())
            .await;

        assert!(
            matches!(
                result,
                Err(Error::RejectedStatement { .. }) | Err(Error::ClassificationFailed { .. })
            ),
            "{} -> {:?}",
            query,
            result
        );
        assert_eq!(db.stats().opens, 0, "{}", query);
        assert!(db.executed().is_empty(), "{}", query);
    }
}

#[tokio::test]
async fn keyword_in_literal_is_not_guessed() {
    let query = "RETURN 'DELETE everything' AS note // CREATE";
    let db = ScriptedClient::new().classify(query, StatementType::ReadOnly);
    let gw = gateway_over(&db, GatewayOptions::new());

    let result = gw
        .execute_read(&RequestContext::new(), query, RawParams::new())
        .await;
    assert_eq!(result, Ok("[]".to_string()));
}

#[tokio::test]
async fn analyzer_outage_denies() {
    let db = ScriptedClient::new().fail_analysis("ServiceUnavailable");
    let gw = gateway_over(&db, GatewayOptions::new());

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("RETURN 1", None))
        .await;
    assert!(reply.is_error);
    assert!(reply.content.starts_with("statement classification failed"));
    assert_eq!(db.stats().opens, 0);
}
