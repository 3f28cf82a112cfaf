//! The reference scenarios, run through the named-operation boundary.

use graphgate::{Credential, GatewayOptions, RequestContext, TransportMode};

use crate::common::*;

#[tokio::test]
async fn scenario_a_return_one() {
    let db = scripted_db();
    let gw = gateway_over(&db, GatewayOptions::new().credential(Credential::basic("neo4j", "pw")));

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("RETURN 1 as num", None))
        .await;

    assert!(!reply.is_error, "{}", reply.content);
    let parsed: serde_json::Value = serde_json::from_str(&reply.content).unwrap();
    assert_eq!(parsed, serde_json::json!([{"num": 1}]));
    assert_eq!(reply.content, "[\n  {\n    \"num\": 1\n  }\n]");
}

#[tokio::test]
async fn scenario_b_create_through_read_is_rejected() {
    let db = scripted_db();
    let gw = gateway_over(&db, GatewayOptions::new());

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("CREATE (n:Test)", None))
        .await;

    assert!(reply.is_error);
    assert!(reply.content.contains("write operations must use the execute-write operation"));
    assert!(db.executed().is_empty());
}

#[tokio::test]
async fn scenario_d_multi_tenant_without_credential() {
    let db = scripted_db();
    let gw = gateway_over(&db, GatewayOptions::new().transport_mode(TransportMode::MultiTenant));

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("RETURN 1 as num", None))
        .await;

    assert!(reply.is_error);
    assert!(reply.content.starts_with("authentication required"));
    assert_eq!(db.stats().analyses, 0);
    assert_eq!(db.stats().opens, 0);
}

#[tokio::test]
async fn scenario_e_empty_query() {
    for mode in [TransportMode::SingleTenant, TransportMode::MultiTenant] {
        let db = scripted_db();
        let gw = gateway_over(&db, GatewayOptions::new().transport_mode(mode));

        for op in ["execute-read", "execute-write"] {
            let reply = gw.handle(&RequestContext::new(), op, &args("  ", None)).await;
            assert!(reply.is_error);
            assert!(reply.content.starts_with("invalid input"), "{}", reply.content);
        }
        assert_eq!(db.stats().analyses, 0);
        assert_eq!(db.stats().opens, 0);
    }
}
