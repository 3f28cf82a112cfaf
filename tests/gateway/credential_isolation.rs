//! Credential isolation between transport modes and concurrent callers.

use std::sync::Arc;
use std::time::Duration;

use graphgate::{Credential, Error, GatewayOptions, RawParams, RequestContext, StatementType, TransportMode};
use graphgate_engine::ScriptedClient;

use crate::common::*;

#[tokio::test]
async fn multi_tenant_never_falls_back() {
    let db = ScriptedClient::new().classify_all(StatementType::ReadOnly);
    let options = GatewayOptions::new()
        .transport_mode(TransportMode::MultiTenant)
        .credential(Credential::basic("admin", "root"));
    let gw = gateway_over(&db, options);

    let ctx = RequestContext::new().with_bearer("").with_basic("", "pw");
    let result = gw.execute_read(&ctx, "RETURN 1", RawParams::new()).await;

    assert!(matches!(result, Err(Error::Unauthenticated { .. })));
    assert!(db.sessions().is_empty());
    assert!(db.analyzed().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tenants_each_get_their_own_credential() {
    let db = ScriptedClient::new()
        .classify_all(StatementType::ReadOnly)
        .delay(Duration::from_millis(3));
    let gw = Arc::new(gateway_over(
        &db,
        GatewayOptions::new().transport_mode(TransportMode::MultiTenant),
    ));

    let mut handles = Vec::new();
    for i in 0..24 {
        let gw = Arc::clone(&gw);
        handles.push(tokio::spawn(async move {
            let ctx = RequestContext::new().with_bearer(format!("token-{}", i));
            gw.execute_write(&ctx, "CREATE (n)", RawParams::new()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let sessions = db.sessions();
    assert_eq!(sessions.len(), 24);
    let mut tokens: Vec<String> = sessions
        .into_iter()
        .map(|s| match s.credential {
            Credential::Bearer { token } => token,
            other => panic!("expected bearer credential, got {:?}", other),
        })
        .collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 24);
    let stats = db.stats();
    assert_eq!(stats.opens, stats.closes);
}

#[tokio::test]
async fn single_tenant_uses_configured_identity_only() {
    let db = scripted_db();
    let fixed = Credential::bearer("service-token");
    let gw = gateway_over(&db, GatewayOptions::new().credential(fixed.clone()));

    let ctx = RequestContext::new().with_basic("intruder", "pw");
    gw.execute_read(&ctx, "RETURN 1 as num", RawParams::new())
        .await
        .unwrap();

    assert_eq!(db.sessions()[0].credential, fixed);
}
