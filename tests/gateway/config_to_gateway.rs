//! From `graphgate.toml` to a running gateway.

use graphgate::{AccessMode, Credential, GatewayConfig, RequestContext, TransportMode};
use tempfile::TempDir;

use crate::common::*;

#[tokio::test]
async fn read_only_config_hides_and_refuses_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(graphgate_engine::CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "uri = \"neo4j://localhost:7687\"\nread_only = true\n[credentials]\nusername = \"neo4j\"\npassword = \"pw\"\n",
    )
    .unwrap();

    let config = GatewayConfig::from_file(&path).unwrap();
    let options = config.to_options().unwrap();
    assert_eq!(options.access_mode, AccessMode::ReadOnly);

    let db = scripted_db();
    let gw = gateway_over(&db, options);
    assert_eq!(gw.operations().len(), 1);

    let reply = gw
        .handle(&RequestContext::new(), "execute-write", &args("CREATE (n:Test)", None))
        .await;
    assert!(reply.is_error);
    assert!(reply.content.starts_with("access denied"));

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("RETURN 1 as num", None))
        .await;
    assert!(!reply.is_error);
    assert_eq!(db.sessions()[0].credential, Credential::basic("neo4j", "pw"));
}

#[tokio::test]
async fn multi_tenant_config_requires_caller_credential() {
    let config = GatewayConfig::from_toml_str(
        "transport_mode = \"multi-tenant\"\n[credentials]\nusername = \"neo4j\"\npassword = \"pw\"\n",
    )
    .unwrap();
    let options = config.to_options().unwrap();
    assert_eq!(options.transport_mode, TransportMode::MultiTenant);

    let db = scripted_db();
    let gw = gateway_over(&db, options);

    let reply = gw
        .handle(&RequestContext::new(), "execute-read", &args("RETURN 1 as num", None))
        .await;
    assert!(reply.is_error);

    let ctx = RequestContext::new().with_basic("tenant", "secret");
    let reply = gw
        .handle(&ctx, "execute-read", &args("RETURN 1 as num", None))
        .await;
    assert!(!reply.is_error);
    assert_eq!(db.sessions()[0].credential, Credential::basic("tenant", "secret"));
}

#[test]
fn default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(graphgate_engine::CONFIG_FILE_NAME);
    GatewayConfig::write_default_if_missing(&path).unwrap();

    let options = GatewayConfig::from_file(&path).unwrap().to_options().unwrap();
    assert_eq!(options.transport_mode, TransportMode::SingleTenant);
    assert_eq!(options.access_mode, AccessMode::ReadWrite);
    assert_eq!(options.default_timeout, None);
}
