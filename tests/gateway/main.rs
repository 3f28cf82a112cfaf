//! Gateway Integration Tests
//!
//! End-to-end tests through the public `graphgate` facade:
//! - Named-operation boundary (`Gateway::handle`)
//! - Read-path safety and write path
//! - Credential isolation per transport mode
//! - Configuration to running gateway
//! - Session release under every outcome

mod common;

mod config_to_gateway;
mod credential_isolation;
mod numeric_fidelity;
mod read_safety;
mod scenarios;
