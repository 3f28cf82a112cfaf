//! Test modules for the executor crate.

pub mod write_path;

use std::sync::Arc;

use graphgate_engine::ScriptedClient;

use crate::{Gateway, GatewayOptions};

/// Gateway over a clone of `client`, so the test keeps the counters.
pub(crate) fn gateway(client: &ScriptedClient, options: GatewayOptions) -> Gateway {
    Gateway::new(Arc::new(client.clone()), options)
}
