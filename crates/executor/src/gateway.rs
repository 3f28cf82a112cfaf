//! High-level typed wrapper for the Executor.
//!
//! [`Gateway`] is what the outer protocol layer holds: typed methods for
//! the two statement operations, the operation catalogue, and
//! [`Gateway::handle`], which dispatches a named operation with JSON
//! arguments and always answers with a [`Reply`].
//!
//! # Example
//!
//! ```ignore
//! use graphgate::{Gateway, GatewayOptions, RequestContext};
//!
//! let gateway = Gateway::new(client, GatewayOptions::new());
//! let reply = gateway
//!     .handle(&RequestContext::new(), "execute-read", r#"{"query": "RETURN 1 AS num"}"#)
//!     .await;
//! assert!(!reply.is_error);
//! ```

use std::sync::Arc;

use graphgate_core::RawParams;
use graphgate_engine::GraphClient;
use graphgate_security::{AccessMode, GatewayOptions, RequestContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{READ_OPERATION, WRITE_OPERATION};
use crate::json::parse_arguments;
use crate::operations::{operations, OperationDescriptor};
use crate::{Command, Error, Executor, Output, Result};

/// Answer to a named operation: formatted records or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// JSON array text on success, the error message on failure
    pub content: String,
    /// Whether `content` is an error message
    pub is_error: bool,
}

impl Reply {
    /// A successful reply.
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// A failed reply carrying `error`'s message.
    pub fn failure(error: &Error) -> Self {
        Self {
            content: error.to_string(),
            is_error: true,
        }
    }
}

impl From<Result<String>> for Reply {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(content) => Reply::success(content),
            Err(e) => Reply::failure(&e),
        }
    }
}

/// The query gateway.
pub struct Gateway {
    executor: Executor,
}

impl Gateway {
    /// Build a gateway over an injected database client.
    pub fn new(client: Arc<dyn GraphClient>, options: GatewayOptions) -> Self {
        Self {
            executor: Executor::new(client, options),
        }
    }

    /// Connect to the database described by `config` over Bolt.
    #[cfg(feature = "bolt")]
    pub async fn connect(config: &graphgate_engine::GatewayConfig) -> Result<Self> {
        let options = config.to_options()?;
        let client = graphgate_engine::BoltClient::connect(config).await?;
        Ok(Self::new(Arc::new(client), options))
    }

    /// Returns the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// The configured access mode.
    pub fn access_mode(&self) -> AccessMode {
        self.executor.access_mode()
    }

    /// Operations this gateway offers.
    pub fn operations(&self) -> Vec<OperationDescriptor> {
        operations(self.access_mode())
    }

    /// Check database connectivity; returns the gateway version.
    pub async fn ping(&self, ctx: &RequestContext) -> Result<String> {
        match self.executor.execute(ctx, Command::Ping).await? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }

    /// Run `query` only if the database declares it read-only.
    pub async fn execute_read(
        &self,
        ctx: &RequestContext,
        query: &str,
        params: RawParams,
    ) -> Result<String> {
        self.records(
            ctx,
            Command::ExecuteRead {
                query: query.to_string(),
                params,
            },
        )
        .await
    }

    /// Run any `query`.
    pub async fn execute_write(
        &self,
        ctx: &RequestContext,
        query: &str,
        params: RawParams,
    ) -> Result<String> {
        self.records(
            ctx,
            Command::ExecuteWrite {
                query: query.to_string(),
                params,
            },
        )
        .await
    }

    /// Dispatch operation `name` with JSON `arguments`.
    ///
    /// Never fails: every error becomes a [`Reply`] with `is_error` set.
    pub async fn handle(&self, ctx: &RequestContext, name: &str, arguments: &str) -> Reply {
        let result = match name {
            READ_OPERATION | WRITE_OPERATION => match parse_arguments(arguments) {
                Ok(args) if name == READ_OPERATION => {
                    self.execute_read(ctx, &args.query, args.params).await
                }
                Ok(args) => self.execute_write(ctx, &args.query, args.params).await,
                Err(e) => Err(e),
            },
            other => Err(Error::UnknownOperation {
                name: other.to_string(),
            }),
        };

        if let Err(e) = &result {
            debug!(target: "graphgate::gateway", operation = name, kind = e.kind(), "Operation failed");
        }
        Reply::from(result)
    }

    async fn records(&self, ctx: &RequestContext, cmd: Command) -> Result<String> {
        match self.executor.execute(ctx, cmd).await? {
            Output::Records(json) => Ok(json),
            _ => Err(Error::Internal {
                reason: "Unexpected output for statement".into(),
            }),
        }
    }
}
