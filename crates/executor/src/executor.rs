//! The Executor - single entry point to the query pipeline.
//!
//! Every call runs the same fixed sequence:
//!
//! ```text
//! Received -> ParametersNormalized -> CredentialResolved
//!          -> Classified (read path only) -> Executed -> Formatted
//! ```
//!
//! Any step may end the call with an [`Error`]. A statement that is not
//! declared read-only never reaches a session on the read path.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use graphgate_core::{normalize_params, Params, RawParams};
use graphgate_engine::{classify, execute_in_session, ClassificationResult, GraphClient, RoutingHint, SessionRequest};
use graphgate_security::{resolve_credential, AccessMode, GatewayOptions, RequestContext};
use tracing::{debug, info, warn};

use crate::convert::classification_error;
use crate::format::format_records;
use crate::{Command, Error, Output, Result};

/// Rejection message for non-read-only statements on the read path.
pub const NOT_READ_ONLY: &str =
    "query is not read-only: write operations must use the execute-write operation";

/// The command executor.
///
/// Holds the injected database client and the immutable startup options;
/// no state is shared between calls.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```ignore
/// let executor = Executor::new(Arc::new(client), GatewayOptions::new());
/// let output = executor
///     .execute(&RequestContext::new(), Command::ExecuteRead {
///         query: "RETURN 1 AS num".into(),
///         params: RawParams::new(),
///     })
///     .await?;
/// ```
pub struct Executor {
    client: Arc<dyn GraphClient>,
    options: GatewayOptions,
}

impl Executor {
    /// Create an executor over `client` with fixed `options`.
    pub fn new(client: Arc<dyn GraphClient>, options: GatewayOptions) -> Self {
        Self { client, options }
    }

    /// The startup options.
    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// The configured access mode.
    pub fn access_mode(&self) -> AccessMode {
        self.options.access_mode
    }

    /// Execute a single command on behalf of the caller in `ctx`.
    pub async fn execute(&self, ctx: &RequestContext, cmd: Command) -> Result<Output> {
        if let Some(query) = cmd.query() {
            if query.trim().is_empty() {
                return Err(Error::InvalidInput {
                    reason: "query must not be empty".to_string(),
                });
            }
        }

        if self.options.access_mode == AccessMode::ReadOnly && cmd.is_write() {
            warn!(target: "graphgate::executor", command = cmd.name(), "Write refused in read-only mode");
            return Err(Error::AccessDenied {
                command: cmd.name().to_string(),
            });
        }

        match cmd {
            Command::Ping => {
                self.with_deadline(ctx, async {
                    self.client.verify_connectivity().await.map_err(Error::from)
                })
                .await?;
                Ok(Output::Pong {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                })
            }
            Command::ExecuteRead { query, params } => self
                .run_statement(ctx, &query, params, RoutingHint::Read)
                .await
                .map(Output::Records),
            Command::ExecuteWrite { query, params } => self
                .run_statement(ctx, &query, params, RoutingHint::Write)
                .await
                .map(Output::Records),
        }
    }

    /// Read path when `routing` is `Read` (classify, then execute), write
    /// path when it is `Write` (execute directly).
    async fn run_statement(
        &self,
        ctx: &RequestContext,
        query: &str,
        params: RawParams,
        routing: RoutingHint,
    ) -> Result<String> {
        let params = normalize_params(params);

        let mode = self.options.transport_mode;
        let credential = resolve_credential(mode, ctx, &self.options.static_credential)
            .ok_or_else(|| {
                warn!(target: "graphgate::executor", mode = %mode, "No credential on request");
                Error::Unauthenticated {
                    reason: format!(
                        "{} mode requires a bearer token or basic credentials on every call",
                        mode
                    ),
                }
            })?;

        let request = SessionRequest {
            credential: &credential,
            mode,
            routing,
            database: self.options.database.as_deref(),
        };
        debug!(
            target: "graphgate::executor",
            routing = routing.as_str(),
            mode = %mode,
            credential = credential.kind(),
            params = params.len(),
            "Statement received"
        );

        self.with_deadline(ctx, async {
            if routing == RoutingHint::Read {
                self.ensure_read_only(query, &params, &request).await?;
            }

            let records = execute_in_session(self.client.as_ref(), query, &params, &request).await?;
            info!(
                target: "graphgate::executor",
                routing = routing.as_str(),
                records = records.len(),
                "Statement executed"
            );
            format_records(&records)
        })
        .await
    }

    async fn ensure_read_only(
        &self,
        query: &str,
        params: &Params,
        request: &SessionRequest<'_>,
    ) -> Result<()> {
        let classification = classify(self.client.as_ref(), query, params, request)
            .await
            .map_err(|e| {
                warn!(target: "graphgate::executor", error = %e, "Classification failed");
                classification_error(e)
            })?;

        match classification {
            ClassificationResult::ReadOnly => Ok(()),
            ClassificationResult::WriteOrMixed => {
                warn!(target: "graphgate::executor", "Non-read-only statement rejected on read path");
                Err(Error::RejectedStatement {
                    reason: NOT_READ_ONLY.to_string(),
                })
            }
            ClassificationResult::Unknown => Err(Error::ClassificationFailed {
                reason: "the database did not declare a statement type".to_string(),
            }),
        }
    }

    /// Run `fut` under the call's deadline, or the default timeout when the
    /// call brings none. Expiry drops `fut`, which releases any open session.
    async fn with_deadline<T, F>(&self, ctx: &RequestContext, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let limit = ctx
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .or(self.options.default_timeout);

        match limit {
            None => fut.await,
            // Expired before the first step; nothing is sent to the database.
            Some(limit) if limit.is_zero() => {
                warn!(target: "graphgate::executor", "Deadline already passed");
                Err(Error::Timeout { timeout_ms: 0 })
            }
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                warn!(target: "graphgate::executor", timeout_ms = millis(limit), "Deadline exceeded");
                Error::Timeout {
                    timeout_ms: millis(limit),
                }
            })?,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
