//! Session executor.
//!
//! Runs one statement in one single-use session. The session is closed on
//! every normal exit path; a session dropped mid-flight (cancelled future,
//! panic) is released by its own `Drop`.

use graphgate_core::{Params, ResultRecord, ResultSet};
use tracing::{debug, warn};

use crate::client::{GraphClient, QueryResult, SessionRequest};
use crate::Result;

/// Execute `query` in a fresh session and collect every row.
///
/// Errors are distinct per stage: [`Error::SessionOpen`](crate::Error::SessionOpen)
/// when no session could be opened, [`Error::Execution`](crate::Error::Execution)
/// when the transaction failed, and
/// [`Error::UnexpectedShape`](crate::Error::UnexpectedShape) when the rows do
/// not match the declared fields. None of them degrade to an empty result.
///
/// A failed close after a successful run is logged and does not fail the call.
pub async fn execute_in_session(
    client: &dyn GraphClient,
    query: &str,
    params: &Params,
    request: &SessionRequest<'_>,
) -> Result<ResultSet> {
    let mut session = client.open_session(request).await?;
    debug!(
        target: "graphgate::session",
        routing = request.routing.as_str(),
        mode = %request.mode,
        credential = request.credential.kind(),
        "Session opened"
    );

    let outcome = session.run(query, params).await;

    if let Err(e) = session.close().await {
        warn!(target: "graphgate::session", error = %e, "Session close failed");
    } else {
        debug!(target: "graphgate::session", "Session closed");
    }

    collect_records(outcome?)
}

/// Validate a raw result into records, one per row.
pub fn collect_records(result: QueryResult) -> Result<ResultSet> {
    let QueryResult { keys, rows } = result;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(ResultRecord::new(keys.clone(), row)?);
    }
    Ok(records)
}
