//! Statement classification.
//!
//! The database's own analyzer decides whether a statement is read-only.
//! The caller's statement is wrapped in `EXPLAIN`, which plans it without
//! executing it, and the declared statement type is read back from the
//! result summary. Query text is never inspected here.

use graphgate_core::Params;
use tracing::debug;

use crate::client::{GraphClient, SessionRequest, StatementType};
use crate::Result;

/// Prefix that turns a statement into a plan-only analysis statement.
pub const ANALYSIS_PREFIX: &str = "EXPLAIN ";

/// Outcome of classifying one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationResult {
    /// The analyzer declared the statement read-only.
    ReadOnly,
    /// Anything else the analyzer declared: writes, read-write, schema changes.
    WriteOrMixed,
    /// No usable answer. Must be treated as a denial.
    Unknown,
}

impl ClassificationResult {
    /// Map the analyzer's declared type. Only an exact read-only answer is
    /// `ReadOnly`; an unrecognized type is `WriteOrMixed`.
    pub fn from_statement_type(declared: StatementType) -> Self {
        match declared {
            StatementType::ReadOnly => ClassificationResult::ReadOnly,
            StatementType::ReadWrite
            | StatementType::WriteOnly
            | StatementType::SchemaWrite
            | StatementType::Unknown => ClassificationResult::WriteOrMixed,
        }
    }

    /// True only for [`ClassificationResult::ReadOnly`].
    pub fn is_read_only(&self) -> bool {
        matches!(self, ClassificationResult::ReadOnly)
    }

    /// Lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationResult::ReadOnly => "read-only",
            ClassificationResult::WriteOrMixed => "write-or-mixed",
            ClassificationResult::Unknown => "unknown",
        }
    }
}

/// Build the analysis statement for `query`.
pub fn analysis_statement(query: &str) -> String {
    format!("{}{}", ANALYSIS_PREFIX, query)
}

/// Classify `query` with `params` through the database's analyzer.
///
/// An `Err` is the `Unknown` outcome: the analysis call failed and the
/// error says why. Callers must deny on `Err` exactly as on
/// `Ok(ClassificationResult::Unknown)`.
///
/// Results are not cached; every call asks the analyzer again.
pub async fn classify(
    client: &dyn GraphClient,
    query: &str,
    params: &Params,
    request: &SessionRequest<'_>,
) -> Result<ClassificationResult> {
    let statement = analysis_statement(query);
    let declared = client.run_analysis(&statement, params, request).await?;
    let result = ClassificationResult::from_statement_type(declared);
    debug!(target: "graphgate::classify", declared = ?declared, result = result.as_str(), "Statement classified");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RoutingHint;
    use crate::scripted::ScriptedClient;
    use crate::Error;
    use graphgate_security::{Credential, TransportMode};

    fn request(credential: &Credential) -> SessionRequest<'_> {
        SessionRequest {
            credential,
            mode: TransportMode::SingleTenant,
            routing: RoutingHint::Read,
            database: None,
        }
    }

    #[test]
    fn only_read_only_maps_to_read_only() {
        assert_eq!(
            ClassificationResult::from_statement_type(StatementType::ReadOnly),
            ClassificationResult::ReadOnly
        );
        for declared in [
            StatementType::ReadWrite,
            StatementType::WriteOnly,
            StatementType::SchemaWrite,
            StatementType::Unknown,
        ] {
            assert_eq!(
                ClassificationResult::from_statement_type(declared),
                ClassificationResult::WriteOrMixed,
                "{:?}",
                declared
            );
        }
    }

    #[tokio::test]
    async fn wraps_statement_in_explain() {
        let client = ScriptedClient::new().classify("RETURN 1", StatementType::ReadOnly);
        let cred = Credential::None;
        let result = classify(&client, "RETURN 1", &Params::new(), &request(&cred)).await;
        assert_eq!(result, Ok(ClassificationResult::ReadOnly));
        assert_eq!(client.analyzed(), vec!["EXPLAIN RETURN 1".to_string()]);
        assert_eq!(client.stats().runs, 0);
        assert_eq!(client.stats().opens, 0);
    }

    #[tokio::test]
    async fn write_keyword_inside_literal_is_decided_by_analyzer() {
        let query = "RETURN 'CREATE (n)' AS text";
        let client = ScriptedClient::new().classify(query, StatementType::ReadOnly);
        let cred = Credential::None;
        let result = classify(&client, query, &Params::new(), &request(&cred)).await;
        assert_eq!(result, Ok(ClassificationResult::ReadOnly));
    }

    #[tokio::test]
    async fn analysis_failure_is_an_error() {
        let client = ScriptedClient::new().fail_analysis("connection reset");
        let cred = Credential::None;
        let result = classify(&client, "RETURN 1", &Params::new(), &request(&cred)).await;
        assert!(matches!(result, Err(Error::Analysis { .. })));
    }
}
