//! Operation catalogue advertised to the outer protocol layer.

use graphgate_security::AccessMode;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::command::{READ_OPERATION, WRITE_OPERATION};

/// One advertised operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Boundary name
    pub name: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// What the operation does
    pub description: &'static str,
    /// Never mutates data
    pub read_only: bool,
    /// May delete or overwrite data
    pub destructive: bool,
    /// Repeating the call has no further effect
    pub idempotent: bool,
    /// JSON Schema of the arguments object
    pub input_schema: JsonValue,
}

fn input_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Cypher statement to run"
            },
            "params": {
                "type": "object",
                "description": "Statement parameters"
            }
        },
        "required": ["query"]
    })
}

/// Operations available under `access_mode`. Read-only mode omits the
/// write operation.
pub fn operations(access_mode: AccessMode) -> Vec<OperationDescriptor> {
    let mut ops = vec![OperationDescriptor {
        name: READ_OPERATION,
        title: "Execute read query",
        description: "Run a read-only Cypher statement. The database classifies the \
                      statement first; anything that is not read-only is rejected.",
        read_only: true,
        destructive: false,
        idempotent: true,
        input_schema: input_schema(),
    }];
    if access_mode == AccessMode::ReadWrite {
        ops.push(OperationDescriptor {
            name: WRITE_OPERATION,
            title: "Execute write query",
            description: "Run any Cypher statement, including writes and schema changes.",
            read_only: false,
            destructive: true,
            idempotent: false,
            input_schema: input_schema(),
        });
    }
    ops
}
