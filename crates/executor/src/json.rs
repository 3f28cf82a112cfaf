//! Decoding of operation arguments.
//!
//! Arguments arrive as JSON text. They are decoded into [`RawValue`] so that
//! number literals reach the normalizer exactly as written.

use graphgate_core::{RawParams, RawValue};

use crate::{Error, Result};

/// Decoded arguments of `execute-read` / `execute-write`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryArguments {
    /// Statement text, unchecked
    pub query: String,
    /// Parameters, empty when absent or null
    pub params: RawParams,
}

/// Decode `{"query": string, "params": object?}`.
///
/// Other keys are ignored.
pub fn parse_arguments(text: &str) -> Result<QueryArguments> {
    let value = RawValue::parse(text).map_err(|e| Error::InvalidInput {
        reason: format!("arguments are not valid JSON: {}", e),
    })?;
    let kind = value.type_name();
    let RawValue::Object(mut fields) = value else {
        return Err(Error::InvalidInput {
            reason: format!("arguments must be a JSON object, got {}", kind),
        });
    };

    let query = match fields.remove("query") {
        Some(RawValue::String(query)) => query,
        Some(other) => {
            return Err(Error::InvalidInput {
                reason: format!("'query' must be a string, got {}", other.type_name()),
            })
        }
        None => {
            return Err(Error::InvalidInput {
                reason: "missing required argument 'query'".to_string(),
            })
        }
    };

    let params = match fields.remove("params") {
        None | Some(RawValue::Null) => RawParams::new(),
        Some(RawValue::Object(params)) => params,
        Some(other) => {
            return Err(Error::InvalidInput {
                reason: format!("'params' must be an object, got {}", other.type_name()),
            })
        }
    };

    Ok(QueryArguments { query, params })
}

/// Decode a parameter object on its own, e.g. `{"limit": 1.0}`.
pub fn parse_params(text: &str) -> Result<RawParams> {
    match RawValue::parse(text) {
        Ok(RawValue::Object(params)) => Ok(params),
        Ok(other) => Err(Error::InvalidInput {
            reason: format!("'params' must be an object, got {}", other.type_name()),
        }),
        Err(e) => Err(Error::InvalidInput {
            reason: format!("params are not valid JSON: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphgate_core::{normalize_params, Value};
    use proptest::prelude::*;

    #[test]
    fn query_and_params() {
        let args = parse_arguments(r#"{"query": "MATCH (n) RETURN n LIMIT $limit", "params": {"limit": 1.0}}"#)
            .unwrap();
        assert_eq!(args.query, "MATCH (n) RETURN n LIMIT $limit");
        assert_eq!(args.params["limit"], RawValue::number("1.0"));
    }

    #[test]
    fn params_optional() {
        let args = parse_arguments(r#"{"query": "RETURN 1"}"#).unwrap();
        assert!(args.params.is_empty());
        let args = parse_arguments(r#"{"query": "RETURN 1", "params": null}"#).unwrap();
        assert!(args.params.is_empty());
    }

    #[test]
    fn rejects_malformed_arguments() {
        for text in [
            "not json",
            "[1, 2]",
            "{}",
            r#"{"query": 5}"#,
            r#"{"query": "RETURN 1", "params": [1]}"#,
            r#"{"query": "RETURN 1", "params": "x"}"#,
        ] {
            assert!(
                matches!(parse_arguments(text), Err(Error::InvalidInput { .. })),
                "accepted: {}",
                text
            );
        }
    }

    #[test]
    fn parse_params_keeps_literals() {
        let params = parse_params(r#"{"a": 5.0, "b": 0.1}"#).unwrap();
        assert_eq!(params["a"], RawValue::number("5.0"));
        assert_eq!(params["b"], RawValue::number("0.1"));
        assert!(parse_params("[]").is_err());
    }

    proptest! {
        #[test]
        fn decoded_integers_normalize_to_int(i in any::<i64>()) {
            let params = parse_params(&format!(r#"{{"n": {}, "m": {}.0}}"#, i, i)).unwrap();
            let params = normalize_params(params);
            prop_assert_eq!(&params["n"], &Value::Int(i));
            prop_assert_eq!(&params["m"], &Value::Int(i));
        }

        #[test]
        fn decoded_fractions_normalize_to_float(
            f in (-1.0e9f64..1.0e9f64).prop_filter("fractional", |f| f.fract() != 0.0)
        ) {
            let params = parse_params(&format!(r#"{{"x": [{:?}]}}"#, f)).unwrap();
            let params = normalize_params(params);
            prop_assert_eq!(&params["x"], &Value::List(vec![Value::Float(f)]));
        }
    }
}
