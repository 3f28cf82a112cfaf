//! Value types for GraphGate
//!
//! This module defines:
//! - [`Value`]: the typed value model shared with the database client
//! - [`RawValue`]: a decoded JSON tree whose numbers are still exact text
//!
//! ## Numeric Model
//!
//! The database distinguishes 64-bit integers from IEEE-754 doubles; JSON has
//! a single number type. `Value` carries the distinction, `RawValue` defers it
//! until the normalizer has inspected the literal text:
//!
//! - `Int(1) != Float(1.0)`: different types are never equal
//! - Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`
//! - A `RawValue::Number` is never handed to the database client

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, Error as _, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue as JsonText;

/// Normalized query parameters, keyed by parameter name.
pub type Params = BTreeMap<String, Value>;

/// Query parameters as decoded from JSON, before normalization.
pub type RawParams = BTreeMap<String, RawValue>;

/// Typed value exchanged with the database client.
///
/// Parameters are converted into this model by the normalizer before any
/// statement is sent, and result records are read back into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Map with unique string keys
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a float value
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a slice if this is a List value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as a map if this is a Map value
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Self {
        Value::Map(m)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// serde: Value reads and writes its natural data-model shape
// ============================================================================

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Deserializes from any self-describing format that reports integers and
/// floats separately (driver row decoders, MessagePack, ...).
///
/// JSON text should be decoded into [`RawValue`] and normalized instead, so
/// that the integer/float decision is made from the literal.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a graph value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        })
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::List(v.iter().map(|b| Value::Int(i64::from(*b))).collect()))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = BTreeMap::new();
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            map.insert(k, v);
        }
        Ok(Value::Map(map))
    }
}

// ============================================================================
// RawValue
// ============================================================================

/// A JSON tree decoded without committing numbers to a binary type.
///
/// `Number` holds the literal exactly as it appeared in the payload, so
/// `5`, `5.0` and `5.000000000000000001` stay distinguishable until the
/// normalizer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, as its exact decimal literal
    Number(String),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<RawValue>),
    /// JSON object
    Object(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Decode JSON text, keeping number literals verbatim.
    pub fn parse(text: &str) -> Result<RawValue, serde_json::Error> {
        let json: Box<JsonText> = serde_json::from_str(text)?;
        RawValue::from_json_text(&json)
    }

    /// Build a number from its literal text.
    pub fn number(literal: impl Into<String>) -> RawValue {
        RawValue::Number(literal.into())
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Array(_) => "array",
            RawValue::Object(_) => "object",
        }
    }

    /// Walk a validated JSON fragment one level at a time.
    ///
    /// Containers are split into child fragments; a number keeps the exact
    /// slice of source text it was written as.
    fn from_json_text(json: &JsonText) -> Result<RawValue, serde_json::Error> {
        let text = json.get().trim();
        match text.as_bytes().first() {
            Some(b'{') => {
                let fields: BTreeMap<String, Box<JsonText>> = serde_json::from_str(text)?;
                fields
                    .into_iter()
                    .map(|(k, v)| Ok((k, RawValue::from_json_text(&v)?)))
                    .collect::<Result<_, _>>()
                    .map(RawValue::Object)
            }
            Some(b'[') => {
                let items: Vec<Box<JsonText>> = serde_json::from_str(text)?;
                items
                    .iter()
                    .map(|item| RawValue::from_json_text(item))
                    .collect::<Result<_, _>>()
                    .map(RawValue::Array)
            }
            Some(b'"') => serde_json::from_str(text).map(RawValue::String),
            Some(b't') | Some(b'f') => serde_json::from_str(text).map(RawValue::Bool),
            Some(b'n') => serde_json::from_str::<()>(text).map(|()| RawValue::Null),
            _ => Ok(RawValue::Number(text.to_string())),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    /// Numbers take `serde_json`'s rendering of the literal, which may differ
    /// from the source text (`1E2` becomes `1e+2`). Use [`RawValue::parse`]
    /// when the exact literal matters.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => RawValue::Number(n.to_string()),
            serde_json::Value::String(s) => RawValue::String(s),
            serde_json::Value::Array(arr) => {
                RawValue::Array(arr.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(obj) => {
                RawValue::Object(obj.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// Writes numbers back as their literal text. A `Number` whose text is not
/// a JSON number is written as a string.
impl Serialize for RawValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RawValue::Null => serializer.serialize_unit(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Number(text) => {
                let looks_numeric = text
                    .as_bytes()
                    .first()
                    .is_some_and(|b| *b == b'-' || b.is_ascii_digit());
                match JsonText::from_string(text.clone()) {
                    Ok(json) if looks_numeric => json.serialize(serializer),
                    _ => serializer.serialize_str(text),
                }
            }
            RawValue::String(s) => serializer.serialize_str(s),
            RawValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RawValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// JSON only: number literals are captured from the `serde_json` input.
impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<RawValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Box::<JsonText>::deserialize(deserializer)?;
        RawValue::from_json_text(&json).map_err(D::Error::custom)
    }
}
