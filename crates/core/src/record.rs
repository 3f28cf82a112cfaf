//! Result records returned by the database
//!
//! A [`ResultRecord`] is one row: an ordered list of `(field, value)` pairs in
//! the order the database declared its fields. A [`ResultSet`] is the full,
//! eagerly collected sequence of rows in return order.

use std::collections::HashSet;

use crate::error::RecordShapeError;
use crate::value::Value;

/// Every row of a query result, in the order the database returned them.
pub type ResultSet = Vec<ResultRecord>;

/// One result row with its fields in declared order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRecord {
    fields: Vec<(String, Value)>,
}

impl ResultRecord {
    /// Zip declared field names with a row's values.
    ///
    /// # Errors
    ///
    /// Fails when the counts differ or a field name repeats.
    pub fn new(keys: Vec<String>, values: Vec<Value>) -> Result<Self, RecordShapeError> {
        if keys.len() != values.len() {
            return Err(RecordShapeError::LengthMismatch {
                fields: keys.len(),
                values: values.len(),
            });
        }
        Self::from_pairs(keys.into_iter().zip(values).collect())
    }

    /// Build a record from `(field, value)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Fails when a field name repeats.
    pub fn from_pairs(fields: Vec<(String, Value)>) -> Result<Self, RecordShapeError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(RecordShapeError::DuplicateField {
                    field: name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Field names in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Look up a field's value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate `(field, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the record, returning its pairs.
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.fields
    }
}
