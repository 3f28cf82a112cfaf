//! Core types for GraphGate
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: typed value model (integer/float distinction preserved)
//! - RawValue: decoded JSON with exact number literals
//! - Normalize: RawValue -> Value conversion, the numeric normalizer
//! - ResultRecord / ResultSet: rows returned by the database
//! - RecordShapeError: malformed result rows

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod normalize;
pub mod record;
pub mod value;

pub use error::RecordShapeError;
pub use normalize::{normalize, normalize_number, normalize_params, Normalize};
pub use record::{ResultRecord, ResultSet};
pub use value::{Params, RawParams, RawValue, Value};
