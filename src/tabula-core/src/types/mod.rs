//! Type system for tabula values.
//!
//! This module defines the `Value` enum for cell and literal values and
//! `DataType` for declared column types, plus the conformance checks used to
//! classify values that live in the catch-all `Object` bucket.

mod data_type;
mod spec;
mod value;

pub use data_type::DataType;
pub use spec::{conforms, infer_dtype};
pub use value::Value;
