//! Core data model for tabula.
//!
//! This crate provides the vocabulary shared by the expression factory, the
//! axis selection algebra, and any table engine they are replayed against:
//! - `Value` and `DataType` for cell values and declared column types
//! - `Label`, `LevelRef`, and `Axis` for (multi-level) axis labels
//! - `Target`, `Resolve`, and `LabelSource`, the contracts an engine implements

pub mod label;
pub mod source;
pub mod target;
pub mod testing;
pub mod types;

mod proptest_utils;

// Re-export commonly used types
pub use label::{Axis, Label, LevelRef};
pub use source::LabelSource;
pub use target::{Resolve, Subject, Target};
pub use types::{DataType, Value};
