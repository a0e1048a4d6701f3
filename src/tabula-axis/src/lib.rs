//! Axis selection algebra for tabula.
//!
//! Selections pick and reorder the labels of one axis of a table. Leaves
//! select explicit labels, the first run of a label slice, labels passing a
//! string predicate, columns of a given type, or everything (`Rest`, the
//! `...` of a selection). Leaves combine with `&` (intersection, the
//! right-hand order wins), `|` or `+` (union, the left-hand order wins) and
//! `!` (inversion).
//!
//! ```rust
//! use tabula_axis::{columns, Rest};
//!
//! let c = columns();
//! let sel = c.starts_with("PRE") | Rest;
//! assert_eq!(sel.to_string(), r#"(C.startswith("PRE") | ...)"#);
//! ```
//!
//! A selection is resolved against any [`LabelSource`](tabula_core::LabelSource).
//! Evaluation first produces a [`LabelSet`] (included and excluded positions)
//! and only then applies it to the axis.

pub mod label_set;
pub mod ops;
pub mod selection;
pub mod selector;

mod proptest_utils;

// Re-export commonly used types
pub use label_set::LabelSet;
pub use ops::{Predicate, SelectionOp};
pub use selection::{Rest, Selection};
pub use selector::{AxisSelector, DtypeSelector, columns, index};
