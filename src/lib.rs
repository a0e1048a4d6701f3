//! Tabula - deferred expressions and axis selections for tabular data
//!
//! Tabula records what to compute on a table before the table exists.
//! Expressions (`DF["x"] < 3`) are replayed against whatever table they are
//! handed, and axis selections (`C["y", "u"] | ...`) pick and reorder the
//! labels of a table's columns or rows.
//!
//! ```rust
//! use tabula::{Rest, col, columns};
//! use tabula::frame::Frame;
//!
//! let table = Frame::new([("x", vec![1i64, 2, 3]), ("y", vec![3i64, 2, 1])]).unwrap();
//!
//! let small = table.filter_with(&col("x").lt(3i64)).unwrap();
//! assert_eq!(small.shape(), (2, 2));
//!
//! let swapped = table.loc_columns(&(columns().label("y") | Rest)).unwrap();
//! assert_eq!(swapped.columns().labels()[0].as_str(), Some("y"));
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

mod session;

// Re-export member crates
pub use common_config as config;
pub use common_display as display;
pub use common_error as error;
pub use tabula_axis as axis;
pub use tabula_core as core;
pub use tabula_expr as expr;
pub use tabula_frame as frame;

// Entry points
pub use session::Session;
pub use tabula_axis::{AxisSelector, Rest, Selection, columns, index};
pub use tabula_core::{Axis, DataType, Label, LevelRef, Value};
pub use tabula_expr::{Combinator, Expr, Report, build_filter, col, combine, df, lit, series, str_join};

/// Tabula version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
