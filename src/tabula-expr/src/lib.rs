//! Deferred expressions for tabula.
//!
//! `tabula-expr` records computations against a table before the table
//! exists. An [`Expr`] is an immutable chain of attribute, item and call
//! steps rooted at a symbolic subject (`DF` for a whole table, `S` for a
//! single column). Handing it a concrete [`Target`](tabula_core::Target)
//! replays the chain; nested expressions passed as arguments are replayed
//! against that same root.
//!
//! # Example
//!
//! ```rust
//! use tabula_expr::{col, combine, Combinator};
//!
//! let small = col("x").lt(3i64);
//! let named = col("name").method("startswith", vec!["a".into()]);
//! let both = combine([small, named], Combinator::And).unwrap();
//!
//! assert_eq!(both.to_string(), r#"(DF["x"] < 3) & DF["name"].startswith("a")"#);
//! ```
//!
//! # Modules
//!
//! - [`expr`]: the expression type, its steps, operators and rendering
//! - [`helpers`]: combinators building filters and joined string columns
//! - [`report`]: pipe-style one-line summaries

pub mod expr;
pub mod helpers;
pub mod report;

mod proptest_utils;

// Re-export commonly used types
pub use expr::{Applied, Arg, CallArg, Expr, Invocation, Operator, Step, col, df, lit, series};
pub use helpers::{ColSpec, Combinator, build_filter, combine, str_join};
pub use report::{Report, ReportItem, Sink};
