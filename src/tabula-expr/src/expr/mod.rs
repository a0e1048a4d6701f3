//! Deferred expressions recorded against a symbolic root.

mod expression;
mod operator;
mod ops;
mod render;
mod step;
mod truth;

pub use expression::{Applied, CallArg, Expr, col, df, series};
pub use operator::Operator;
pub use step::{Arg, Invocation, Step};

use tabula_core::Value;

/// Wrap a plain value as an expression argument.
pub fn lit(value: impl Into<Value>) -> Arg {
    Arg::Literal(value.into())
}
