//! Combinators that build larger expressions out of smaller ones.

use std::str::FromStr;

use common_error::{TabulaError, TabulaResult};
use serde::{Deserialize, Serialize};
use tabula_core::Label;

use crate::expr::{Arg, Expr, Operator, col};

/// Binary operator used to reduce a sequence of boolean expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    /// `&`
    #[default]
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
}

impl Combinator {
    /// The operator recorded for each combination.
    pub const fn operator(&self) -> Operator {
        match self {
            Self::And => Operator::And,
            Self::Or => Operator::Or,
            Self::Xor => Operator::Xor,
        }
    }
}

impl FromStr for Combinator {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" | "&" => Ok(Self::And),
            "or" | "|" => Ok(Self::Or),
            "xor" | "^" => Ok(Self::Xor),
            other => Err(TabulaError::value_error(format!(
                "Unsupported operator name: {other:?}"
            ))),
        }
    }
}

/// A column given either by label or as an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColSpec {
    /// Shorthand for `DF[label]`.
    Name(Label),
    /// Any expression evaluated against the table.
    Expr(Expr),
}

impl ColSpec {
    /// The expression this spec stands for.
    pub fn ensure_expr(self) -> Expr {
        match self {
            Self::Name(label) => col(label),
            Self::Expr(expr) => expr,
        }
    }
}

impl From<Expr> for ColSpec {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<&str> for ColSpec {
    fn from(name: &str) -> Self {
        Self::Name(Label::from(name))
    }
}

impl From<String> for ColSpec {
    fn from(name: String) -> Self {
        Self::Name(Label::from(name))
    }
}

impl From<Label> for ColSpec {
    fn from(label: Label) -> Self {
        Self::Name(label)
    }
}

/// Reduce boolean expressions left to right with `op`.
///
/// `combine([a, b, c], And)` records `(a & b) & c`. An empty sequence has
/// nothing to reduce and is a value error.
pub fn combine(exprs: impl IntoIterator<Item = Expr>, op: Combinator) -> TabulaResult<Expr> {
    let mut exprs = exprs.into_iter();
    let first = exprs
        .next()
        .ok_or_else(|| TabulaError::value_error("cannot combine an empty sequence of expressions"))?;
    Ok(exprs.fold(first, |acc, next| acc.binary(op.operator(), next)))
}

/// Build a filter testing each column for equality with its value.
///
/// `build_filter([("a", "A"), ("b", "B")], Combinator::And)` is the same
/// expression as `(DF["a"] == "A") & (DF["b"] == "B")`.
pub fn build_filter<C, V>(
    predicates: impl IntoIterator<Item = (C, V)>,
    op: Combinator,
) -> TabulaResult<Expr>
where
    C: Into<ColSpec>,
    V: Into<Arg>,
{
    let exprs = predicates
        .into_iter()
        .map(|(column, value)| column.into().ensure_expr().eq(value));
    combine(exprs, op)
}

/// Join columns into one string column with `sep` between the parts.
///
/// Every part is cast with `astype("str")` first, so non-string columns are
/// joined by their text.
pub fn str_join(
    sep: &str,
    first: impl Into<ColSpec>,
    rest: impl IntoIterator<Item = ColSpec>,
) -> Expr {
    let as_str = |spec: ColSpec| spec.ensure_expr().method("astype", vec![Arg::from("str")]);
    rest.into_iter()
        .fold(as_str(first.into()), |acc, next| acc.add(sep).add(as_str(next)))
}
