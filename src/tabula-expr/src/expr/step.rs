//! Recorded steps and their arguments.

use std::collections::BTreeMap;

use common_display::AstNode;
use common_error::TabulaResult;
use serde::{Deserialize, Serialize};
use tabula_core::{Label, Target, Value};

use super::Expr;

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// `obj.name`
    Attribute(String),
    /// `obj[key]`
    Item(Label),
    /// `obj.name(*args, **kwargs)`, including operators.
    Invoke(Invocation),
}

/// A named method or operator call with its arguments, recorded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Method name.
    pub name: String,
    /// Positional arguments.
    pub args: Vec<Arg>,
    /// Keyword arguments, sorted by keyword.
    pub kwargs: BTreeMap<String, Arg>,
}

impl Invocation {
    /// Create an invocation.
    pub fn new(name: impl Into<String>, args: Vec<Arg>, kwargs: BTreeMap<String, Arg>) -> Self {
        Self {
            name: name.into(),
            args,
            kwargs,
        }
    }

    /// Whether no arguments were passed.
    pub fn is_nullary(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// The single positional argument, if that is all that was passed.
    pub fn single_arg(&self) -> Option<&Arg> {
        match self.args.as_slice() {
            [arg] if self.kwargs.is_empty() => Some(arg),
            _ => None,
        }
    }

    /// Resolve every argument against `root`.
    pub(crate) fn resolve_args<T: Target>(
        &self,
        root: &T,
    ) -> TabulaResult<(Vec<T>, BTreeMap<String, T>)> {
        let args = self
            .args
            .iter()
            .map(|arg| arg.resolve(root))
            .collect::<TabulaResult<Vec<_>>>()?;
        let kwargs = self
            .kwargs
            .iter()
            .map(|(key, arg)| Ok((key.clone(), arg.resolve(root)?)))
            .collect::<TabulaResult<BTreeMap<_, _>>>()?;
        Ok((args, kwargs))
    }
}

/// An argument of a recorded invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    /// A plain value passed through as is.
    Literal(Value),
    /// A nested expression, evaluated against the same root before the call.
    Expr(Expr),
}

impl Arg {
    /// Resolve against the root the enclosing expression is evaluated on.
    pub fn resolve<T: Target>(&self, root: &T) -> TabulaResult<T> {
        match self {
            Self::Literal(value) => Ok(T::from_value(value.clone())),
            Self::Expr(expr) => expr.evaluate(root),
        }
    }

    /// The nested expression, if this is one.
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Self::Expr(expr) => Some(expr),
            Self::Literal(_) => None,
        }
    }

    pub(crate) fn as_tree(&self) -> AstNode {
        match self {
            Self::Literal(value) => AstNode::leaf(value.repr()),
            Self::Expr(expr) => expr.as_tree(),
        }
    }
}

impl From<Expr> for Arg {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<&Expr> for Arg {
    fn from(expr: &Expr) -> Self {
        Self::Expr(expr.clone())
    }
}

macro_rules! literal_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_arg!(Value, bool, i64, i32, f64, String, &str, Vec<Value>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::df;

    #[test]
    fn test_single_arg() {
        let inv = Invocation::new("lt", vec![Arg::from(3i64)], BTreeMap::new());
        assert_eq!(inv.single_arg(), Some(&Arg::from(3i64)));
        assert!(!inv.is_nullary());

        let mut kwargs = BTreeMap::new();
        kwargs.insert("upper".to_string(), Arg::from(1i64));
        let inv = Invocation::new("clip", vec![Arg::from(0i64)], kwargs);
        assert_eq!(inv.single_arg(), None);
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(Arg::from("x"), Arg::Literal(Value::from("x")));
        assert_eq!(Arg::from(2.5), Arg::Literal(Value::Float64(2.5)));
        assert_eq!(Arg::from(df().attr("x")).as_expr(), Some(&df().attr("x")));
        assert_eq!(Arg::from(1i64).as_expr(), None);
    }
}
