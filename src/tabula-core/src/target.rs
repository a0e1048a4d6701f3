//! Contracts between recorded expressions and the objects they are replayed on.

use std::collections::BTreeMap;
use std::fmt;

use common_error::TabulaResult;
use serde::{Deserialize, Serialize};

use crate::label::Label;
use crate::types::Value;

/// The kind of object an expression chain is ultimately applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// A whole table.
    Frame,
    /// A single column.
    Series,
}

impl Subject {
    /// The symbol used when rendering a root of this kind.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Frame => "DF",
            Self::Series => "S",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An object recorded steps can be replayed against.
///
/// Every value reachable from a table (the table itself, a column, a scalar,
/// an accessor namespace) is represented by one `Target` type. Member access
/// and invocation errors are the implementation's own and are propagated to
/// the caller unchanged.
pub trait Target: Clone + fmt::Debug + Sized {
    /// The subject kind this value can stand in for, if any.
    fn subject(&self) -> Option<Subject>;

    /// Lift a literal recorded in an expression into a target value.
    fn from_value(value: Value) -> Self;

    /// `obj.name`
    fn attribute(&self, name: &str) -> TabulaResult<Self>;

    /// `obj[key]`
    fn item(&self, key: &Label) -> TabulaResult<Self>;

    /// `obj.name(*args, **kwargs)`; operators arrive under their method
    /// names (`lt`, `add`, `radd`, ...).
    fn invoke(
        &self,
        name: &str,
        args: Vec<Self>,
        kwargs: BTreeMap<String, Self>,
    ) -> TabulaResult<Self>;
}

/// Something that computes a value once it is handed the table.
///
/// Engines accept `Resolve` wherever they would accept a callback taking the
/// table, e.g. to compute a filter mask or the labels to select.
pub trait Resolve<T> {
    /// What resolving produces.
    type Output;

    /// Resolve against `target`.
    fn resolve(&self, target: &T) -> TabulaResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_symbols() {
        assert_eq!(Subject::Frame.symbol(), "DF");
        assert_eq!(Subject::Series.to_string(), "S");
    }
}
