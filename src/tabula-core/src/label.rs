//! Axis labels and level references.

use std::fmt;

use common_error::{TabulaError, TabulaResult};
use serde::{Deserialize, Serialize};

use crate::types::Value;

/// One of the two axes of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The column axis.
    Columns,
    /// The row axis.
    Index,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns => write!(f, "columns"),
            Self::Index => write!(f, "index"),
        }
    }
}

/// A label on either axis; tuples are labels of a multi-level axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Integer label.
    Int(i64),
    /// String label.
    Str(String),
    /// Multi-level label, one component per level.
    Tuple(Vec<Label>),
}

impl Label {
    /// Number of levels this label spans.
    pub fn nlevels(&self) -> usize {
        match self {
            Self::Tuple(parts) => parts.len(),
            _ => 1,
        }
    }

    /// Component at `level`; a scalar label is its own level 0.
    pub fn level(&self, level: usize) -> Option<&Label> {
        match self {
            Self::Tuple(parts) => parts.get(level),
            scalar if level == 0 => Some(scalar),
            _ => None,
        }
    }

    /// The label text for string labels.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The label as an integer for integer labels.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert back into a value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::Int64(*i),
            Self::Str(s) => Value::String(s.clone()),
            Self::Tuple(parts) => Value::List(parts.iter().map(Self::to_value).collect()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Tuple(parts) => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Label {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<usize> for Label {
    fn from(i: usize) -> Self {
        Self::Int(i as i64)
    }
}

impl From<&Label> for Label {
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl From<Vec<Label>> for Label {
    fn from(parts: Vec<Label>) -> Self {
        Self::Tuple(parts)
    }
}

impl<A: Into<Label>, B: Into<Label>> From<(A, B)> for Label {
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Label>, B: Into<Label>, C: Into<Label>> From<(A, B, C)> for Label {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl TryFrom<Value> for Label {
    type Error = TabulaError;

    fn try_from(value: Value) -> TabulaResult<Self> {
        match value {
            Value::Int64(i) => Ok(Self::Int(i)),
            Value::String(s) => Ok(Self::Str(s)),
            Value::List(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<TabulaResult<Vec<_>>>()
                .map(Self::Tuple),
            other => Err(TabulaError::type_error(format!(
                "cannot use a {} value as an axis label",
                other.type_name()
            ))),
        }
    }
}

/// Reference to one level of a multi-level axis, by position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelRef {
    /// Zero-based level position.
    Position(usize),
    /// Level name.
    Name(String),
}

impl LevelRef {
    /// Resolve to a level position given the axis' level names.
    pub fn position(&self, names: &[Option<String>]) -> TabulaResult<usize> {
        match self {
            Self::Position(pos) if *pos < names.len().max(1) => Ok(*pos),
            Self::Position(pos) => Err(TabulaError::key_error(format!(
                "level {pos} out of range for an axis with {} level(s)",
                names.len()
            ))),
            Self::Name(name) => names
                .iter()
                .position(|n| n.as_deref() == Some(name.as_str()))
                .ok_or_else(|| {
                    TabulaError::key_error(format!(
                        "level '{name}' not found in level names {names:?}"
                    ))
                }),
        }
    }
}

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(pos) => write!(f, "{pos}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<usize> for LevelRef {
    fn from(pos: usize) -> Self {
        Self::Position(pos)
    }
}

impl From<&str> for LevelRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for LevelRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
