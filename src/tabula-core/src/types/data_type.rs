//! Declared column types.

use std::str::FromStr;

use common_error::TabulaError;
use serde::{Deserialize, Serialize};

/// Declared storage type of a column.
///
/// `String` and `Binary` values are stored in the catch-all `Object` bucket,
/// so a column never declares them directly; they are recognised by sampling
/// the values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Null type (unknown or absent).
    Null,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Binary data.
    Binary,
    /// List of values.
    List,
    /// Heterogeneous or non-primitive values.
    Object,
}

impl DataType {
    /// Check if this type is numeric.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }

    /// Whether membership of this type can only be decided from the values
    /// themselves rather than from a declared column type.
    pub const fn needs_sampling(&self) -> bool {
        matches!(self, Self::String | Self::Binary)
    }

    /// Get the display name for this type.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int64 => "Int64",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::Binary => "Binary",
            Self::List => "List",
            Self::Object => "Object",
        }
    }

    /// Get the common supertype of two types (for type inference).
    pub fn common_supertype(&self, other: &Self) -> Self {
        match (self, other) {
            (a, b) if a == b => *a,
            (Self::Null, t) | (t, Self::Null) => *t,
            (Self::Int64, Self::Float64) | (Self::Float64, Self::Int64) => Self::Float64,
            _ => Self::Object,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DataType {
    type Err = TabulaError;

    /// Parse both the display names and the short names used by `astype`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "bool" => Ok(Self::Bool),
            "int" | "int64" => Ok(Self::Int64),
            "float" | "float64" => Ok(Self::Float64),
            "str" | "string" => Ok(Self::String),
            "bytes" | "binary" => Ok(Self::Binary),
            "list" => Ok(Self::List),
            "object" => Ok(Self::Object),
            _ => Err(TabulaError::type_error(format!("unknown data type '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_supertype() {
        assert_eq!(
            DataType::Int64.common_supertype(&DataType::Float64),
            DataType::Float64
        );
        assert_eq!(
            DataType::Null.common_supertype(&DataType::Bool),
            DataType::Bool
        );
        assert_eq!(
            DataType::String.common_supertype(&DataType::Int64),
            DataType::Object
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("str".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("Int64".parse::<DataType>().unwrap(), DataType::Int64);
        assert_eq!("float".parse::<DataType>().unwrap(), DataType::Float64);
        assert!("complex".parse::<DataType>().is_err());
    }

    #[test]
    fn test_needs_sampling() {
        assert!(DataType::String.needs_sampling());
        assert!(DataType::Binary.needs_sampling());
        assert!(!DataType::Int64.needs_sampling());
    }
}
