//! Value conformance checks and dtype inference.

use super::{DataType, Value};

/// Check whether a single value belongs to a data type.
///
/// Nulls conform to nothing, so a sampled null breaks a uniform
/// classification the same way any other foreign value does.
pub fn conforms(value: &Value, dtype: &DataType) -> bool {
    match (value, dtype) {
        (Value::Null, DataType::Null)
        | (Value::Bool(_), DataType::Bool)
        | (Value::Int64(_), DataType::Int64)
        | (Value::Float64(_), DataType::Float64)
        | (Value::String(_), DataType::String)
        | (Value::Binary(_), DataType::Binary)
        | (Value::List(_), DataType::List) => true,
        (_, DataType::Object) => true,
        _ => false,
    }
}

/// Infer the declared type of a column from its values.
///
/// Only booleans and numbers get a structural type; strings, bytes, lists and
/// mixtures land in `Object`. Nulls are ignored unless every value is null.
pub fn infer_dtype(values: &[Value]) -> DataType {
    let inferred = values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::Bool(_) => DataType::Bool,
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            _ => DataType::Object,
        })
        .reduce(|acc, t| acc.common_supertype(&t));

    match inferred {
        Some(dtype) => dtype,
        None if values.is_empty() => DataType::Object,
        None => DataType::Null,
    }
}
