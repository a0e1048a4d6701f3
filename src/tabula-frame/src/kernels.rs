//! Scalar kernels applied element-wise by [`Datum`](crate::Datum).
//!
//! Integer division and modulo follow floor semantics: the quotient rounds
//! toward negative infinity and the remainder takes the sign of the divisor.
//! Nulls propagate through arithmetic and compare unequal to everything.

use std::cmp::Ordering;

use common_error::{TabulaError, TabulaResult, ensure, value_err};
use tabula_core::Value;

/// Arithmetic and logical operators; each also has a reflected form
/// named with an `r` prefix (`radd`, `rxor`).
pub const REFLECTABLE_OPS: &[&str] = &[
    "add", "sub", "mul", "truediv", "floordiv", "mod", "pow", "and", "or", "xor",
];

/// Comparison operators, which have no reflected form.
pub const COMPARISON_OPS: &[&str] = &["eq", "ne", "lt", "le", "gt", "ge"];

/// Unary operators the engine evaluates, by method name.
pub const UNARY_OPS: &[&str] = &["neg", "pos", "abs", "invert"];

/// Resolve a binary method name into its forward form and whether the
/// operands are swapped (`radd` is `add` with the operands reversed).
pub fn binary_op(name: &str) -> Option<(&'static str, bool)> {
    fn find(ops: &[&'static str], name: &str) -> Option<&'static str> {
        ops.iter().copied().find(|op| *op == name)
    }
    if let Some(op) = find(REFLECTABLE_OPS, name).or_else(|| find(COMPARISON_OPS, name)) {
        return Some((op, false));
    }
    let op = find(REFLECTABLE_OPS, name.strip_prefix('r')?)?;
    Some((op, true))
}

fn type_mismatch(op: &str, left: &Value, right: &Value) -> TabulaError {
    TabulaError::type_error(format!(
        "unsupported operand types for {op}: {} and {}",
        left.type_name(),
        right.type_name()
    ))
}

/// Apply a forward binary operator to two scalars.
pub fn binary(op: &str, left: &Value, right: &Value) -> TabulaResult<Value> {
    match op {
        "eq" => Ok(Value::Bool(values_equal(left, right))),
        "ne" => Ok(Value::Bool(!values_equal(left, right))),
        "lt" | "le" | "gt" | "ge" => compare(op, left, right),
        _ if left.is_null() || right.is_null() => Ok(Value::Null),
        "add" => add(left, right),
        "sub" | "mul" | "truediv" | "floordiv" | "mod" | "pow" => arithmetic(op, left, right),
        "and" | "or" | "xor" => bitwise(op, left, right),
        _ => Err(TabulaError::attribute_error(format!(
            "unknown binary operator '{op}'"
        ))),
    }
}

/// Apply a unary operator to a scalar.
pub fn unary(op: &str, value: &Value) -> TabulaResult<Value> {
    match (op, value) {
        (_, Value::Null) => Ok(Value::Null),
        ("neg", Value::Int64(i)) => i
            .checked_neg()
            .map(Value::Int64)
            .ok_or_else(|| TabulaError::value_error("integer overflow in neg")),
        ("neg", Value::Float64(f)) => Ok(Value::Float64(-f)),
        ("pos", v) if v.is_numeric() => Ok(v.clone()),
        ("abs", Value::Int64(i)) => i
            .checked_abs()
            .map(Value::Int64)
            .ok_or_else(|| TabulaError::value_error("integer overflow in abs")),
        ("abs", Value::Float64(f)) => Ok(Value::Float64(f.abs())),
        ("invert", Value::Bool(b)) => Ok(Value::Bool(!b)),
        ("invert", Value::Int64(i)) => Ok(Value::Int64(!i)),
        _ => Err(TabulaError::type_error(format!(
            "bad operand type for unary {op}: {}",
            value.type_name()
        ))),
    }
}

/// Equality with integers and floats compared by numeric value.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => false,
        (a, b) if a.is_numeric() && b.is_numeric() => a.as_float64() == b.as_float64(),
        (a, b) => a == b,
    }
}

/// Total-ish ordering used by comparisons and reductions.
pub fn partial_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            a.as_float64()?.partial_cmp(&b.as_float64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare(op: &str, left: &Value, right: &Value) -> TabulaResult<Value> {
    if left.is_null() || right.is_null() {
        return Ok(Value::Bool(false));
    }
    let ordering = partial_cmp(left, right).ok_or_else(|| type_mismatch(op, left, right))?;
    let result = match op {
        "lt" => ordering == Ordering::Less,
        "le" => ordering != Ordering::Greater,
        "gt" => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn add(left: &Value, right: &Value) -> TabulaResult<Value> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            Ok(Value::List(a.iter().chain(b.iter()).cloned().collect()))
        }
        _ => arithmetic("add", left, right),
    }
}

fn arithmetic(op: &str, left: &Value, right: &Value) -> TabulaResult<Value> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => int_arithmetic(op, *a, *b),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            let (a, b) = (
                a.as_float64().unwrap_or_default(),
                b.as_float64().unwrap_or_default(),
            );
            float_arithmetic(op, a, b)
        }
        _ => Err(type_mismatch(op, left, right)),
    }
}

fn overflow(op: &str) -> TabulaError {
    TabulaError::value_error(format!("integer overflow in {op}"))
}

fn int_arithmetic(op: &str, a: i64, b: i64) -> TabulaResult<Value> {
    let checked = match op {
        "add" => a.checked_add(b),
        "sub" => a.checked_sub(b),
        "mul" => a.checked_mul(b),
        "truediv" => return float_arithmetic(op, a as f64, b as f64),
        "floordiv" | "mod" if b == 0 => value_err!("integer {op} by zero"),
        "floordiv" => a
            .checked_div(b)
            .zip(a.checked_rem(b))
            .map(|(q, r)| if r != 0 && ((r < 0) != (b < 0)) { q - 1 } else { q }),
        "mod" => a
            .checked_rem(b)
            .map(|r| if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r }),
        "pow" if b < 0 => return float_arithmetic(op, a as f64, b as f64),
        "pow" => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)),
        _ => None,
    };
    checked.map(Value::Int64).ok_or_else(|| overflow(op))
}

fn float_arithmetic(op: &str, a: f64, b: f64) -> TabulaResult<Value> {
    ensure!(
        b != 0.0 || !matches!(op, "truediv" | "floordiv" | "mod"),
        ValueError: "float {op} by zero"
    );
    let result = match op {
        "add" => a + b,
        "sub" => a - b,
        "mul" => a * b,
        "truediv" => a / b,
        "floordiv" => (a / b).floor(),
        "mod" => {
            let r = a % b;
            if r != 0.0 && ((r < 0.0) != (b < 0.0)) { r + b } else { r }
        }
        "pow" => a.powf(b),
        _ => {
            return Err(TabulaError::attribute_error(format!(
                "unknown arithmetic operator '{op}'"
            )));
        }
    };
    Ok(Value::Float64(result))
}

fn bitwise(op: &str, left: &Value, right: &Value) -> TabulaResult<Value> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            "and" => *a && *b,
            "or" => *a || *b,
            _ => a ^ b,
        })),
        (Value::Int64(a), Value::Int64(b)) => Ok(Value::Int64(match op {
            "and" => a & b,
            "or" => a | b,
            _ => a ^ b,
        })),
        _ => Err(type_mismatch(op, left, right)),
    }
}

/// Truthiness of a scalar: null, zero and empty values are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int64(i) => *i != 0,
        Value::Float64(f) => *f != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Binary(b) => !b.is_empty(),
        Value::List(items) => !items.is_empty(),
    }
}
