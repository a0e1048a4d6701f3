//! The value type expressions are replayed on.

use std::collections::BTreeMap;
use std::fmt;

use common_error::{TabulaError, TabulaResult, ensure, type_err};
use tabula_core::{DataType, Label, Subject, Target, Value};

use crate::frame::Frame;
use crate::index::Index;
use crate::kernels::{self, UNARY_OPS};
use crate::series::Series;

/// Anything reachable from a frame: the frame itself, a column, a scalar,
/// a tuple such as `shape`, an index, or an accessor namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Frame(Frame),
    Series(Series),
    Scalar(Value),
    Tuple(Vec<Datum>),
    Index(Index),
    /// `series.str`
    Str(Series),
    /// `frame.loc`
    Loc(Frame),
}

impl Datum {
    /// Type name used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Frame(_) => "DataFrame",
            Self::Series(_) => "Series",
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::Index(_) => "Index",
            Self::Str(_) => "StringMethods",
            Self::Loc(_) => "LocIndexer",
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(df) => Some(df),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            Self::Series(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Flatten scalars and tuples of scalars into a value.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Scalar(v) => Some(v.clone()),
            Self::Tuple(items) => items
                .iter()
                .map(Self::to_value)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            Self::Series(s) => Some(Value::List(s.values().to_vec())),
            _ => None,
        }
    }

    fn no_attribute(&self, name: &str) -> TabulaError {
        TabulaError::attribute_error(format!(
            "'{}' object has no attribute '{name}'",
            self.kind()
        ))
    }

    /// Apply a forward binary operator, broadcasting scalars over series.
    pub fn binary(&self, op: &str, other: &Self) -> TabulaResult<Self> {
        match (self, other) {
            (Self::Series(a), Self::Series(b)) => {
                ensure!(
                    a.len() == b.len(),
                    ValueError: "cannot combine series of length {} and {}",
                    a.len(),
                    b.len()
                );
                let values = a
                    .values()
                    .iter()
                    .zip(b.values())
                    .map(|(x, y)| kernels::binary(op, x, y))
                    .collect::<TabulaResult<Vec<_>>>()?;
                let name = if a.name() == b.name() {
                    a.name().cloned()
                } else {
                    None
                };
                Ok(Self::Series(a.map_values(values).with_name(name)))
            }
            (Self::Series(a), Self::Scalar(y)) => {
                let values = a
                    .values()
                    .iter()
                    .map(|x| kernels::binary(op, x, y))
                    .collect::<TabulaResult<Vec<_>>>()?;
                Ok(Self::Series(a.map_values(values)))
            }
            (Self::Scalar(x), Self::Series(b)) => {
                let values = b
                    .values()
                    .iter()
                    .map(|y| kernels::binary(op, x, y))
                    .collect::<TabulaResult<Vec<_>>>()?;
                Ok(Self::Series(b.map_values(values)))
            }
            (Self::Scalar(x), Self::Scalar(y)) => kernels::binary(op, x, y).map(Self::Scalar),
            (Self::Tuple(_), Self::Tuple(_)) if matches!(op, "eq" | "ne") => {
                let equal = self.to_value() == other.to_value();
                Ok(Self::Scalar(Value::Bool(equal == (op == "eq"))))
            }
            _ => Err(TabulaError::type_error(format!(
                "unsupported operand types for {op}: '{}' and '{}'",
                self.kind(),
                other.kind()
            ))),
        }
    }

    /// Apply a unary operator element-wise.
    pub fn unary(&self, op: &str) -> TabulaResult<Self> {
        match self {
            Self::Series(s) => {
                let values = s
                    .values()
                    .iter()
                    .map(|v| kernels::unary(op, v))
                    .collect::<TabulaResult<Vec<_>>>()?;
                Ok(Self::Series(s.map_values(values)))
            }
            Self::Scalar(v) => kernels::unary(op, v).map(Self::Scalar),
            _ => Err(TabulaError::type_error(format!(
                "bad operand type for unary {op}: '{}'",
                self.kind()
            ))),
        }
    }

    /// `item in self`
    fn contains(&self, item: &Self) -> TabulaResult<Self> {
        let found = match (self, item) {
            (Self::Frame(df), Self::Scalar(v)) => label_of(v)
                .is_some_and(|label| df.columns().position(&label).is_some()),
            (Self::Series(s), Self::Scalar(v)) => label_of(v)
                .is_some_and(|label| s.index().position(&label).is_some()),
            (Self::Index(index), Self::Scalar(v)) => {
                label_of(v).is_some_and(|label| index.position(&label).is_some())
            }
            (Self::Scalar(Value::String(haystack)), Self::Scalar(Value::String(needle))) => {
                haystack.contains(needle.as_str())
            }
            (Self::Scalar(Value::List(items)), Self::Scalar(v)) => {
                items.iter().any(|x| kernels::values_equal(x, v))
            }
            (Self::Tuple(items), other) => items.iter().any(|x| x == other),
            _ => type_err!("argument of type '{}' is not iterable", self.kind()),
        };
        Ok(Self::Scalar(Value::Bool(found)))
    }
}

fn label_of(value: &Value) -> Option<Label> {
    Label::try_from(value.clone()).ok()
}

fn count(n: usize) -> Value {
    Value::Int64(n as i64)
}

fn positional(key: &Label, len: usize) -> TabulaResult<usize> {
    let Some(i) = key.as_int() else {
        type_err!("indices must be integers, not {key}");
    };
    let pos = if i < 0 { i + len as i64 } else { i };
    usize::try_from(pos)
        .ok()
        .filter(|p| *p < len)
        .ok_or_else(|| TabulaError::key_error(format!("index {i} out of range")))
}

fn no_args(name: &str, args: &[Datum], kwargs: &BTreeMap<String, Datum>) -> TabulaResult<()> {
    if args.is_empty() && kwargs.is_empty() {
        Ok(())
    } else {
        Err(TabulaError::type_error(format!(
            "{name}() takes no arguments ({} given)",
            args.len() + kwargs.len()
        )))
    }
}

fn single_arg(
    name: &str,
    mut args: Vec<Datum>,
    kwargs: BTreeMap<String, Datum>,
) -> TabulaResult<Datum> {
    ensure!(
        args.len() == 1 && kwargs.is_empty(),
        TypeError: "{name}() takes exactly one argument ({} given)",
        args.len() + kwargs.len()
    );
    args.pop()
        .ok_or_else(|| TabulaError::internal("argument vanished"))
}

fn string_arg(name: &str, arg: &Datum) -> TabulaResult<String> {
    match arg {
        Datum::Scalar(Value::String(s)) => Ok(s.clone()),
        other => Err(TabulaError::type_error(format!(
            "{name}() expects a string argument, got '{}'",
            other.kind()
        ))),
    }
}

/// A positional-or-keyword argument.
fn take_arg(
    args: &mut Vec<Datum>,
    kwargs: &mut BTreeMap<String, Datum>,
    position: usize,
    name: &str,
) -> Option<Datum> {
    let positional = (position < args.len()).then(|| args[position].clone());
    positional.or_else(|| kwargs.remove(name))
}

fn candidates(name: &str, arg: &Datum) -> TabulaResult<Vec<Value>> {
    match arg.to_value() {
        Some(Value::List(items)) => Ok(items),
        _ => Err(TabulaError::type_error(format!(
            "{name}() expects a list-like argument, got '{}'",
            arg.kind()
        ))),
    }
}

fn cast(value: &Value, dtype: DataType) -> TabulaResult<Value> {
    let failed = || {
        TabulaError::value_error(format!(
            "cannot convert {} to {dtype}",
            value.repr()
        ))
    };
    let converted = match (value, dtype) {
        (Value::Null, _) | (_, DataType::Object) => value.clone(),
        (v, DataType::String) => Value::String(v.to_string()),
        (Value::Bool(b), DataType::Int64) => Value::Int64(i64::from(*b)),
        (Value::Int64(_), DataType::Int64) => value.clone(),
        (Value::Float64(f), DataType::Int64) if f.is_finite() => Value::Int64(f.trunc() as i64),
        (Value::String(s), DataType::Int64) => {
            Value::Int64(s.trim().parse().map_err(|_| failed())?)
        }
        (Value::Bool(b), DataType::Float64) => Value::Float64(if *b { 1.0 } else { 0.0 }),
        (v, DataType::Float64) if v.is_numeric() => {
            Value::Float64(v.as_float64().ok_or_else(failed)?)
        }
        (Value::String(s), DataType::Float64) => {
            Value::Float64(s.trim().parse().map_err(|_| failed())?)
        }
        (v, DataType::Bool) => Value::Bool(kernels::truthy(v)),
        _ => return Err(failed()),
    };
    Ok(converted)
}

// ===== Series methods =====

fn reduce_extreme(s: &Series, name: &str, keep: std::cmp::Ordering) -> TabulaResult<Value> {
    let mut best: Option<&Value> = None;
    for value in s.values().iter().filter(|v| !v.is_null()) {
        best = match best {
            None => Some(value),
            Some(current) => {
                let ordering = kernels::partial_cmp(value, current).ok_or_else(|| {
                    TabulaError::type_error(format!(
                        "{name}() cannot compare {} and {}",
                        value.type_name(),
                        current.type_name()
                    ))
                })?;
                Some(if ordering == keep { value } else { current })
            }
        };
    }
    Ok(best.cloned().unwrap_or(Value::Null))
}

fn sum(s: &Series) -> TabulaResult<Value> {
    s.values()
        .iter()
        .filter(|v| !v.is_null())
        .try_fold(Value::Int64(0), |acc, v| kernels::binary("add", &acc, v))
}

fn series_method(
    s: &Series,
    name: &str,
    mut args: Vec<Datum>,
    mut kwargs: BTreeMap<String, Datum>,
) -> TabulaResult<Datum> {
    let scalar = |value: Value| Ok(Datum::Scalar(value));
    match name {
        "min" => {
            no_args(name, &args, &kwargs)?;
            scalar(reduce_extreme(s, name, std::cmp::Ordering::Less)?)
        }
        "max" => {
            no_args(name, &args, &kwargs)?;
            scalar(reduce_extreme(s, name, std::cmp::Ordering::Greater)?)
        }
        "sum" => {
            no_args(name, &args, &kwargs)?;
            scalar(sum(s)?)
        }
        "mean" => {
            no_args(name, &args, &kwargs)?;
            let n = s.values().iter().filter(|v| !v.is_null()).count();
            if n == 0 {
                return scalar(Value::Null);
            }
            kernels::binary("truediv", &sum(s)?, &count(n)).map(Datum::Scalar)
        }
        "count" => {
            no_args(name, &args, &kwargs)?;
            scalar(count(s.values().iter().filter(|v| !v.is_null()).count()))
        }
        "nunique" => {
            no_args(name, &args, &kwargs)?;
            let mut seen: Vec<&Value> = Vec::new();
            for value in s.values().iter().filter(|v| !v.is_null()) {
                if !seen.iter().any(|x| kernels::values_equal(x, value)) {
                    seen.push(value);
                }
            }
            scalar(count(seen.len()))
        }
        "tolist" => {
            no_args(name, &args, &kwargs)?;
            scalar(Value::List(s.values().to_vec()))
        }
        "clip" => {
            let lower = take_arg(&mut args, &mut kwargs, 0, "lower");
            let upper = take_arg(&mut args, &mut kwargs, 1, "upper");
            let bound = |datum: Option<Datum>| -> TabulaResult<Option<Value>> {
                match datum {
                    None | Some(Datum::Scalar(Value::Null)) => Ok(None),
                    Some(Datum::Scalar(v)) => Ok(Some(v)),
                    Some(other) => Err(TabulaError::type_error(format!(
                        "clip() bounds must be scalars, got '{}'",
                        other.kind()
                    ))),
                }
            };
            let (lower, upper) = (bound(lower)?, bound(upper)?);
            let values = s
                .values()
                .iter()
                .map(|v| clip(v, lower.as_ref(), upper.as_ref()))
                .collect::<TabulaResult<Vec<_>>>()?;
            Ok(Datum::Series(s.map_values(values)))
        }
        "astype" => {
            let arg = single_arg(name, args, kwargs)?;
            let dtype: DataType = string_arg(name, &arg)?.parse()?;
            let values = s
                .values()
                .iter()
                .map(|v| cast(v, dtype))
                .collect::<TabulaResult<Vec<_>>>()?;
            let declared = if dtype.needs_sampling() {
                DataType::Object
            } else {
                dtype
            };
            Ok(Datum::Series(s.map_values(values).with_dtype(declared)))
        }
        "isin" => {
            let arg = single_arg(name, args, kwargs)?;
            let candidates = candidates(name, &arg)?;
            let values = s
                .values()
                .iter()
                .map(|v| Value::Bool(candidates.iter().any(|c| kernels::values_equal(v, c))))
                .collect();
            Ok(Datum::Series(s.map_values(values)))
        }
        _ => Err(Datum::Series(s.clone()).no_attribute(name)),
    }
}

fn clip(value: &Value, lower: Option<&Value>, upper: Option<&Value>) -> TabulaResult<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let ordering = |bound: &Value| {
        kernels::partial_cmp(value, bound).ok_or_else(|| {
            TabulaError::type_error(format!(
                "cannot clip {} with a {} bound",
                value.type_name(),
                bound.type_name()
            ))
        })
    };
    if let Some(lower) = lower {
        if ordering(lower)?.is_lt() {
            return Ok(lower.clone());
        }
    }
    if let Some(upper) = upper {
        if ordering(upper)?.is_gt() {
            return Ok(upper.clone());
        }
    }
    Ok(value.clone())
}

// ===== String methods =====

fn str_method(
    s: &Series,
    name: &str,
    args: Vec<Datum>,
    kwargs: BTreeMap<String, Datum>,
) -> TabulaResult<Datum> {
    let apply: Box<dyn Fn(&str) -> Value> = match name {
        "upper" | "lower" | "strip" | "len" | "islower" | "isupper" => {
            no_args(name, &args, &kwargs)?;
            match name {
                "upper" => Box::new(|x: &str| Value::from(x.to_uppercase())),
                "lower" => Box::new(|x: &str| Value::from(x.to_lowercase())),
                "strip" => Box::new(|x: &str| Value::from(x.trim())),
                "len" => Box::new(|x: &str| count(x.chars().count())),
                "islower" => Box::new(|x: &str| {
                    Value::Bool(
                        x.chars().any(char::is_lowercase) && !x.chars().any(char::is_uppercase),
                    )
                }),
                _ => Box::new(|x: &str| {
                    Value::Bool(
                        x.chars().any(char::is_uppercase) && !x.chars().any(char::is_lowercase),
                    )
                }),
            }
        }
        "startswith" | "endswith" | "contains" => {
            let arg = single_arg(name, args, kwargs)?;
            let pattern = string_arg(name, &arg)?;
            match name {
                "startswith" => Box::new(move |x: &str| Value::Bool(x.starts_with(&pattern))),
                "endswith" => Box::new(move |x: &str| Value::Bool(x.ends_with(&pattern))),
                _ => Box::new(move |x: &str| Value::Bool(x.contains(&pattern))),
            }
        }
        _ => return Err(Datum::Str(s.clone()).no_attribute(name)),
    };

    let values = s
        .values()
        .iter()
        .map(|v| v.as_str().map_or(Value::Null, |x| apply(x)))
        .collect();
    Ok(Datum::Series(s.map_values(values)))
}

// ===== Frame methods =====

fn frame_method(
    df: &Frame,
    name: &str,
    args: Vec<Datum>,
    kwargs: BTreeMap<String, Datum>,
) -> TabulaResult<Datum> {
    match name {
        "assign" => {
            ensure!(args.is_empty(), TypeError: "assign() takes only keyword arguments");
            let mut frame = df.clone();
            for (label, value) in kwargs {
                let series = match value {
                    Datum::Series(series) => series,
                    Datum::Scalar(v) => Series::from_values(None, vec![v; frame.num_rows()]),
                    other => type_err!("cannot assign a {} as column {label}", other.kind()),
                };
                frame = frame.assign(label, series)?;
            }
            Ok(Datum::Frame(frame))
        }
        "head" => {
            let mut args = args;
            let mut kwargs = kwargs;
            let n = match take_arg(&mut args, &mut kwargs, 0, "n") {
                None => 5,
                Some(Datum::Scalar(Value::Int64(n))) => usize::try_from(n).unwrap_or(0),
                Some(other) => type_err!("head() expects an integer, got '{}'", other.kind()),
            };
            let positions: Vec<usize> = (0..n.min(df.num_rows())).collect();
            Ok(Datum::Frame(df.take_rows(&positions)))
        }
        _ => Err(Datum::Frame(df.clone()).no_attribute(name)),
    }
}

// ===== Target =====

impl Target for Datum {
    fn subject(&self) -> Option<Subject> {
        match self {
            Self::Frame(_) => Some(Subject::Frame),
            Self::Series(_) => Some(Subject::Series),
            _ => None,
        }
    }

    fn from_value(value: Value) -> Self {
        Self::Scalar(value)
    }

    fn attribute(&self, name: &str) -> TabulaResult<Self> {
        match (self, name) {
            (Self::Frame(df), "shape") => Ok(Self::Tuple(vec![
                Self::Scalar(count(df.num_rows())),
                Self::Scalar(count(df.num_columns())),
            ])),
            (Self::Frame(df), "columns") => Ok(Self::Index(df.columns().clone())),
            (Self::Frame(df), "index") => Ok(Self::Index(df.index().clone())),
            (Self::Frame(df), "loc") => Ok(Self::Loc(df.clone())),
            (Self::Frame(df), "size") => Ok(Self::Scalar(count(df.num_rows() * df.num_columns()))),
            (Self::Frame(df), column) => match df.column(&Label::from(column)) {
                Ok(series) => Ok(Self::Series(series.clone())),
                Err(_) => Err(self.no_attribute(name)),
            },
            (Self::Series(s), "str") => Ok(Self::Str(s.clone())),
            (Self::Series(s), "dtype") => Ok(Self::Scalar(Value::from(s.dtype().display_name()))),
            (Self::Series(s), "name") => Ok(Self::Scalar(
                s.name().map_or(Value::Null, Label::to_value),
            )),
            (Self::Series(s), "size") => Ok(Self::Scalar(count(s.len()))),
            (Self::Series(s), "shape") => Ok(Self::Tuple(vec![Self::Scalar(count(s.len()))])),
            (Self::Series(s), "index") => Ok(Self::Index(s.index().clone())),
            (Self::Index(index), "size") => Ok(Self::Scalar(count(index.len()))),
            (Self::Index(index), "nlevels") => Ok(Self::Scalar(count(index.nlevels()))),
            _ => Err(self.no_attribute(name)),
        }
    }

    fn item(&self, key: &Label) -> TabulaResult<Self> {
        match self {
            Self::Frame(df) => df.column(key).cloned().map(Self::Series),
            Self::Series(s) => s.get(key).cloned().map(Self::Scalar),
            Self::Loc(df) => df.row(key).map(Self::Series),
            Self::Index(index) => {
                let pos = positional(key, index.len())?;
                Ok(Self::Scalar(index.labels()[pos].to_value()))
            }
            Self::Tuple(items) => Ok(items[positional(key, items.len())?].clone()),
            Self::Scalar(Value::List(items)) => {
                Ok(Self::Scalar(items[positional(key, items.len())?].clone()))
            }
            Self::Str(s) => {
                let i = key.as_int().ok_or_else(|| {
                    TabulaError::type_error(format!("string indices must be integers, not {key}"))
                })?;
                let values = s
                    .values()
                    .iter()
                    .map(|v| {
                        let chars: Vec<char> = v.as_str().unwrap_or_default().chars().collect();
                        positional(&Label::Int(i), chars.len())
                            .map_or(Value::Null, |p| Value::from(chars[p].to_string()))
                    })
                    .collect();
                Ok(Self::Series(s.map_values(values)))
            }
            Self::Scalar(v) => Err(TabulaError::type_error(format!(
                "'{}' object is not subscriptable",
                v.type_name()
            ))),
        }
    }

    fn invoke(
        &self,
        name: &str,
        args: Vec<Self>,
        kwargs: BTreeMap<String, Self>,
    ) -> TabulaResult<Self> {
        if let Some((op, swapped)) = kernels::binary_op(name) {
            let other = single_arg(name, args, kwargs)?;
            return if swapped {
                other.binary(op, self)
            } else {
                self.binary(op, &other)
            };
        }

        match name {
            "divmod" | "rdivmod" => {
                let other = single_arg(name, args, kwargs)?;
                let (left, right) = if name == "divmod" {
                    (self, &other)
                } else {
                    (&other, self)
                };
                Ok(Self::Tuple(vec![
                    left.binary("floordiv", right)?,
                    left.binary("mod", right)?,
                ]))
            }
            "contains" => {
                let other = single_arg(name, args, kwargs)?;
                self.contains(&other)
            }
            op if UNARY_OPS.contains(&op) => {
                no_args(name, &args, &kwargs)?;
                self.unary(op)
            }
            _ => match self {
                Self::Series(s) => series_method(s, name, args, kwargs),
                Self::Str(s) => str_method(s, name, args, kwargs),
                Self::Frame(df) => frame_method(df, name, args, kwargs),
                _ => Err(self.no_attribute(name)),
            },
        }
    }
}

impl From<Frame> for Datum {
    fn from(df: Frame) -> Self {
        Self::Frame(df)
    }
}

impl From<Series> for Datum {
    fn from(s: Series) -> Self {
        Self::Series(s)
    }
}

impl From<Value> for Datum {
    fn from(v: Value) -> Self {
        Self::Scalar(v)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(df) => write!(f, "{df}"),
            Self::Series(s) => write!(f, "{s}"),
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Self::Index(index) => write!(f, "Index({index})"),
            Self::Str(_) | Self::Loc(_) => write!(f, "<{}>", self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Datum {
        Datum::Frame(
            Frame::new([
                ("x", vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]),
                ("name", vec![Value::from("ab"), Value::from("Cd"), Value::Null]),
            ])
            .unwrap(),
        )
    }

    fn values(datum: &Datum) -> Vec<Value> {
        datum.as_series().unwrap().values().to_vec()
    }

    fn call(target: &Datum, name: &str, args: Vec<Datum>) -> TabulaResult<Datum> {
        target.invoke(name, args, BTreeMap::new())
    }

    fn lit(v: impl Into<Value>) -> Datum {
        Datum::Scalar(v.into())
    }

    #[test]
    fn test_shape_renders_as_tuple() {
        let shape = frame().attribute("shape").unwrap();
        assert_eq!(shape.to_string(), "(3, 2)");
        assert_eq!(frame().subject(), Some(Subject::Frame));
        assert_eq!(shape.subject(), None);
    }

    #[test]
    fn test_column_access() {
        let df = frame();
        let by_item = df.item(&Label::from("x")).unwrap();
        let by_attr = df.attribute("x").unwrap();
        assert_eq!(by_item, by_attr);
        assert!(df.item(&Label::from("nope")).unwrap_err().is_key_error());
        assert!(matches!(
            df.attribute("nope").unwrap_err(),
            TabulaError::AttributeError(_)
        ));
    }

    #[test]
    fn test_broadcast_and_reflected() {
        let x = frame().attribute("x").unwrap();
        let doubled = call(&x, "mul", vec![lit(2i64)]).unwrap();
        assert_eq!(values(&doubled), vec![Value::from(2i64), Value::from(4i64), Value::from(6i64)]);

        let ten_minus = call(&x, "rsub", vec![lit(10i64)]).unwrap();
        assert_eq!(values(&ten_minus), vec![Value::from(9i64), Value::from(8i64), Value::from(7i64)]);

        let sum = call(&x, "add", vec![x.clone()]).unwrap();
        assert_eq!(values(&sum), values(&doubled));
        assert_eq!(sum.as_series().unwrap().name(), Some(&Label::from("x")));
    }

    #[test]
    fn test_argument_errors() {
        let x = frame().attribute("x").unwrap();
        assert_eq!(
            call(&x, "add", vec![]).unwrap_err().to_string(),
            "TypeError: add() takes exactly one argument (0 given)"
        );
        assert!(matches!(
            call(&frame(), "assign", vec![lit(1i64)]).unwrap_err(),
            TabulaError::TypeError(_)
        ));
        assert!(matches!(
            call(&frame(), "head", vec![lit("two")]).unwrap_err(),
            TabulaError::TypeError(_)
        ));
        assert!(matches!(
            call(&lit(3i64), "contains", vec![lit(1i64)]).unwrap_err(),
            TabulaError::TypeError(_)
        ));

        let short = Datum::Series(Series::new("s", [1i64]));
        assert!(matches!(
            call(&x, "add", vec![short]).unwrap_err(),
            TabulaError::ValueError(_)
        ));
    }

    #[test]
    fn test_reductions() {
        let x = frame().attribute("x").unwrap();
        assert_eq!(call(&x, "min", vec![]).unwrap(), lit(1i64));
        assert_eq!(call(&x, "max", vec![]).unwrap(), lit(3i64));
        assert_eq!(call(&x, "sum", vec![]).unwrap(), lit(6i64));
        assert_eq!(call(&x, "mean", vec![]).unwrap(), lit(2.0));

        let name = frame().attribute("name").unwrap();
        assert_eq!(call(&name, "count", vec![]).unwrap(), lit(2i64));
        assert_eq!(call(&name, "nunique", vec![]).unwrap(), lit(2i64));
        assert!(call(&x, "min", vec![lit(1i64)]).is_err());
    }

    #[test]
    fn test_clip_with_keyword() {
        let x = frame().attribute("x").unwrap();
        let mut kwargs = BTreeMap::new();
        kwargs.insert("upper".to_string(), lit(2i64));
        let clipped = x.invoke("clip", vec![], kwargs).unwrap();
        assert_eq!(values(&clipped), vec![Value::from(1i64), Value::from(2i64), Value::from(2i64)]);

        let clipped = call(&x, "clip", vec![lit(2i64)]).unwrap();
        assert_eq!(values(&clipped), vec![Value::from(2i64), Value::from(2i64), Value::from(3i64)]);
    }

    #[test]
    fn test_string_methods() {
        let s = frame().attribute("name").unwrap().attribute("str").unwrap();
        let upper = call(&s, "upper", vec![]).unwrap();
        assert_eq!(values(&upper), vec![Value::from("AB"), Value::from("CD"), Value::Null]);

        let starts = call(&s, "startswith", vec![lit("C")]).unwrap();
        assert_eq!(values(&starts), vec![Value::Bool(false), Value::Bool(true), Value::Null]);

        let lower = call(&s, "islower", vec![]).unwrap();
        assert_eq!(values(&lower), vec![Value::Bool(true), Value::Bool(false), Value::Null]);

        let first = s.item(&Label::from(0i64)).unwrap();
        assert_eq!(values(&first), vec![Value::from("a"), Value::from("C"), Value::Null]);

        assert!(call(&s, "reverse", vec![]).is_err());
    }

    #[test]
    fn test_astype_str_declares_object() {
        let x = frame().attribute("x").unwrap();
        let text = call(&x, "astype", vec![lit("str")]).unwrap();
        let series = text.as_series().unwrap();
        assert_eq!(series.dtype(), DataType::Object);
        assert_eq!(series.values()[0], Value::from("1"));

        let floats = call(&x, "astype", vec![lit("float")]).unwrap();
        assert_eq!(floats.as_series().unwrap().dtype(), DataType::Float64);
    }

    #[test]
    fn test_isin_and_contains() {
        let x = frame().attribute("x").unwrap();
        let mask = call(&x, "isin", vec![lit(vec![Value::from(1i64), Value::from(3i64)])]).unwrap();
        assert_eq!(values(&mask), vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]);

        assert_eq!(call(&frame(), "contains", vec![lit("x")]).unwrap(), lit(true));
        assert_eq!(call(&frame(), "contains", vec![lit("y")]).unwrap(), lit(false));
    }

    #[test]
    fn test_divmod_and_unary() {
        let result = call(&lit(-7i64), "divmod", vec![lit(2i64)]).unwrap();
        assert_eq!(result.to_string(), "(-4, 1)");

        let result = call(&lit(2i64), "rdivmod", vec![lit(7i64)]).unwrap();
        assert_eq!(result.to_string(), "(3, 1)");

        assert_eq!(call(&lit(true), "invert", vec![]).unwrap(), lit(false));
        assert_eq!(call(&lit(-2.5), "abs", vec![]).unwrap(), lit(2.5));
    }

    #[test]
    fn test_loc_row_and_assign_method() {
        let df = frame();
        let row = df.attribute("loc").unwrap().item(&Label::from(1i64)).unwrap();
        assert_eq!(row.item(&Label::from("name")).unwrap(), lit("Cd"));

        let mut kwargs = BTreeMap::new();
        kwargs.insert("y".to_string(), lit(0i64));
        let assigned = df.invoke("assign", vec![], kwargs).unwrap();
        assert_eq!(assigned.as_frame().unwrap().shape(), (3, 3));
    }
}
