//! The deferred expression type.

use std::collections::BTreeMap;

use common_error::{TabulaError, TabulaResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tabula_core::{Label, Resolve, Subject, Target};

use super::{Arg, Invocation, Operator, Step};

/// A value to be computed later from a table.
///
/// An `Expr` records attribute access, item access and method or operator
/// calls against a symbolic root, without touching any data. Evaluating it
/// against a concrete target replays the steps in order. Every builder
/// returns a new expression; a recorded expression never changes.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use tabula_expr::{Arg, col, df};
///
/// // DF["x"].clip(upper=DF["y"].min())
/// let mut kwargs = BTreeMap::new();
/// kwargs.insert("upper".to_string(), Arg::from(col("y").method("min", vec![])));
/// let clipped = col("x").invoke("clip", vec![], kwargs);
/// assert_eq!(clipped.to_string(), r#"DF["x"].clip(upper=DF["y"].min())"#);
///
/// // Operators build invocations too.
/// let small = df().attr("x").lt(3i64);
/// assert_eq!(small.to_string(), "DF.x < 3");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    subject: Subject,
    steps: Vec<Step>,
}

/// The root expression standing for a whole table (`DF`).
pub const fn df() -> Expr {
    Expr::root(Subject::Frame)
}

/// The root expression standing for a single column (`S`).
pub const fn series() -> Expr {
    Expr::root(Subject::Series)
}

/// Shorthand for `df().item(label)`.
pub fn col(label: impl Into<Label>) -> Expr {
    df().item(label)
}

/// An argument of the dual-purpose [`Expr::apply`].
#[derive(Debug, Clone)]
pub enum CallArg<T> {
    /// A concrete table or column.
    Target(T),
    /// Anything that can be recorded.
    Arg(Arg),
}

impl<T> From<Arg> for CallArg<T> {
    fn from(arg: Arg) -> Self {
        Self::Arg(arg)
    }
}

/// What [`Expr::apply`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<T> {
    /// The expression was evaluated against the passed target.
    Evaluated(T),
    /// A new expression was recorded.
    Built(Expr),
}

impl Expr {
    /// Create an empty expression for `subject`.
    pub const fn root(subject: Subject) -> Self {
        Self {
            subject,
            steps: Vec::new(),
        }
    }

    /// The kind of object this expression is applied to.
    pub const fn subject(&self) -> Subject {
        self.subject
    }

    /// The recorded steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether nothing has been recorded yet.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// The expression without its last step.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.steps.split_last()?;
        Some(Self {
            subject: self.subject,
            steps: rest.to_vec(),
        })
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Record `obj.name`.
    #[must_use]
    pub fn attr(self, name: impl Into<String>) -> Self {
        self.push(Step::Attribute(name.into()))
    }

    /// Record `obj[key]`.
    #[must_use]
    pub fn item(self, key: impl Into<Label>) -> Self {
        self.push(Step::Item(key.into()))
    }

    /// Record `obj.name(*args, **kwargs)`.
    #[must_use]
    pub fn invoke(
        self,
        name: impl Into<String>,
        args: Vec<Arg>,
        kwargs: BTreeMap<String, Arg>,
    ) -> Self {
        self.push(Step::Invoke(Invocation::new(name, args, kwargs)))
    }

    /// Record `obj.name(*args)`.
    #[must_use]
    pub fn method(self, name: impl Into<String>, args: Vec<Arg>) -> Self {
        self.invoke(name, args, BTreeMap::new())
    }

    /// Call the last recorded step.
    ///
    /// A trailing attribute becomes a method call with these arguments; a
    /// trailing call has its arguments replaced. Calling the root or an item
    /// is a type error.
    pub fn call(mut self, args: Vec<Arg>, kwargs: BTreeMap<String, Arg>) -> TabulaResult<Self> {
        let name = match self.steps.pop() {
            Some(Step::Attribute(name)) => name,
            Some(Step::Invoke(invocation)) => invocation.name,
            Some(Step::Item(key)) => {
                return Err(TabulaError::type_error(format!(
                    "item {key} of {} is not callable",
                    self.subject
                )));
            }
            None => {
                return Err(TabulaError::type_error(format!(
                    "cannot record a call on the bare {} root",
                    self.subject
                )));
            }
        };
        Ok(self.invoke(name, args, kwargs))
    }

    // ===== Operators =====

    /// Record a binary operator with this expression on the left.
    #[must_use]
    pub fn binary(self, op: Operator, other: impl Into<Arg>) -> Self {
        self.method(op.name(), vec![other.into()])
    }

    /// Record a binary operator with this expression on the right.
    ///
    /// Operators without a reflected form are recorded in their forward form.
    #[must_use]
    pub fn reflected(self, op: Operator, other: impl Into<Arg>) -> Self {
        let name = op.reflected_name().unwrap_or(op.name());
        self.method(name, vec![other.into()])
    }

    /// Record a unary operator.
    #[must_use]
    pub fn unary(self, op: Operator) -> Self {
        self.method(op.name(), Vec::new())
    }

    /// `self == other`
    #[must_use]
    pub fn eq(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Eq, other)
    }

    /// `self != other`
    #[must_use]
    pub fn ne(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Ne, other)
    }

    /// `self < other`
    #[must_use]
    pub fn lt(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Lt, other)
    }

    /// `self <= other`
    #[must_use]
    pub fn le(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Le, other)
    }

    /// `self > other`
    #[must_use]
    pub fn gt(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Gt, other)
    }

    /// `self >= other`
    #[must_use]
    pub fn ge(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Ge, other)
    }

    /// `self + other`
    #[must_use]
    pub fn add(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Add, other)
    }

    /// `self - other`
    #[must_use]
    pub fn sub(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Sub, other)
    }

    /// `self * other`
    #[must_use]
    pub fn mul(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Mul, other)
    }

    /// `self / other`
    #[must_use]
    pub fn truediv(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::TrueDiv, other)
    }

    /// `self // other`
    #[must_use]
    pub fn floordiv(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::FloorDiv, other)
    }

    /// `self % other`
    #[must_use]
    pub fn rem(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Mod, other)
    }

    /// `self ** other`
    #[must_use]
    pub fn pow(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Pow, other)
    }

    /// `divmod(self, other)`
    #[must_use]
    pub fn divmod(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::DivMod, other)
    }

    /// `self & other`
    #[must_use]
    pub fn and(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::And, other)
    }

    /// `self | other`
    #[must_use]
    pub fn or(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Or, other)
    }

    /// `self ^ other`
    #[must_use]
    pub fn xor(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Xor, other)
    }

    /// `other in self`
    #[must_use]
    pub fn contains(self, other: impl Into<Arg>) -> Self {
        self.binary(Operator::Contains, other)
    }

    /// `other + self`
    #[must_use]
    pub fn radd(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Add, other)
    }

    /// `other - self`
    #[must_use]
    pub fn rsub(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Sub, other)
    }

    /// `other * self`
    #[must_use]
    pub fn rmul(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Mul, other)
    }

    /// `other / self`
    #[must_use]
    pub fn rtruediv(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::TrueDiv, other)
    }

    /// `other // self`
    #[must_use]
    pub fn rfloordiv(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::FloorDiv, other)
    }

    /// `other % self`
    #[must_use]
    pub fn rmod(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Mod, other)
    }

    /// `other ** self`
    #[must_use]
    pub fn rpow(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Pow, other)
    }

    /// `divmod(other, self)`
    #[must_use]
    pub fn rdivmod(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::DivMod, other)
    }

    /// `other & self`
    #[must_use]
    pub fn rand(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::And, other)
    }

    /// `other | self`
    #[must_use]
    pub fn ror(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Or, other)
    }

    /// `other ^ self`
    #[must_use]
    pub fn rxor(self, other: impl Into<Arg>) -> Self {
        self.reflected(Operator::Xor, other)
    }

    /// `-self`
    #[must_use]
    pub fn neg(self) -> Self {
        self.unary(Operator::Neg)
    }

    /// `+self`
    #[must_use]
    pub fn pos(self) -> Self {
        self.unary(Operator::Pos)
    }

    /// `abs(self)`
    #[must_use]
    pub fn abs(self) -> Self {
        self.unary(Operator::Abs)
    }

    /// `~self`
    #[must_use]
    pub fn invert(self) -> Self {
        self.unary(Operator::Invert)
    }

    // ===== Evaluation =====

    /// Replay the recorded steps against `root`.
    ///
    /// Nested expression arguments are evaluated against `root` as well, not
    /// against the intermediate value they are passed to. Errors from the
    /// target are returned unchanged.
    pub fn evaluate<T: Target>(&self, root: &T) -> TabulaResult<T> {
        debug!(
            "Evaluating {} step(s) recorded on {}",
            self.steps.len(),
            self.subject
        );
        let mut current = root.clone();
        for step in &self.steps {
            trace!("Replaying {step:?}");
            current = match step {
                Step::Attribute(name) => current.attribute(name)?,
                Step::Item(key) => current.item(key)?,
                Step::Invoke(invocation) => {
                    let (args, kwargs) = invocation.resolve_args(root)?;
                    current.invoke(&invocation.name, args, kwargs)?
                }
            };
        }
        Ok(current)
    }

    /// Call the expression with mixed arguments.
    ///
    /// Exactly one positional target whose subject matches this expression's
    /// subject evaluates the expression on it; keyword arguments are ignored
    /// in that case. Anything else records a call of the last step, as
    /// [`Expr::call`] does.
    ///
    /// # Errors
    ///
    /// A `TypeError` when a target does not trigger evaluation: it sits next
    /// to other positional arguments, or its subject differs from the
    /// expression's. A recorded call holds symbolic arguments only, so the
    /// concrete target cannot be kept.
    pub fn apply<T: Target>(
        &self,
        args: Vec<CallArg<T>>,
        kwargs: BTreeMap<String, Arg>,
    ) -> TabulaResult<Applied<T>> {
        if args.len() == 1 {
            if let Some(CallArg::Target(target)) = args.first() {
                if target.subject() == Some(self.subject) {
                    return self.evaluate(target).map(Applied::Evaluated);
                }
            }
        }

        let args = args
            .into_iter()
            .map(|arg| match arg {
                CallArg::Arg(arg) => Ok(arg),
                CallArg::Target(target) => Err(TabulaError::type_error(format!(
                    "cannot record a concrete target {target:?} as an argument of {self}"
                ))),
            })
            .collect::<TabulaResult<Vec<_>>>()?;
        self.clone().call(args, kwargs).map(Applied::Built)
    }
}

impl<T: Target> Resolve<T> for Expr {
    type Output = T;

    fn resolve(&self, target: &T) -> TabulaResult<T> {
        self.evaluate(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::testing::Trace;
    use tabula_core::Value;

    #[test]
    fn test_builders_do_not_mutate() {
        let base = df().attr("x");
        let a = base.clone().method("min", vec![]);
        let b = base.clone().method("max", vec![]);

        assert_eq!(base.steps().len(), 1);
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(base.clone()));
        assert_eq!(b.parent(), Some(base));
    }

    #[test]
    fn test_call_turns_attribute_into_method() {
        let called = df().attr("x").attr("clip").call(vec![Arg::from(0i64)], BTreeMap::new());
        assert_eq!(
            called.unwrap(),
            df().attr("x").method("clip", vec![Arg::from(0i64)])
        );
    }

    #[test]
    fn test_call_replaces_arguments() {
        let once = df().attr("clip").call(vec![Arg::from(0i64)], BTreeMap::new()).unwrap();
        let twice = once.call(vec![Arg::from(1i64)], BTreeMap::new()).unwrap();
        assert_eq!(twice, df().method("clip", vec![Arg::from(1i64)]));
    }

    #[test]
    fn test_call_rejects_root_and_item() {
        assert!(matches!(
            df().call(vec![], BTreeMap::new()),
            Err(TabulaError::TypeError(_))
        ));
        assert!(matches!(
            col("x").call(vec![], BTreeMap::new()),
            Err(TabulaError::TypeError(_))
        ));
    }

    #[test]
    fn test_building_does_not_touch_target() {
        let root = Trace::frame("T");
        let expr = col("x").lt(3i64).and(df().attr("y").method("min", vec![]));
        assert_eq!(root.accesses(), 0);

        let result = expr.evaluate(&root).unwrap();
        assert_eq!(root.accesses(), 5);
        assert_eq!(result.path(), "T[\"x\"].lt(3).and(T.y.min())");
    }

    #[test]
    fn test_nested_args_resolve_against_root() {
        let root = Trace::frame("T");
        let expr = df()
            .attr("a")
            .attr("b")
            .method("clip", vec![Arg::from(df().attr("c").method("min", vec![]))]);
        let result = expr.evaluate(&root).unwrap();
        assert_eq!(result.path(), "T.a.b.clip(T.c.min())");
    }

    #[test]
    fn test_apply_evaluates_matching_target() {
        let expr = series().method("upper", vec![]);
        let applied = expr
            .apply(vec![CallArg::Target(Trace::series("S"))], BTreeMap::new())
            .unwrap();
        match applied {
            Applied::Evaluated(trace) => assert_eq!(trace.path(), "S.upper()"),
            Applied::Built(_) => panic!("expected evaluation"),
        }
    }

    #[test]
    fn test_apply_evaluates_despite_keywords() {
        let expr = series().method("upper", vec![]);
        let mut kwargs = BTreeMap::new();
        kwargs.insert("errors".to_string(), Arg::from("ignore"));
        let applied = expr
            .apply(vec![CallArg::Target(Trace::series("S"))], kwargs)
            .unwrap();
        match applied {
            Applied::Evaluated(trace) => assert_eq!(trace.path(), "S.upper()"),
            Applied::Built(_) => panic!("expected evaluation"),
        }
    }

    #[test]
    fn test_apply_builds_otherwise() {
        // A frame target does not match a series expression.
        let expr = series().attr("clip");
        let applied = expr
            .apply::<Trace>(vec![CallArg::Arg(Arg::from(1i64))], BTreeMap::new())
            .unwrap();
        assert_eq!(
            applied,
            Applied::Built(series().method("clip", vec![Arg::from(1i64)]))
        );

        let err = expr
            .apply(
                vec![CallArg::Target(Trace::frame("T")), CallArg::Arg(Arg::from(1i64))],
                BTreeMap::new(),
            )
            .unwrap_err();
        assert!(matches!(err, TabulaError::TypeError(_)));
    }

    #[test]
    fn test_reflected_records_reflected_name() {
        let expr = df().attr("x").rsub(Value::from(10i64));
        match expr.steps().last() {
            Some(Step::Invoke(inv)) => assert_eq!(inv.name, "rsub"),
            other => panic!("unexpected step {other:?}"),
        }
    }
}
