//! Property-based testing utilities for tabula-expr.
//!
//! Strategies for arbitrary expression chains (with nested expression
//! arguments) and the structural properties they must satisfy.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use tabula_core::testing::Trace;
    use tabula_core::{Label, Subject, Value};

    use crate::expr::{Arg, Expr, Invocation, Operator, Step};

    // =========================================================================
    // Arbitrary Strategies
    // =========================================================================

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}"
    }

    fn arb_literal() -> impl Strategy<Value = Arg> + Clone {
        prop_oneof![
            any::<bool>().prop_map(Arg::from),
            any::<i64>().prop_map(Arg::from),
            any::<i32>().prop_map(|i| Arg::from(f64::from(i))),
            "[a-zA-Z ]{0,8}".prop_map(Arg::from),
            Just(Arg::Literal(Value::Null)),
        ]
    }

    fn arb_subject() -> impl Strategy<Value = Subject> {
        prop_oneof![Just(Subject::Frame), Just(Subject::Series)]
    }

    fn arb_step(arg: impl Strategy<Value = Arg> + Clone) -> impl Strategy<Value = Step> {
        prop_oneof![
            arb_name().prop_map(Step::Attribute),
            arb_name().prop_map(|name| Step::Item(Label::Str(name))),
            any::<i64>().prop_map(|i| Step::Item(Label::Int(i))),
            (
                arb_name(),
                prop::collection::vec(arg.clone(), 0..3),
                prop::collection::btree_map(arb_name(), arg, 0..2),
            )
                .prop_map(|(name, args, kwargs)| {
                    Step::Invoke(Invocation::new(name, args, kwargs))
                }),
        ]
    }

    fn with_steps(subject: Subject, steps: Vec<Step>) -> Expr {
        steps.into_iter().fold(Expr::root(subject), |expr, step| match step {
            Step::Attribute(name) => expr.attr(name),
            Step::Item(key) => expr.item(key),
            Step::Invoke(inv) => expr.invoke(inv.name, inv.args, inv.kwargs),
        })
    }

    fn arb_expr() -> impl Strategy<Value = Expr> {
        let flat = (arb_subject(), prop::collection::vec(arb_step(arb_literal()), 0..4))
            .prop_map(|(subject, steps)| with_steps(subject, steps));
        flat.prop_recursive(2, 16, 3, |inner| {
            let arg = prop_oneof![arb_literal(), inner.prop_map(Arg::from)];
            (arb_subject(), prop::collection::vec(arb_step(arg), 0..4))
                .prop_map(|(subject, steps)| with_steps(subject, steps))
        })
    }

    fn arb_comparison() -> impl Strategy<Value = Operator> {
        prop::sample::select(
            Operator::ALL
                .iter()
                .copied()
                .filter(Operator::is_comparison)
                .collect::<Vec<_>>(),
        )
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #[test]
        fn expr_serde_roundtrip(expr in arb_expr()) {
            let json = serde_json::to_string(&expr).unwrap();
            let back: Expr = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&expr, &back);
            prop_assert_eq!(expr.name(), back.name());
        }

        #[test]
        fn roundtrip_replays_identically(expr in arb_expr()) {
            let json = serde_json::to_string(&expr).unwrap();
            let back: Expr = serde_json::from_str(&json).unwrap();

            let root = Trace::new("T", expr.subject());
            let original = expr.evaluate(&root).unwrap();
            let replayed = back.evaluate(&root).unwrap();
            prop_assert_eq!(original.path(), replayed.path());
        }

        #[test]
        fn building_never_mutates(expr in arb_expr(), name in arb_name()) {
            let before = expr.clone();
            let extended = expr.clone().attr(name);
            prop_assert_eq!(&expr, &before);
            prop_assert_eq!(extended.parent(), Some(before));
        }

        #[test]
        fn comparison_truth_follows_structure(
            left in arb_expr(),
            right in arb_expr(),
            op in arb_comparison(),
        ) {
            let same = left.clone().binary(op, left.clone()).to_bool();
            prop_assert_eq!(same, op.is_reflexive());

            let mixed = left.clone().binary(op, right.clone()).to_bool();
            let expected = if op.is_reflexive() { left == right } else { left != right };
            prop_assert_eq!(mixed, expected);
        }

        #[test]
        fn building_does_not_touch_the_root(expr in arb_expr()) {
            let root = Trace::new("T", expr.subject());
            let _ = expr.clone().method("sum", Vec::new()).invoke("clip", Vec::new(), BTreeMap::new());
            prop_assert_eq!(root.accesses(), 0);

            expr.evaluate(&root).unwrap();
            prop_assert_eq!(root.accesses(), expr.steps().len() + nested_steps(&expr));
        }
    }

    fn nested_steps(expr: &Expr) -> usize {
        expr.steps()
            .iter()
            .map(|step| match step {
                Step::Invoke(inv) => inv
                    .args
                    .iter()
                    .chain(inv.kwargs.values())
                    .filter_map(Arg::as_expr)
                    .map(|nested| nested.steps().len() + nested_steps(nested))
                    .sum::<usize>(),
                _ => 0,
            })
            .sum()
    }
}
