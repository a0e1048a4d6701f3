//! Boolean coercion of recorded expressions.

use log::warn;

use super::{Arg, Expr, Operator, Step};

impl Expr {
    /// Coerce the expression to a boolean without evaluating it.
    ///
    /// Comparison builders return new expressions instead of booleans, so a
    /// trailing comparison is decided on the structure of its two operands:
    /// `==`, `<=` and `>=` hold iff they are structurally equal, while `!=`,
    /// `<` and `>` hold iff they differ. Every other expression is truthy.
    pub fn to_bool(&self) -> bool {
        let Some(Step::Invoke(invocation)) = self.steps().last() else {
            return true;
        };
        let Some((op, _)) = Operator::from_name(&invocation.name) else {
            return true;
        };
        if !op.is_comparison() {
            return true;
        }
        let (Some(left), Some(right)) = (self.parent(), invocation.single_arg()) else {
            return true;
        };

        if op.is_ordering() {
            warn!("Ordering comparison {self} coerced to bool compares structure, not values");
        }

        let same = match right {
            Arg::Expr(right) => left == *right,
            Arg::Literal(_) => false,
        };
        if op.is_reflexive() { same } else { !same }
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{col, df, series};

    #[test]
    fn test_equality_is_structural() {
        assert!(col("x").eq(col("x")).to_bool());
        assert!(!col("x").eq(col("y")).to_bool());
        assert!(!col("x").ne(col("x")).to_bool());
        assert!(col("x").ne(df().attr("x")).to_bool());

        // Same steps on a different subject are different expressions.
        assert!(!df().attr("x").eq(series().attr("x")).to_bool());
    }

    #[test]
    fn test_ordering_comparisons() {
        let x = df().attr("x").method("min", vec![]);
        assert!(x.clone().le(x.clone()).to_bool());
        assert!(x.clone().ge(x.clone()).to_bool());
        assert!(!x.clone().lt(x.clone()).to_bool());
        assert!(x.clone().gt(df().attr("y")).to_bool());
    }

    #[test]
    fn test_literal_operand_differs() {
        assert!(!col("x").eq(3i64).to_bool());
        assert!(col("x").ne(3i64).to_bool());
    }

    #[test]
    fn test_non_comparison_is_truthy() {
        assert!(df().to_bool());
        assert!(col("x").to_bool());
        assert!(col("x").add(1i64).to_bool());
        assert!(col("x").eq(1i64).attr("all").to_bool());
    }
}
