//! Native operator sugar for building expressions.
//!
//! Each operator maps one to one onto the named builder of [`Expr`]; `!`
//! records an inversion (`~`). Comparisons have no sugar because
//! `PartialEq` stays structural.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use super::{Arg, Expr, Operator};

macro_rules! binary_sugar {
    ($($trait:ident, $method:ident, $op:expr;)*) => {
        $(
            impl<R: Into<Arg>> $trait<R> for Expr {
                type Output = Expr;

                fn $method(self, rhs: R) -> Expr {
                    self.binary($op, rhs)
                }
            }

            impl<R: Into<Arg>> $trait<R> for &Expr {
                type Output = Expr;

                fn $method(self, rhs: R) -> Expr {
                    self.clone().binary($op, rhs)
                }
            }
        )*
    };
}

binary_sugar! {
    Add, add, Operator::Add;
    Sub, sub, Operator::Sub;
    Mul, mul, Operator::Mul;
    Div, div, Operator::TrueDiv;
    Rem, rem, Operator::Mod;
    BitAnd, bitand, Operator::And;
    BitOr, bitor, Operator::Or;
    BitXor, bitxor, Operator::Xor;
}

macro_rules! reflected_sugar {
    ($lhs:ty => $($trait:ident, $method:ident, $op:expr;)*) => {
        $(
            impl $trait<Expr> for $lhs {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    rhs.reflected($op, self)
                }
            }

            impl $trait<&Expr> for $lhs {
                type Output = Expr;

                fn $method(self, rhs: &Expr) -> Expr {
                    rhs.clone().reflected($op, self)
                }
            }
        )*
    };
}

macro_rules! reflected_for {
    ($($lhs:ty),*) => {
        $(
            reflected_sugar! { $lhs =>
                Add, add, Operator::Add;
                Sub, sub, Operator::Sub;
                Mul, mul, Operator::Mul;
                Div, div, Operator::TrueDiv;
                Rem, rem, Operator::Mod;
                BitAnd, bitand, Operator::And;
                BitOr, bitor, Operator::Or;
                BitXor, bitxor, Operator::Xor;
            }
        )*
    };
}

reflected_for!(i64, i32, f64, bool, &str, String);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.unary(Operator::Neg)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.clone().unary(Operator::Neg)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.invert()
    }
}

impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.clone().invert()
    }
}
