//! Operators recorded as named invocations.

use serde::{Deserialize, Serialize};

/// Operators an expression can record.
///
/// An operator is recorded as an invocation of its method name (`lt`, `add`,
/// ...) so the target evaluates it like any other method. Reflectable binary
/// operators also have a reflected name (`radd`, ...) used when the
/// expression is the right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Arithmetic operators
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// True division (/)
    TrueDiv,
    /// Floor division (//)
    FloorDiv,
    /// Modulo (%)
    Mod,
    /// Exponentiation (**)
    Pow,
    /// Quotient and remainder
    DivMod,

    // Bitwise / logical operators
    /// Bitwise or element-wise AND (&)
    And,
    /// Bitwise or element-wise OR (|)
    Or,
    /// Bitwise or element-wise XOR (^)
    Xor,

    // Comparison operators
    /// Equality (==)
    Eq,
    /// Inequality (!=)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,

    /// Membership test
    Contains,

    // Unary operators
    /// Negation (-x)
    Neg,
    /// Unary plus (+x)
    Pos,
    /// Absolute value
    Abs,
    /// Inversion (~x)
    Invert,
}

impl Operator {
    /// Every operator, binary first.
    pub const ALL: [Self; 22] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::TrueDiv,
        Self::FloorDiv,
        Self::Mod,
        Self::Pow,
        Self::DivMod,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Contains,
        Self::Neg,
        Self::Pos,
        Self::Abs,
        Self::Invert,
    ];

    /// The method name recorded for this operator.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::TrueDiv => "truediv",
            Self::FloorDiv => "floordiv",
            Self::Mod => "mod",
            Self::Pow => "pow",
            Self::DivMod => "divmod",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Contains => "contains",
            Self::Neg => "neg",
            Self::Pos => "pos",
            Self::Abs => "abs",
            Self::Invert => "invert",
        }
    }

    /// The method name recorded when the operands are swapped.
    pub const fn reflected_name(&self) -> Option<&'static str> {
        match self {
            Self::Add => Some("radd"),
            Self::Sub => Some("rsub"),
            Self::Mul => Some("rmul"),
            Self::TrueDiv => Some("rtruediv"),
            Self::FloorDiv => Some("rfloordiv"),
            Self::Mod => Some("rmod"),
            Self::Pow => Some("rpow"),
            Self::DivMod => Some("rdivmod"),
            Self::And => Some("rand"),
            Self::Or => Some("ror"),
            Self::Xor => Some("rxor"),
            _ => None,
        }
    }

    /// Look up an operator by its recorded method name; the flag tells
    /// whether the reflected form was named.
    pub fn from_name(name: &str) -> Option<(Self, bool)> {
        Self::ALL.iter().find_map(|op| {
            if op.name() == name {
                Some((*op, false))
            } else if op.reflected_name() == Some(name) {
                Some((*op, true))
            } else {
                None
            }
        })
    }

    /// Check if this operator takes no argument.
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::Neg | Self::Pos | Self::Abs | Self::Invert)
    }

    /// Check if this is a comparison operator.
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    /// Check if this is an ordering comparison (`<`, `<=`, `>`, `>=`).
    pub const fn is_ordering(&self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    /// Whether this comparison holds for two identical operands.
    pub const fn is_reflexive(&self) -> bool {
        matches!(self, Self::Eq | Self::Le | Self::Ge)
    }

    /// The operator's infix or prefix symbol, if it is written as one.
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Add | Self::Pos => Some("+"),
            Self::Sub | Self::Neg => Some("-"),
            Self::Mul => Some("*"),
            Self::TrueDiv => Some("/"),
            Self::FloorDiv => Some("//"),
            Self::Mod => Some("%"),
            Self::Pow => Some("**"),
            Self::And => Some("&"),
            Self::Or => Some("|"),
            Self::Xor => Some("^"),
            Self::Eq => Some("=="),
            Self::Ne => Some("!="),
            Self::Lt => Some("<"),
            Self::Le => Some("<="),
            Self::Gt => Some(">"),
            Self::Ge => Some(">="),
            Self::Invert => Some("~"),
            Self::DivMod | Self::Contains | Self::Abs => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or(self.name()))
    }
}
