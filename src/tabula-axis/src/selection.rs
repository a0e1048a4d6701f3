//! Composable selections bound to an axis.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Not};

use common_error::TabulaResult;
use log::debug;
use serde::{Deserialize, Serialize};
use tabula_core::{Axis, Label, LabelSource, Resolve};

use crate::label_set::LabelSet;
use crate::ops::SelectionOp;

/// "Everything else": selects every position of the axis.
///
/// Combined with `|` it moves the left-hand labels to the front and keeps
/// the remaining labels in their original order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rest;

/// A selection tree over the labels of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    axis: Axis,
    op: SelectionOp,
}

impl Selection {
    /// Bind `op` to `axis`.
    pub fn new(axis: Axis, op: SelectionOp) -> Self {
        Self { axis, op }
    }

    /// The axis this selection applies to.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The selection tree.
    pub fn op(&self) -> &SelectionOp {
        &self.op
    }

    /// Intersection; the right-hand order wins.
    #[must_use]
    pub fn and(self, other: impl Into<SelectionOp>) -> Self {
        Self::new(self.axis, self.op.and(other.into()))
    }

    /// Union; the left-hand order wins.
    #[must_use]
    pub fn or(self, other: impl Into<SelectionOp>) -> Self {
        Self::new(self.axis, self.op.or(other.into()))
    }

    /// Everything this selection excludes.
    #[must_use]
    pub fn not(self) -> Self {
        Self::new(self.axis, self.op.not())
    }

    /// Evaluate to the partial selection before it is applied to the axis.
    pub fn label_set<S: LabelSource + ?Sized>(&self, source: &S) -> TabulaResult<LabelSet> {
        self.op.evaluate(self.axis, source)
    }

    /// Selected positions of the axis, in output order.
    pub fn positions<S: LabelSource + ?Sized>(&self, source: &S) -> TabulaResult<Vec<usize>> {
        debug!("Resolving {self} against the {}", self.axis);
        let len = source.labels(self.axis).len();
        Ok(self.label_set(source)?.apply(len))
    }

    /// Selected labels of the axis, in output order.
    pub fn resolve<S: LabelSource + ?Sized>(&self, source: &S) -> TabulaResult<Vec<Label>> {
        let labels = source.labels(self.axis);
        Ok(self
            .positions(source)?
            .into_iter()
            .filter_map(|pos| labels.get(pos).cloned())
            .collect())
    }

    /// Render the selection tree, one node per line.
    pub fn explain(&self) -> String {
        format!("{} {}", symbol(self.axis), self.op.explain())
    }
}

fn symbol(axis: Axis) -> &'static str {
    match axis {
        Axis::Columns => "C",
        Axis::Index => "I",
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op.render(symbol(self.axis)))
    }
}

/// Resolves to positions, so repeated labels select exactly the positions
/// the selection picked.
impl<S: LabelSource> Resolve<S> for Selection {
    type Output = Vec<usize>;

    fn resolve(&self, target: &S) -> TabulaResult<Vec<usize>> {
        self.positions(target)
    }
}

impl From<Rest> for SelectionOp {
    fn from(_: Rest) -> Self {
        Self::All
    }
}

impl From<Selection> for SelectionOp {
    fn from(selection: Selection) -> Self {
        selection.op
    }
}

impl From<Label> for SelectionOp {
    fn from(label: Label) -> Self {
        Self::Labels {
            labels: vec![label],
            level: None,
        }
    }
}

impl From<&str> for SelectionOp {
    fn from(label: &str) -> Self {
        Label::from(label).into()
    }
}

impl From<Vec<Label>> for SelectionOp {
    fn from(labels: Vec<Label>) -> Self {
        Self::Labels {
            labels,
            level: None,
        }
    }
}

impl<R: Into<SelectionOp>> BitAnd<R> for Selection {
    type Output = Selection;

    fn bitand(self, rhs: R) -> Selection {
        self.and(rhs)
    }
}

impl<R: Into<SelectionOp>> BitOr<R> for Selection {
    type Output = Selection;

    fn bitor(self, rhs: R) -> Selection {
        self.or(rhs)
    }
}

impl<R: Into<SelectionOp>> Add<R> for Selection {
    type Output = Selection;

    fn add(self, rhs: R) -> Selection {
        self.or(rhs)
    }
}

impl Not for Selection {
    type Output = Selection;

    fn not(self) -> Selection {
        Selection::not(self)
    }
}

/// `lhs op selection` for left-hand operands that are not selections
/// themselves. The result takes the axis of the selection.
macro_rules! reflected_for {
    ($($lhs:ty),* $(,)?) => {$(
        impl BitAnd<Selection> for $lhs {
            type Output = Selection;

            fn bitand(self, rhs: Selection) -> Selection {
                Selection::new(rhs.axis, SelectionOp::from(self).and(rhs.op))
            }
        }

        impl BitOr<Selection> for $lhs {
            type Output = Selection;

            fn bitor(self, rhs: Selection) -> Selection {
                Selection::new(rhs.axis, SelectionOp::from(self).or(rhs.op))
            }
        }

        impl Add<Selection> for $lhs {
            type Output = Selection;

            fn add(self, rhs: Selection) -> Selection {
                Selection::new(rhs.axis, SelectionOp::from(self).or(rhs.op))
            }
        }
    )*};
}

reflected_for!(Rest, Label, &str, Vec<Label>);
