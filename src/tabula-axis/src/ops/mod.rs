//! Selection operators and their evaluation.

mod dtype;
mod predicate;

pub use dtype::dtype_mask;
pub use predicate::Predicate;

use common_display::{DisplayTree, TreeNode};
use common_error::{TabulaError, TabulaResult};
use log::trace;
use serde::{Deserialize, Serialize};
use tabula_core::{Axis, DataType, Label, LabelSource, LevelRef};

use crate::label_set::LabelSet;

/// A node of a selection tree.
///
/// Evaluating a node is a pure function of the axis and the table; nodes
/// carry no evaluation state and can be reused across tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionOp {
    /// Explicit labels, matched against the flat labels or one level.
    Labels {
        labels: Vec<Label>,
        level: Option<LevelRef>,
    },
    /// The first contiguous run from `start` through the last consecutive
    /// `stop`. A missing bound extends to that end of the axis.
    Slice {
        start: Option<Label>,
        stop: Option<Label>,
        level: Option<LevelRef>,
    },
    /// Labels passing a string predicate.
    Predicate {
        predicate: Predicate,
        level: Option<LevelRef>,
    },
    /// Every position, in axis order.
    All,
    /// Columns whose values have one of the types.
    Dtype {
        dtypes: Vec<DataType>,
        sample_size: usize,
        seed: Option<u64>,
    },
    And(Box<SelectionOp>, Box<SelectionOp>),
    Or(Box<SelectionOp>, Box<SelectionOp>),
    Not(Box<SelectionOp>),
}

impl SelectionOp {
    /// Intersect with `other`; the right-hand order wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Unite with `other`; the left-hand order wins.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Invert the selection.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against the labels of `axis` in `source`.
    pub fn evaluate<S>(&self, axis: Axis, source: &S) -> TabulaResult<LabelSet>
    where
        S: LabelSource + ?Sized,
    {
        trace!("Evaluating {} on {axis}", self.name());
        match self {
            Self::Labels { labels, level } => {
                let candidates = source.level_values(axis, level.as_ref())?;
                let mut positions = Vec::new();
                for label in labels {
                    let before = positions.len();
                    positions.extend(
                        candidates
                            .iter()
                            .enumerate()
                            .filter(|(_, c)| *c == label)
                            .map(|(i, _)| i),
                    );
                    if positions.len() == before {
                        return Err(missing_label(label, axis, &candidates));
                    }
                }
                Ok(LabelSet::include(positions))
            }
            Self::Slice { start, stop, level } => {
                let candidates = source.level_values(axis, level.as_ref())?;
                Ok(LabelSet::include(slice_run(
                    &candidates,
                    start.as_ref(),
                    stop.as_ref(),
                )))
            }
            Self::Predicate { predicate, level } => {
                let candidates = source.level_values(axis, level.as_ref())?;
                Ok(LabelSet::from_mask(&predicate.mask(&candidates)?))
            }
            Self::All => Ok(LabelSet::include(0..source.labels(axis).len())),
            Self::Dtype {
                dtypes,
                sample_size,
                seed,
            } => {
                if axis != Axis::Columns {
                    return Err(TabulaError::usage(
                        "Selection by dtype is only supported for column selection.",
                    ));
                }
                Ok(LabelSet::from_mask(&dtype_mask(
                    source,
                    dtypes,
                    *sample_size,
                    *seed,
                )))
            }
            Self::And(left, right) => {
                Ok(left.evaluate(axis, source)?.and(&right.evaluate(axis, source)?))
            }
            Self::Or(left, right) => {
                Ok(left.evaluate(axis, source)?.or(&right.evaluate(axis, source)?))
            }
            Self::Not(inner) => Ok(inner.evaluate(axis, source)?.not()),
        }
    }

    /// Short name of the node kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Labels { .. } => "Labels",
            Self::Slice { .. } => "Slice",
            Self::Predicate { .. } => "Predicate",
            Self::All => "All",
            Self::Dtype { .. } => "Dtype",
            Self::And(..) => "And",
            Self::Or(..) => "Or",
            Self::Not(_) => "Not",
        }
    }

    /// Render the selection tree, one node per line.
    pub fn explain(&self) -> String {
        DisplayTree::new(self).to_string()
    }

    /// Render as selection syntax rooted at `symbol` (`C` or `I`).
    pub fn render(&self, symbol: &str) -> String {
        let scope = |level: &Option<LevelRef>| match level {
            Some(level) => format!("{symbol}.levels[{level}]"),
            None => symbol.to_string(),
        };
        match self {
            Self::Labels { labels, level } => format!("{}[{}]", scope(level), join(labels)),
            Self::Slice { start, stop, level } => format!(
                "{}[{}:{}]",
                scope(level),
                start.as_ref().map(ToString::to_string).unwrap_or_default(),
                stop.as_ref().map(ToString::to_string).unwrap_or_default()
            ),
            Self::Predicate { predicate, level } => format!("{}.{predicate}", scope(level)),
            Self::All => "...".to_string(),
            Self::Dtype { dtypes, .. } => match dtypes.as_slice() {
                [single] => format!("{symbol}.dtype == {single}"),
                _ => format!("{symbol}.dtype.isin([{}])", join(dtypes)),
            },
            Self::And(left, right) => {
                format!("({} & {})", left.render(symbol), right.render(symbol))
            }
            Self::Or(left, right) => {
                format!("({} | {})", left.render(symbol), right.render(symbol))
            }
            Self::Not(inner) => format!("~{}", inner.render(symbol)),
        }
    }
}

impl TreeNode for SelectionOp {
    fn name(&self) -> String {
        SelectionOp::name(self).to_string()
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                vec![left.as_ref() as &dyn TreeNode, right.as_ref() as &dyn TreeNode]
            }
            Self::Not(inner) => vec![inner.as_ref() as &dyn TreeNode],
            _ => Vec::new(),
        }
    }

    fn details(&self) -> Option<String> {
        let with_level = |text: String, level: &Option<LevelRef>| match level {
            Some(level) => format!("{text}, level={level}"),
            None => text,
        };
        match self {
            Self::Labels { labels, level } => Some(with_level(join(labels), level)),
            Self::Slice { .. } => Some(self.render("")),
            Self::Predicate { predicate, level } => Some(with_level(predicate.to_string(), level)),
            Self::Dtype {
                dtypes,
                sample_size,
                ..
            } => Some(format!("{}, sample_size={sample_size}", join(dtypes))),
            _ => None,
        }
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn missing_label(label: &Label, axis: Axis, candidates: &[Label]) -> TabulaError {
    TabulaError::key_error(format!(
        "label {label} not found in {axis}: [{}]",
        join(candidates)
    ))
}

/// Positions of the first run from `start` through the last consecutive
/// `stop`.
///
/// The scan enters the run at the first label equal to `start` (or at the
/// beginning), and leaves it at the first label after a `stop` that is not
/// `stop` itself. Later runs of the same labels are not revisited.
fn slice_run(candidates: &[Label], start: Option<&Label>, stop: Option<&Label>) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut in_slice = start.is_none();
    let mut reached_stop = false;

    for (i, label) in candidates.iter().enumerate() {
        if !in_slice && Some(label) == start {
            in_slice = true;
        }
        if reached_stop && Some(label) != stop {
            break;
        }
        if in_slice {
            positions.push(i);
            if Some(label) == stop {
                reached_stop = true;
            }
        }
    }
    positions
}
