//! Axis labels of a frame or series.

use std::fmt;

use common_error::{TabulaError, TabulaResult, ensure};
use tabula_core::Label;

/// Ordered (possibly multi-level) labels along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    labels: Vec<Label>,
    names: Vec<Option<String>>,
}

impl Index {
    /// Create an unnamed index from labels.
    pub fn new<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        let nlevels = labels.first().map_or(1, Label::nlevels);
        Self {
            labels,
            names: vec![None; nlevels],
        }
    }

    /// The default `0..n` index.
    pub fn range(n: usize) -> Self {
        Self::new(0..n)
    }

    /// Cartesian product of per-level labels, first level outermost.
    pub fn from_product(levels: Vec<Vec<Label>>) -> Self {
        let nlevels = levels.len();
        let mut labels: Vec<Vec<Label>> = vec![Vec::new()];
        for level in levels {
            labels = labels
                .into_iter()
                .flat_map(|prefix| {
                    level.iter().map(move |label| {
                        let mut next = prefix.clone();
                        next.push(label.clone());
                        next
                    })
                })
                .collect();
        }

        Self {
            labels: labels.into_iter().map(Label::Tuple).collect(),
            names: vec![None; nlevels],
        }
    }

    /// Name the levels of this index.
    pub fn with_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> TabulaResult<Self> {
        let names: Vec<Option<String>> = names.into_iter().map(|n| n.map(Into::into)).collect();
        ensure!(
            names.len() == self.nlevels(),
            ValueError: "got {} level names for an index with {} level(s)",
            names.len(),
            self.nlevels()
        );
        self.names = names;
        Ok(self)
    }

    /// The labels in order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Level names, one per level.
    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Number of levels.
    pub fn nlevels(&self) -> usize {
        self.names.len()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the index has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of the first occurrence of `label`.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Position of `label`, failing with a key error naming the available labels.
    pub fn get_loc(&self, label: &Label) -> TabulaResult<usize> {
        self.position(label).ok_or_else(|| {
            TabulaError::key_error(format!("{label} not in {self}"))
        })
    }

    /// Every position holding `label`, in axis order.
    pub fn get_locs(&self, label: &Label) -> TabulaResult<Vec<usize>> {
        let positions: Vec<usize> = self
            .labels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| (l == label).then_some(i))
            .collect();
        ensure!(!positions.is_empty(), KeyError: "{label} not in {self}");
        Ok(positions)
    }

    /// Sub-index of the given positions, in the given order.
    pub fn take(&self, positions: &[usize]) -> Self {
        Self {
            labels: positions
                .iter()
                .filter_map(|&p| self.labels.get(p).cloned())
                .collect(),
            names: self.names.clone(),
        }
    }

    /// A copy with `label` appended.
    #[must_use]
    pub fn push(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_index() {
        let index = Index::range(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.nlevels(), 1);
        assert_eq!(index.get_loc(&Label::from(2i64)).unwrap(), 2);
        assert!(index.get_loc(&Label::from(3i64)).unwrap_err().is_key_error());
    }

    #[test]
    fn test_get_locs_finds_repeats() {
        let index = Index::new(["g", "a", "b", "g"]);
        assert_eq!(index.get_locs(&Label::from("g")).unwrap(), vec![0, 3]);
        assert_eq!(index.get_loc(&Label::from("g")).unwrap(), 0);
        assert!(index.get_locs(&Label::from("z")).unwrap_err().is_key_error());
    }

    #[test]
    fn test_from_product() {
        let index = Index::from_product(vec![
            vec![Label::from("a"), Label::from("b")],
            vec![Label::from("X"), Label::from("Y")],
        ])
        .with_names([Some("top"), Some("bottom")])
        .unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.nlevels(), 2);
        assert_eq!(index.labels()[1], Label::from(("a", "Y")));
        assert_eq!(index.labels()[2], Label::from(("b", "X")));
        assert_eq!(index.names()[1].as_deref(), Some("bottom"));
    }

    #[test]
    fn test_with_names_checks_levels() {
        let err = Index::range(2).with_names([Some("a"), Some("b")]).unwrap_err();
        assert!(matches!(err, TabulaError::ValueError(_)));
    }

    #[test]
    fn test_display() {
        let index = Index::new(["x", "y"]);
        assert_eq!(index.to_string(), "[\"x\", \"y\"]");
    }
}
