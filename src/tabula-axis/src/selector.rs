//! Entry points for building selections: the `C` and `I` roots.

use common_config::SelectionConfig;
use log::warn;
use tabula_core::{Axis, DataType, Label, LevelRef};

use crate::ops::{Predicate, SelectionOp};
use crate::selection::Selection;

/// Builder for selections along one axis, optionally scoped to one level of
/// a multi-level axis.
///
/// ```rust
/// use tabula_axis::{columns, Rest};
///
/// let moved = columns().labels(["y", "u"]) | Rest;
/// assert_eq!(moved.to_string(), r#"(C["y", "u"] | ...)"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSelector {
    axis: Axis,
    level: Option<LevelRef>,
    config: SelectionConfig,
}

impl AxisSelector {
    /// A selector with the default configuration.
    pub fn new(axis: Axis) -> Self {
        Self::with_config(axis, SelectionConfig::default())
    }

    /// A selector with an explicit configuration.
    pub fn with_config(axis: Axis, config: SelectionConfig) -> Self {
        if !config.experimental {
            warn!(
                "Column/index selection is an experimental feature; the API might change in minor \
                 version updates. Set `SelectionConfig::experimental` to silence this warning."
            );
        }
        Self {
            axis,
            level: None,
            config,
        }
    }

    /// The axis selections are built for.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The configuration dtype selections use.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Scope following label, slice and predicate selections to one level.
    pub fn level(&self, level: impl Into<LevelRef>) -> AxisSelector {
        Self {
            axis: self.axis,
            level: Some(level.into()),
            config: self.config.clone(),
        }
    }

    fn select(&self, op: SelectionOp) -> Selection {
        Selection::new(self.axis, op)
    }

    /// `C["x"]`
    pub fn label(&self, label: impl Into<Label>) -> Selection {
        self.labels([label])
    }

    /// `C["x", "y"]`: the labels in the given order.
    pub fn labels<L: Into<Label>>(&self, labels: impl IntoIterator<Item = L>) -> Selection {
        self.select(SelectionOp::Labels {
            labels: labels.into_iter().map(Into::into).collect(),
            level: self.level.clone(),
        })
    }

    /// `C["B":"E"]`: the first run from `start` through `stop`.
    pub fn slice(&self, start: impl Into<Label>, stop: impl Into<Label>) -> Selection {
        self.slice_between(Some(start.into()), Some(stop.into()))
    }

    /// `C["B":]`
    pub fn slice_from(&self, start: impl Into<Label>) -> Selection {
        self.slice_between(Some(start.into()), None)
    }

    /// `C[:"E"]`
    pub fn slice_to(&self, stop: impl Into<Label>) -> Selection {
        self.slice_between(None, Some(stop.into()))
    }

    /// A slice with optional bounds.
    pub fn slice_between(&self, start: Option<Label>, stop: Option<Label>) -> Selection {
        self.select(SelectionOp::Slice {
            start,
            stop,
            level: self.level.clone(),
        })
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Selection {
        self.predicate(Predicate::StartsWith(prefix.into()))
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Selection {
        self.predicate(Predicate::EndsWith(suffix.into()))
    }

    pub fn contains(&self, text: impl Into<String>) -> Selection {
        self.predicate(Predicate::Contains(text.into()))
    }

    /// Labels matching the regular expression at their start.
    pub fn matches(&self, pattern: impl Into<String>) -> Selection {
        self.predicate(Predicate::Matches(pattern.into()))
    }

    fn predicate(&self, predicate: Predicate) -> Selection {
        self.select(SelectionOp::Predicate {
            predicate,
            level: self.level.clone(),
        })
    }

    /// `...`: every label of the axis.
    pub fn rest(&self) -> Selection {
        self.select(SelectionOp::All)
    }

    /// Selection by column type.
    pub fn dtype(&self) -> DtypeSelector {
        DtypeSelector {
            axis: self.axis,
            config: self.config.clone(),
        }
    }
}

/// `C.dtype`: builds selections of columns by value type.
#[derive(Debug, Clone)]
pub struct DtypeSelector {
    axis: Axis,
    config: SelectionConfig,
}

impl DtypeSelector {
    /// `C.dtype == t`
    pub fn eq(&self, dtype: DataType) -> Selection {
        self.isin([dtype])
    }

    /// `C.dtype.isin([t, ...])`
    pub fn isin(&self, dtypes: impl IntoIterator<Item = DataType>) -> Selection {
        Selection::new(
            self.axis,
            SelectionOp::Dtype {
                dtypes: dtypes.into_iter().collect(),
                sample_size: self.config.sample_size,
                seed: self.config.seed,
            },
        )
    }
}

/// The `C` root: selections of columns.
pub fn columns() -> AxisSelector {
    AxisSelector::new(Axis::Columns)
}

/// The `I` root: selections of rows.
pub fn index() -> AxisSelector {
    AxisSelector::new(Axis::Index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(axis: Axis) -> AxisSelector {
        AxisSelector::with_config(axis, SelectionConfig::default().with_experimental(true))
    }

    #[test]
    fn test_level_scopes_leaves() {
        let sel = quiet(Axis::Index).level(0usize).label("b");
        assert_eq!(sel.to_string(), r#"I.levels[0]["b"]"#);

        let sel = quiet(Axis::Columns).level("inner").starts_with("Y");
        assert_eq!(sel.to_string(), r#"C.levels["inner"].startswith("Y")"#);

        // The level does not carry over to the root.
        let root = quiet(Axis::Columns);
        let _ = root.level(1usize);
        assert_eq!(root.label("a").to_string(), r#"C["a"]"#);
    }

    #[test]
    fn test_slices() {
        let c = quiet(Axis::Columns);
        assert_eq!(c.slice("B", "E").to_string(), r#"C["B":"E"]"#);
        assert_eq!(c.slice_from("B").to_string(), r#"C["B":]"#);
        assert_eq!(c.slice_to("E").to_string(), r#"C[:"E"]"#);
    }

    #[test]
    fn test_dtype_uses_config() {
        let config = SelectionConfig::default()
            .with_experimental(true)
            .with_sample_size(3)
            .with_seed(42);
        let sel = AxisSelector::with_config(Axis::Columns, config)
            .dtype()
            .isin([DataType::String, DataType::Int64]);

        assert_eq!(
            sel.op(),
            &SelectionOp::Dtype {
                dtypes: vec![DataType::String, DataType::Int64],
                sample_size: 3,
                seed: Some(42),
            }
        );
        assert_eq!(sel.to_string(), "C.dtype.isin([String, Int64])");
    }
}
