//! Read-only view of a table's axes used by axis selection.

use common_error::{TabulaError, TabulaResult};

use crate::label::{Axis, Label, LevelRef};
use crate::types::{DataType, Value};

/// Axis labels, declared column types and sampled cells of a table.
pub trait LabelSource {
    /// Ordered labels along `axis`.
    fn labels(&self, axis: Axis) -> Vec<Label>;

    /// Level names of `axis`, one entry per level.
    fn level_names(&self, axis: Axis) -> Vec<Option<String>>;

    /// Declared type of every column, in column order.
    fn dtypes(&self) -> Vec<DataType>;

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// The value at (`row`, `column`), both positional.
    fn cell(&self, row: usize, column: usize) -> Option<&Value>;

    /// Labels along `axis`, or the values of one of its levels.
    fn level_values(&self, axis: Axis, level: Option<&LevelRef>) -> TabulaResult<Vec<Label>> {
        let labels = self.labels(axis);
        let Some(level) = level else {
            return Ok(labels);
        };

        let pos = level.position(&self.level_names(axis))?;
        labels
            .iter()
            .map(|label| {
                label.level(pos).cloned().ok_or_else(|| {
                    TabulaError::key_error(format!("label {label} has no level {level}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Columns(Vec<Label>);

    impl LabelSource for Columns {
        fn labels(&self, axis: Axis) -> Vec<Label> {
            match axis {
                Axis::Columns => self.0.clone(),
                Axis::Index => Vec::new(),
            }
        }

        fn level_names(&self, _axis: Axis) -> Vec<Option<String>> {
            vec![Some("top".to_string()), Some("bottom".to_string())]
        }

        fn dtypes(&self) -> Vec<DataType> {
            vec![DataType::Int64; self.0.len()]
        }

        fn num_rows(&self) -> usize {
            0
        }

        fn cell(&self, _row: usize, _column: usize) -> Option<&Value> {
            None
        }
    }

    #[test]
    fn test_level_values() {
        let source = Columns(vec![Label::from(("a", "X")), Label::from(("b", "Y"))]);

        let all = source.level_values(Axis::Columns, None).unwrap();
        assert_eq!(all.len(), 2);

        let bottom = source
            .level_values(Axis::Columns, Some(&LevelRef::from("bottom")))
            .unwrap();
        assert_eq!(bottom, vec![Label::from("X"), Label::from("Y")]);

        let err = source
            .level_values(Axis::Columns, Some(&LevelRef::from("middle")))
            .unwrap_err();
        assert!(err.is_key_error());
    }
}
