//! Column classification by data type.

use log::trace;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use tabula_core::types::conforms;
use tabula_core::{DataType, LabelSource};

/// Which columns of `source` hold one of `dtypes`.
///
/// Types with a declared storage form are compared with the declared column
/// type. Strings and bytes live in the `Object` bucket, so an `Object` column
/// matches them only if every value of a random sample of at most
/// `sample_size` rows has that type. This is a heuristic: values outside the
/// sample are never looked at.
pub fn dtype_mask<S: LabelSource + ?Sized>(
    source: &S,
    dtypes: &[DataType],
    sample_size: usize,
    seed: Option<u64>,
) -> Vec<bool> {
    let declared = source.dtypes();
    let rows = sample_rows(source.num_rows(), sample_size, seed);
    trace!("Probing {} sampled row(s) per object column", rows.len());

    declared
        .iter()
        .enumerate()
        .map(|(column, declared)| {
            dtypes.iter().any(|wanted| {
                if wanted.needs_sampling() {
                    *declared == DataType::Object
                        && rows.iter().all(|&row| {
                            source
                                .cell(row, column)
                                .is_some_and(|value| conforms(value, wanted))
                        })
                } else {
                    declared == wanted
                }
            })
        })
        .collect()
}

/// Row positions to sample, drawn without replacement.
fn sample_rows(num_rows: usize, sample_size: usize, seed: Option<u64>) -> Vec<usize> {
    let amount = num_rows.min(sample_size);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut rows = sample(&mut rng, num_rows, amount).into_vec();
    rows.sort_unstable();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::{Axis, Label, Value};

    struct Table {
        dtypes: Vec<DataType>,
        columns: Vec<Vec<Value>>,
    }

    impl LabelSource for Table {
        fn labels(&self, _axis: Axis) -> Vec<Label> {
            (0..self.columns.len() as i64).map(Label::Int).collect()
        }

        fn level_names(&self, _axis: Axis) -> Vec<Option<String>> {
            vec![None]
        }

        fn dtypes(&self) -> Vec<DataType> {
            self.dtypes.clone()
        }

        fn num_rows(&self) -> usize {
            self.columns.first().map_or(0, Vec::len)
        }

        fn cell(&self, row: usize, column: usize) -> Option<&Value> {
            self.columns.get(column)?.get(row)
        }
    }

    fn table() -> Table {
        Table {
            dtypes: vec![
                DataType::Int64,
                DataType::Float64,
                DataType::Object,
                DataType::Object,
            ],
            columns: vec![
                vec![Value::from(1i64), Value::from(2i64)],
                vec![Value::from(1.5), Value::from(2.5)],
                vec![Value::from("a"), Value::from("b")],
                vec![Value::from("a"), Value::from(2i64)],
            ],
        }
    }

    #[test]
    fn test_declared_types() {
        let mask = dtype_mask(&table(), &[DataType::Int64], 10, Some(0));
        assert_eq!(mask, vec![true, false, false, false]);

        let mask = dtype_mask(&table(), &[DataType::Object], 10, Some(0));
        assert_eq!(mask, vec![false, false, true, true]);
    }

    #[test]
    fn test_sampled_types() {
        let mask = dtype_mask(&table(), &[DataType::String], 10, Some(0));
        assert_eq!(mask, vec![false, false, true, false]);

        let mask = dtype_mask(&table(), &[DataType::String, DataType::Float64], 10, None);
        assert_eq!(mask, vec![false, true, true, false]);
    }

    #[test]
    fn test_sample_rows() {
        assert_eq!(sample_rows(3, 10, None), vec![0, 1, 2]);
        assert_eq!(sample_rows(100, 5, Some(7)).len(), 5);
        assert_eq!(sample_rows(100, 5, Some(7)), sample_rows(100, 5, Some(7)));
        assert!(sample_rows(0, 5, None).is_empty());
    }
}
