//! A table of equally long, labelled columns.

use std::fmt;

use common_error::{TabulaError, TabulaResult, ensure, type_err};
use log::debug;
use tabula_core::{Axis, DataType, Label, LabelSource, Resolve, Value};

use crate::datum::Datum;
use crate::index::Index;
use crate::series::Series;

/// An in-memory table.
///
/// Columns are stored as [`Series`] sharing the frame's row index. Every
/// operation returns a new frame; frames are never modified in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Index,
    index: Index,
    data: Vec<Series>,
}

impl Frame {
    /// Create a frame from `(label, values)` pairs with the default row index.
    pub fn new<L, V>(columns: impl IntoIterator<Item = (L, Vec<V>)>) -> TabulaResult<Self>
    where
        L: Into<Label>,
        V: Into<Value>,
    {
        Self::from_series(
            columns
                .into_iter()
                .map(|(label, values)| Series::new(label, values))
                .collect(),
        )
    }

    /// Create a frame from named series; the row index is taken from the
    /// first series.
    pub fn from_series(series: Vec<Series>) -> TabulaResult<Self> {
        let index = series
            .first()
            .map_or_else(|| Index::range(0), |s| s.index().clone());

        let mut labels = Vec::with_capacity(series.len());
        for (i, s) in series.iter().enumerate() {
            ensure!(
                s.len() == index.len(),
                ValueError: "column {i} has length {}, expected {}",
                s.len(),
                index.len()
            );
            labels.push(s.name().cloned().unwrap_or_else(|| Label::from(i)));
        }

        let data = series
            .into_iter()
            .zip(&labels)
            .map(|(s, label)| s.with_name(Some(label.clone())).with_index(index.clone()))
            .collect::<TabulaResult<Vec<_>>>()?;

        Ok(Self {
            columns: Index::new(labels),
            index,
            data,
        })
    }

    /// Replace the row index.
    pub fn with_index(self, index: Index) -> TabulaResult<Self> {
        let data = self
            .data
            .into_iter()
            .map(|s| s.with_index(index.clone()))
            .collect::<TabulaResult<Vec<_>>>()?;
        Ok(Self {
            columns: self.columns,
            index,
            data,
        })
    }

    /// Replace the column labels, e.g. with a multi-level index.
    pub fn with_columns(self, columns: Index) -> TabulaResult<Self> {
        ensure!(
            columns.len() == self.data.len(),
            ValueError: "got {} column labels for {} columns",
            columns.len(),
            self.data.len()
        );
        let data = self
            .data
            .into_iter()
            .zip(columns.labels())
            .map(|(s, label)| s.with_name(Some(label.clone())))
            .collect();
        Ok(Self {
            columns,
            index: self.index,
            data,
        })
    }

    /// Column labels.
    pub fn columns(&self) -> &Index {
        &self.columns
    }

    /// Row labels.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The column labelled `label`.
    pub fn column(&self, label: &Label) -> TabulaResult<&Series> {
        let pos = self.columns.get_loc(label)?;
        self.data
            .get(pos)
            .ok_or_else(|| TabulaError::internal(format!("column {pos} out of bounds")))
    }

    /// All columns in order.
    pub fn series(&self) -> &[Series] {
        &self.data
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.data.len())
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn num_columns(&self) -> usize {
        self.data.len()
    }

    /// Add or replace a column.
    pub fn assign(&self, label: impl Into<Label>, series: Series) -> TabulaResult<Self> {
        let label = label.into();
        ensure!(
            series.len() == self.num_rows(),
            ValueError: "length of values ({}) does not match length of index ({})",
            series.len(),
            self.num_rows()
        );
        let series = series
            .with_name(Some(label.clone()))
            .with_index(self.index.clone())?;

        let mut next = self.clone();
        match next.columns.position(&label) {
            Some(pos) => next.data[pos] = series,
            None => {
                next.columns = next.columns.push(label);
                next.data.push(series);
            }
        }
        Ok(next)
    }

    /// Add or replace columns computed from the frame.
    ///
    /// Assignments are applied in order, so later ones see the columns added
    /// by earlier ones. A scalar result is broadcast to every row.
    pub fn assign_with<'a, L, R>(
        &self,
        assignments: impl IntoIterator<Item = (L, &'a R)>,
    ) -> TabulaResult<Self>
    where
        L: Into<Label>,
        R: Resolve<Datum, Output = Datum> + 'a,
    {
        let mut frame = self.clone();
        for (label, value) in assignments {
            let label = label.into();
            debug!("Assigning column {label}");
            let series = match value.resolve(&Datum::Frame(frame.clone()))? {
                Datum::Series(series) => series,
                Datum::Scalar(value) => {
                    Series::from_values(None, vec![value; frame.num_rows()])
                }
                other => type_err!("cannot assign a {} as column {label}", other.kind()),
            };
            frame = frame.assign(label, series)?;
        }
        Ok(frame)
    }

    /// Keep the rows where `mask` is true.
    pub fn filter(&self, mask: &Series) -> TabulaResult<Self> {
        let mask = mask.to_mask()?;
        ensure!(
            mask.len() == self.num_rows(),
            ValueError: "boolean mask of length {} does not match {} rows",
            mask.len(),
            self.num_rows()
        );
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        Ok(self.take_rows(&positions))
    }

    /// Keep the rows where the mask computed from the frame is true.
    pub fn filter_with<R>(&self, predicate: &R) -> TabulaResult<Self>
    where
        R: Resolve<Datum, Output = Datum>,
    {
        match predicate.resolve(&Datum::Frame(self.clone()))? {
            Datum::Series(mask) => self.filter(&mask),
            other => Err(TabulaError::type_error(format!(
                "filter expects a boolean series, got a {}",
                other.kind()
            ))),
        }
    }

    /// Columns with the given labels, in the given order. A repeated label
    /// selects every column carrying it.
    pub fn select_columns(&self, labels: &[Label]) -> TabulaResult<Self> {
        let positions = locate_all(&self.columns, labels)?;
        Ok(self.take_columns(&positions))
    }

    /// Rows with the given labels, in the given order. A repeated label
    /// selects every row carrying it.
    pub fn select_rows(&self, labels: &[Label]) -> TabulaResult<Self> {
        let positions = locate_all(&self.index, labels)?;
        Ok(self.take_rows(&positions))
    }

    /// `df.loc[:, selection]`, where `selection` resolves to column positions.
    pub fn loc_columns<R>(&self, selection: &R) -> TabulaResult<Self>
    where
        R: Resolve<Frame, Output = Vec<usize>>,
    {
        let positions = selection.resolve(self)?;
        debug!("Selecting {} of {} columns", positions.len(), self.num_columns());
        Ok(self.take_columns(&positions))
    }

    /// `df.loc[selection]`, where `selection` resolves to row positions.
    pub fn loc_rows<R>(&self, selection: &R) -> TabulaResult<Self>
    where
        R: Resolve<Frame, Output = Vec<usize>>,
    {
        let positions = selection.resolve(self)?;
        debug!("Selecting {} of {} rows", positions.len(), self.num_rows());
        Ok(self.take_rows(&positions))
    }

    /// Columns at the given positions.
    pub fn take_columns(&self, positions: &[usize]) -> Self {
        Self {
            columns: self.columns.take(positions),
            index: self.index.clone(),
            data: positions
                .iter()
                .filter_map(|&p| self.data.get(p).cloned())
                .collect(),
        }
    }

    /// Rows at the given positions.
    pub fn take_rows(&self, positions: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.take(positions),
            data: self.data.iter().map(|s| s.take(positions)).collect(),
        }
    }

    /// The row labelled `label` as a series indexed by the column labels.
    pub fn row(&self, label: &Label) -> TabulaResult<Series> {
        let pos = self.index.get_loc(label)?;
        let values = self
            .data
            .iter()
            .map(|s| s.values().get(pos).cloned().unwrap_or(Value::Null))
            .collect();
        Series::from_values(Some(label.clone()), values).with_index(self.columns.clone())
    }
}

fn locate_all(index: &Index, labels: &[Label]) -> TabulaResult<Vec<usize>> {
    let mut positions = Vec::with_capacity(labels.len());
    for label in labels {
        positions.extend(index.get_locs(label)?);
    }
    Ok(positions)
}

impl LabelSource for Frame {
    fn labels(&self, axis: Axis) -> Vec<Label> {
        match axis {
            Axis::Columns => self.columns.labels().to_vec(),
            Axis::Index => self.index.labels().to_vec(),
        }
    }

    fn level_names(&self, axis: Axis) -> Vec<Option<String>> {
        match axis {
            Axis::Columns => self.columns.names().to_vec(),
            Axis::Index => self.index.names().to_vec(),
        }
    }

    fn dtypes(&self) -> Vec<DataType> {
        self.data.iter().map(Series::dtype).collect()
    }

    fn num_rows(&self) -> usize {
        self.index.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.data.get(column)?.values().get(row)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t")?;
        let header: Vec<String> = self.columns.labels().iter().map(ToString::to_string).collect();
        writeln!(f, "{}", header.join("\t"))?;
        for (row, label) in self.index.labels().iter().enumerate() {
            let cells: Vec<String> = self
                .data
                .iter()
                .map(|s| s.values().get(row).map(Value::repr).unwrap_or_default())
                .collect();
            writeln!(f, "{label}\t{}", cells.join("\t"))?;
        }
        write!(f, "[{} rows x {} columns]", self.num_rows(), self.num_columns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        Frame::new([
            ("x", vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]),
            ("y", vec![Value::from("a"), Value::from("b"), Value::from("a")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_columns() {
        let df = sample();
        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.columns().labels(), &[Label::from("x"), Label::from("y")]);
        assert_eq!(df.column(&Label::from("y")).unwrap().dtype(), DataType::Object);
        assert!(df.column(&Label::from("z")).unwrap_err().is_key_error());
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let err = Frame::new([("x", vec![1i64, 2]), ("y", vec![1i64])]).unwrap_err();
        assert!(matches!(err, TabulaError::ValueError(_)));
    }

    #[test]
    fn test_assign_appends_and_replaces() {
        let df = sample();
        let df = df.assign("z", Series::new("ignored", [7i64, 8, 9])).unwrap();
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column(&Label::from("z")).unwrap().name(), Some(&Label::from("z")));

        let df = df.assign("x", Series::new("x", [0i64, 0, 0])).unwrap();
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column(&Label::from("x")).unwrap().values()[0], Value::Int64(0));

        assert!(df.assign("w", Series::new("w", [1i64])).is_err());
    }

    #[test]
    fn test_filter_keeps_row_labels() {
        let df = sample();
        let mask = Series::new("m", [true, false, true]);
        let filtered = df.filter(&mask).unwrap();
        assert_eq!(filtered.shape(), (2, 2));
        assert_eq!(
            filtered.index().labels(),
            &[Label::from(0i64), Label::from(2i64)]
        );
    }

    #[test]
    fn test_select_and_row() {
        let df = sample();
        let selected = df.select_columns(&[Label::from("y"), Label::from("x")]).unwrap();
        assert_eq!(selected.columns().labels(), &[Label::from("y"), Label::from("x")]);

        let row = df.row(&Label::from(1i64)).unwrap();
        assert_eq!(row.get(&Label::from("y")).unwrap(), &Value::from("b"));

        assert!(df.select_rows(&[Label::from(5i64)]).unwrap_err().is_key_error());
    }

    #[test]
    fn test_select_rows_keeps_repeated_labels() {
        let df = Frame::new([("v", vec![0i64, 1, 2, 3])])
            .unwrap()
            .with_index(Index::new(["g", "a", "b", "g"]))
            .unwrap();
        let rows = df.select_rows(&[Label::from("g"), Label::from("a")]).unwrap();
        assert_eq!(
            rows.column(&Label::from("v")).unwrap().values(),
            &[Value::from(0i64), Value::from(3i64), Value::from(1i64)]
        );
    }

    #[test]
    fn test_label_source() {
        let df = sample()
            .with_index(Index::new(["r1", "r2", "r3"]))
            .unwrap();
        assert_eq!(LabelSource::num_rows(&df), 3);
        assert_eq!(df.labels(Axis::Index)[2], Label::from("r3"));
        assert_eq!(df.dtypes(), vec![DataType::Int64, DataType::Object]);
        assert_eq!(df.cell(1, 1), Some(&Value::from("b")));
        assert_eq!(df.cell(3, 0), None);
    }
}
