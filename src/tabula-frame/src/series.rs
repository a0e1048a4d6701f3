//! A single labelled column.

use std::fmt;

use common_error::{TabulaError, TabulaResult, ensure};
use tabula_core::types::infer_dtype;
use tabula_core::{DataType, Label, Value};

use crate::index::Index;

/// One column: values, their declared type, and the row labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: Option<Label>,
    values: Vec<Value>,
    dtype: DataType,
    index: Index,
}

impl Series {
    /// Create a named series with the default index and an inferred dtype.
    pub fn new<V: Into<Value>>(name: impl Into<Label>, values: impl IntoIterator<Item = V>) -> Self {
        Self::from_values(Some(name.into()), values.into_iter().map(Into::into).collect())
    }

    /// Create a series from values, inferring the declared dtype.
    pub fn from_values(name: Option<Label>, values: Vec<Value>) -> Self {
        let dtype = infer_dtype(&values);
        let index = Index::range(values.len());
        Self {
            name,
            values,
            dtype,
            index,
        }
    }

    /// Replace the row index.
    pub fn with_index(mut self, index: Index) -> TabulaResult<Self> {
        ensure!(
            index.len() == self.values.len(),
            ValueError: "index of length {} does not match series of length {}",
            index.len(),
            self.values.len()
        );
        self.index = index;
        Ok(self)
    }

    /// Rename the series.
    #[must_use]
    pub fn with_name(mut self, name: Option<Label>) -> Self {
        self.name = name;
        self
    }

    /// Override the declared dtype.
    #[must_use]
    pub fn with_dtype(mut self, dtype: DataType) -> Self {
        self.dtype = dtype;
        self
    }

    pub fn name(&self) -> Option<&Label> {
        self.name.as_ref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the row labelled `label`.
    pub fn get(&self, label: &Label) -> TabulaResult<&Value> {
        let pos = self.index.get_loc(label)?;
        self.values
            .get(pos)
            .ok_or_else(|| TabulaError::internal(format!("row {pos} out of bounds")))
    }

    /// Rows at the given positions, in the given order.
    pub fn take(&self, positions: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            values: positions
                .iter()
                .filter_map(|&p| self.values.get(p).cloned())
                .collect(),
            dtype: self.dtype,
            index: self.index.take(positions),
        }
    }

    /// Same name and index, new values, dtype re-inferred.
    pub fn map_values(&self, values: Vec<Value>) -> Self {
        Self {
            name: self.name.clone(),
            dtype: infer_dtype(&values),
            values,
            index: self.index.clone(),
        }
    }

    /// Interpret the values as a boolean mask.
    pub fn to_mask(&self) -> TabulaResult<Vec<bool>> {
        self.values
            .iter()
            .map(|v| {
                v.as_bool().ok_or_else(|| {
                    TabulaError::type_error(format!(
                        "mask must be boolean, found {} value {}",
                        v.type_name(),
                        v.repr()
                    ))
                })
            })
            .collect()
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.index.labels().iter().zip(&self.values) {
            writeln!(f, "{label}\t{value}")?;
        }
        match &self.name {
            Some(name) => write!(f, "Name: {name}, dtype: {}", self.dtype),
            None => write!(f, "dtype: {}", self.dtype),
        }
    }
}
