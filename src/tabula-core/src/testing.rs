//! Testing utilities for code that replays expressions.
//!
//! [`Trace`] is a symbolic [`Target`]: instead of computing anything it
//! records the path of every access made on it, and counts how many accesses
//! were made through any value derived from the same root. This makes it easy
//! to check what an expression does without a real table engine.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common_error::TabulaResult;

use crate::label::Label;
use crate::target::{Subject, Target};
use crate::types::Value;

/// A target that renders the accesses made on it.
#[derive(Debug, Clone)]
pub struct Trace {
    path: String,
    subject: Option<Subject>,
    accesses: Arc<AtomicUsize>,
}

impl Trace {
    /// Create a root trace standing in for `subject`.
    pub fn new(name: impl Into<String>, subject: Subject) -> Self {
        Self {
            path: name.into(),
            subject: Some(subject),
            accesses: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a root trace standing in for a table.
    pub fn frame(name: impl Into<String>) -> Self {
        Self::new(name, Subject::Frame)
    }

    /// Create a root trace standing in for a column.
    pub fn series(name: impl Into<String>) -> Self {
        Self::new(name, Subject::Series)
    }

    /// The recorded access path, e.g. `T.x.clip(T.y.min())`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of accesses made through this root and everything derived from it.
    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    fn derive(&self, path: String) -> Self {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        Self {
            path,
            subject: None,
            accesses: Arc::clone(&self.accesses),
        }
    }
}

impl Target for Trace {
    fn subject(&self) -> Option<Subject> {
        self.subject
    }

    fn from_value(value: Value) -> Self {
        Self {
            path: value.repr(),
            subject: None,
            accesses: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn attribute(&self, name: &str) -> TabulaResult<Self> {
        Ok(self.derive(format!("{}.{name}", self.path)))
    }

    fn item(&self, key: &Label) -> TabulaResult<Self> {
        Ok(self.derive(format!("{}[{key}]", self.path)))
    }

    fn invoke(
        &self,
        name: &str,
        args: Vec<Self>,
        kwargs: BTreeMap<String, Self>,
    ) -> TabulaResult<Self> {
        let parts: Vec<String> = args
            .iter()
            .map(|a| a.path.clone())
            .chain(kwargs.iter().map(|(k, v)| format!("{k}={}", v.path)))
            .collect();
        Ok(self.derive(format!("{}.{name}({})", self.path, parts.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_path() {
        let root = Trace::frame("T");
        let x = root.attribute("x").unwrap();
        let min = root.item(&Label::from("y")).unwrap();
        let min = min.invoke("min", vec![], BTreeMap::new()).unwrap();

        let mut kwargs = BTreeMap::new();
        kwargs.insert("upper".to_string(), Trace::from_value(Value::from(3i64)));
        let clipped = x.invoke("clip", vec![min], kwargs).unwrap();

        assert_eq!(clipped.path(), "T.x.clip(T[\"y\"].min(), upper=3)");
        assert_eq!(root.accesses(), 4);
        assert_eq!(clipped.subject(), None);
        assert_eq!(root.subject(), Some(Subject::Frame));
    }
}
