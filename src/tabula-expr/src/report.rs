//! One-line summaries of a table, for use between pipeline steps.

use std::fmt;
use std::sync::Arc;

use common_error::TabulaResult;
use log::debug;
use tabula_core::Target;

use crate::expr::{Expr, df};

/// One part of a report line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportItem {
    /// Printed as is.
    Text(String),
    /// Evaluated against the table and printed with its `Display` form.
    Expr(Expr),
}

impl From<&str> for ReportItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ReportItem {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Expr> for ReportItem {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

/// Where a rendered report line goes.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Prints a summary line for a table and hands the table back.
///
/// With no items the report shows the table's `shape`; a single text item
/// is used as a label in front of the `shape`.
///
/// ```rust
/// use tabula_expr::{Report, ReportItem, col};
///
/// let labelled = Report::new(["Label"]);
/// assert_eq!(labelled.items().len(), 2);
///
/// let report = Report::new([
///     ReportItem::from("unique y:"),
///     ReportItem::from(col("y").method("nunique", vec![])),
/// ])
/// .with_separator(" ");
/// assert_eq!(report.items().len(), 2);
/// ```
#[derive(Clone)]
pub struct Report {
    items: Vec<ReportItem>,
    separator: String,
    terminator: String,
    sink: Sink,
}

impl Report {
    /// Create a report printing `items` to stdout.
    pub fn new<I>(items: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<ReportItem>,
    {
        let mut items: Vec<ReportItem> = items.into_iter().map(Into::into).collect();
        let shape = || ReportItem::Expr(df().attr("shape"));
        match items.as_slice() {
            [] => items.push(shape()),
            [ReportItem::Text(_)] => items.push(shape()),
            _ => {}
        }
        Self {
            items,
            separator: " ".to_string(),
            terminator: "\n".to_string(),
            sink: Arc::new(|line: &str| print!("{line}")),
        }
    }

    /// The report showing just the shape.
    pub fn shape() -> Self {
        Self::new(Vec::<ReportItem>::new())
    }

    /// Text placed between items.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Text appended after the last item.
    #[must_use]
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Send lines to `sink` instead of stdout.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// The items shown, after defaults were filled in.
    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    /// Render the line for `target` without the terminator.
    pub fn render<T>(&self, target: &T) -> TabulaResult<String>
    where
        T: Target + fmt::Display,
    {
        let parts = self
            .items
            .iter()
            .map(|item| match item {
                ReportItem::Text(text) => Ok(text.clone()),
                ReportItem::Expr(expr) => Ok(expr.evaluate(target)?.to_string()),
            })
            .collect::<TabulaResult<Vec<_>>>()?;
        Ok(parts.join(&self.separator))
    }

    /// Emit the report for `target` and return it unchanged.
    pub fn run<T>(&self, target: T) -> TabulaResult<T>
    where
        T: Target + fmt::Display,
    {
        let line = self.render(&target)?;
        debug!("Reporting {} item(s)", self.items.len());
        (self.sink)(&format!("{line}{}", self.terminator));
        Ok(target)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::shape()
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("items", &self.items)
            .field("separator", &self.separator)
            .field("terminator", &self.terminator)
            .finish_non_exhaustive()
    }
}
