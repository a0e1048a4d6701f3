//! String predicates over axis labels.

use std::fmt;

use common_error::TabulaResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tabula_core::Label;

/// A string test applied to every label of an axis (or of one level).
///
/// Only string labels can match; integer and tuple labels never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Label starts with the text.
    StartsWith(String),
    /// Label ends with the text.
    EndsWith(String),
    /// Label contains the text.
    Contains(String),
    /// Regular expression matching at the start of the label.
    Matches(String),
}

impl Predicate {
    /// The method name of this predicate.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartsWith(_) => "startswith",
            Self::EndsWith(_) => "endswith",
            Self::Contains(_) => "contains",
            Self::Matches(_) => "match",
        }
    }

    /// The pattern text.
    pub fn pattern(&self) -> &str {
        match self {
            Self::StartsWith(p) | Self::EndsWith(p) | Self::Contains(p) | Self::Matches(p) => p,
        }
    }

    /// Evaluate the predicate on every label.
    pub fn mask(&self, labels: &[Label]) -> TabulaResult<Vec<bool>> {
        let regex = match self {
            Self::Matches(pattern) => Some(Regex::new(&format!("^(?:{pattern})"))?),
            _ => None,
        };
        Ok(labels
            .iter()
            .map(|label| {
                label.as_str().is_some_and(|text| match self {
                    Self::StartsWith(p) => text.starts_with(p.as_str()),
                    Self::EndsWith(p) => text.ends_with(p.as_str()),
                    Self::Contains(p) => text.contains(p.as_str()),
                    Self::Matches(_) => regex.as_ref().is_some_and(|re| re.is_match(text)),
                })
            })
            .collect())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.name(), self.pattern())
    }
}
