//! Configuration management for tabula.
//!
//! Provides the knobs for expression rendering and axis selection.

use serde::{Deserialize, Serialize};

/// Global tabula configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulaConfig {
    /// Expression rendering configuration.
    pub display: DisplayConfig,
    /// Axis selection configuration.
    pub selection: SelectionConfig,
}

impl TabulaConfig {
    /// Replace the display configuration.
    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Replace the selection configuration.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }
}

/// Rendering configuration for expression trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Subtrees whose single-line form fits in this many columns
    /// (including indentation) are collapsed onto one line.
    pub width: usize,
    /// Indentation added per nesting level.
    pub indent: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 60,
            indent: 2,
        }
    }
}

impl DisplayConfig {
    /// Set the collapse width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the indentation step.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// A configuration that never collapses.
    pub fn expanded() -> Self {
        Self::default().with_width(0)
    }
}

/// Axis selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Rows sampled per column when a dtype can only be decided by value.
    pub sample_size: usize,
    /// Seed for the sample; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Opt in to the experimental selection API without an advisory warning.
    pub experimental: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            seed: None,
            experimental: false,
        }
    }
}

impl SelectionConfig {
    /// Set the dtype sampling sample size.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Fix the dtype sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Opt in to (or out of) the experimental selection API.
    #[must_use]
    pub fn with_experimental(mut self, enable: bool) -> Self {
        self.experimental = enable;
        self
    }
}
