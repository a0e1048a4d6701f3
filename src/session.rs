//! Entry points bound to one [`TabulaConfig`].

use common_config::TabulaConfig;
use tabula_axis::AxisSelector;
use tabula_core::Axis;
use tabula_expr::Expr;

/// Builds selectors and renders expressions with a shared configuration.
///
/// ```rust
/// use tabula::Session;
/// use tabula::config::{SelectionConfig, TabulaConfig};
///
/// let config = TabulaConfig::default()
///     .with_selection(SelectionConfig::default().with_experimental(true).with_seed(7));
/// let session = Session::new(config);
/// assert_eq!(session.columns().config().seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    config: TabulaConfig,
}

impl Session {
    pub fn new(config: TabulaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TabulaConfig {
        &self.config
    }

    /// The `C` root, using the session's selection configuration.
    pub fn columns(&self) -> AxisSelector {
        AxisSelector::with_config(Axis::Columns, self.config.selection.clone())
    }

    /// The `I` root, using the session's selection configuration.
    pub fn index(&self) -> AxisSelector {
        AxisSelector::with_config(Axis::Index, self.config.selection.clone())
    }

    /// Render `expr` with the session's display configuration.
    pub fn pretty(&self, expr: &Expr) -> String {
        expr.pretty(&self.config.display)
    }
}
