//! Error types and result aliases for tabula.
//!
//! Every crate in the workspace reports failures through [`TabulaError`].
//! Engines surface their own errors with it and the expression and selection
//! cores pass them through untouched.

mod error;

pub use error::{TabulaError, TabulaResult};
