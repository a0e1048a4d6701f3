//! Display utilities for tabula.
//!
//! Two renderers live here:
//!
//! - [`AstNode`] renders expressions as indented source-like text and can
//!   collapse short subtrees onto a single line.
//! - [`DisplayTree`] renders arbitrary [`TreeNode`] structures with
//!   box-drawing connectors, used to explain selection trees.

mod ast;
mod tree;

pub use ast::{AstNode, IndentedLines};
pub use tree::{DisplayTree, TreeNode};
