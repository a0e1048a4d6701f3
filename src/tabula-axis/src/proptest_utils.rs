//! Property-based testing utilities for tabula-axis.
//!
//! Strategies for selection trees over a fixed set of column labels, and the
//! algebra laws their evaluation must satisfy.
