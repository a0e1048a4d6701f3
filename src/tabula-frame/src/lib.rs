//! In-memory table engine for tabula.
//!
//! A deliberately small columnar engine: a [`Frame`] of [`Series`] sharing a
//! row [`Index`]. [`Datum`] wraps everything reachable from a frame and
//! implements [`tabula_core::Target`], so recorded expressions can be replayed
//! on it; [`Frame`] implements [`tabula_core::LabelSource`] for axis selection.

mod datum;
mod frame;
mod index;
pub mod kernels;
mod series;

pub use datum::Datum;
pub use frame::Frame;
pub use index::Index;
pub use series::Series;
