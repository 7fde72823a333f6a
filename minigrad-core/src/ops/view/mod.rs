//! Data movement along the leading axis.
//!
//! These helpers batch and split samples for the data pipeline. They copy values
//! and are not differentiable, so they refuse inputs that track gradients.

pub mod rows;

pub use rows::{cat_rows, slice_rows};
