//! Loss functions: `(prediction, target) -> scalar`.

pub mod mse;

pub use mse::{MSELoss, Reduction};

use crate::error::MinigradError;
use crate::tensor::Tensor;

/// A scalar-valued objective comparing a prediction with its target.
pub trait Loss: std::fmt::Debug {
    /// Computes the loss as a 0-dimensional tensor that tracks gradients if the
    /// prediction does.
    fn calculate(&self, prediction: &Tensor, target: &Tensor) -> Result<Tensor, MinigradError>;
}
