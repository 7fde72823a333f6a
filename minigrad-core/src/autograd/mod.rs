//! Reverse-mode automatic differentiation.
//!
//! Operations record a [`BackwardOp`] on the tensors they produce; calling
//! [`backward`] walks that graph from the output and accumulates gradients into
//! the leaves that requested them.

pub mod backward_op;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;

pub use backward_op::BackwardOp;
pub use grad_mode::{is_grad_enabled, no_grad};

use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Runs the backward pass from a single-element `tensor`.
///
/// Equivalent to `tensor.backward(None)`.
pub fn backward(tensor: &Tensor) -> Result<(), MinigradError> {
    tensor.backward(None)
}

/// Resets the gradient storage of every tensor in `tensors` to exactly zero.
///
/// Tensors that have not accumulated a gradient yet are left uninitialized.
/// Optimizers treat a zeroed gradient as absent until the next backward pass.
pub fn zero_gradients(tensors: &[Tensor]) -> Result<(), MinigradError> {
    for tensor in tensors {
        tensor.zero_grad()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "autograd_test.rs"]
mod tests;
