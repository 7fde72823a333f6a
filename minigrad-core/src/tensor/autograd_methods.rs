use crate::autograd::{graph, no_grad, BackwardOp};
use crate::error::MinigradError;
use crate::tensor::create::full_dtype;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use log::{debug, warn};
use std::sync::Arc;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    ///
    /// Turning tracking off also drops any accumulated gradient, since
    /// gradient storage only exists for tracked tensors.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        if requires_grad && guard.grad_fn.is_some() {
            warn!("Setting requires_grad=true on a non-leaf tensor; gradients will not accumulate here. Use detach() to get a leaf.");
        }
        guard.requires_grad = requires_grad;
        if !requires_grad {
            guard.grad = None;
            guard.grad_fresh = false;
        }
        Ok(())
    }

    /// Returns a handle to the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the operation that produced this tensor, if any.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// True if this tensor was not produced by a tracked operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns a new leaf tensor sharing this tensor's values but detached from
    /// the computation graph. The result never requires gradients.
    pub fn detach(&self) -> Tensor {
        let buffer = self.buffer_arc();
        Tensor::from_tensor_data(TensorData::sharing(buffer, self.shape()))
    }

    /// Adds `grad_to_add` into this tensor's gradient storage.
    ///
    /// The first accumulation stores a detached copy; later ones sum into it.
    /// Existing gradients are never overwritten.
    pub fn acc_grad(&self, grad_to_add: &Tensor) -> Result<(), MinigradError> {
        // Read the incoming gradient before locking self for writing.
        let incoming = grad_to_add.buffer_arc();
        let incoming_shape = grad_to_add.shape();

        let mut guard = self.write_data();
        if !guard.requires_grad {
            return Err(MinigradError::RequiresGradNotMet);
        }
        if incoming.dtype() != guard.dtype {
            return Err(MinigradError::DataTypeMismatch {
                expected: guard.dtype,
                actual: incoming.dtype(),
                operation: "acc_grad".to_string(),
            });
        }
        if incoming_shape != guard.shape {
            return Err(MinigradError::GradientAccumulationShapeMismatch {
                expected: guard.shape.clone(),
                actual: incoming_shape,
            });
        }

        let accumulated = match guard.grad.take() {
            Some(existing) => {
                let summed = existing.buffer_arc().add(&incoming)?;
                Tensor::from_buffer(summed, incoming_shape)?
            }
            None => Tensor::from_tensor_data(TensorData::sharing(incoming, incoming_shape)),
        };
        guard.grad = Some(accumulated);
        guard.grad_fresh = true;
        Ok(())
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// # Arguments
    /// * `gradient`: seed gradient (dL/dself). When `None`, the tensor must hold
    ///   exactly one element and the seed is `1`.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not track gradients.
    /// * `BackwardNonScalar` if no seed is given for a multi-element tensor.
    /// * `ShapeMismatch` / `DataTypeMismatch` if the seed does not match this tensor.
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), MinigradError> {
        if !self.requires_grad() {
            return Err(MinigradError::RequiresGradNotMet);
        }

        let seed = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(MinigradError::ShapeMismatch {
                        expected: format!("{:?}", self.shape()),
                        actual: format!("{:?}", g.shape()),
                        operation: "backward (seed gradient)".to_string(),
                    });
                }
                if g.dtype() != self.dtype() {
                    return Err(MinigradError::DataTypeMismatch {
                        expected: self.dtype(),
                        actual: g.dtype(),
                        operation: "backward (seed gradient)".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if self.numel() != 1 {
                    return Err(MinigradError::BackwardNonScalar);
                }
                full_dtype(&self.shape(), 1.0, self.dtype())?
            }
        };

        if self.is_leaf() {
            debug!("backward() called on a leaf; seeding its own gradient");
        }
        no_grad(|| graph::run_backward(self, seed))
    }

    /// Resets an existing gradient to exactly zero, keeping its storage.
    ///
    /// Does nothing if no gradient has been accumulated yet. Afterwards
    /// [`Tensor::has_fresh_grad`] is false until the next accumulation.
    pub fn zero_grad(&self) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        if let Some(existing) = guard.grad.take() {
            guard.grad = Some(full_dtype(&existing.shape(), 0.0, existing.dtype())?);
        }
        guard.grad_fresh = false;
        Ok(())
    }

    /// Drops the gradient, returning it to the uninitialized state.
    pub fn clear_grad(&self) {
        let mut guard = self.write_data();
        guard.grad = None;
        guard.grad_fresh = false;
    }

    /// True if a gradient has been accumulated since the last
    /// `zero_grad`/`clear_grad`.
    pub fn has_fresh_grad(&self) -> bool {
        self.read_data().grad_fresh
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
