use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::{apply_binary_op, finish_op};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass structure for element-wise addition.
///
/// Stores the input handles and their original shapes so the upstream gradient
/// can be reduced back along broadcast dimensions.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    /// For \( z = a + b \), \( \frac{dL}{da} = \frac{dL}{dz} \) and
    /// \( \frac{dL}{db} = \frac{dL}{dz} \), each summed over broadcast axes.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let grad_a = reduce_to_shape(grad_output, &self.a_shape)?;
        let grad_b = reduce_to_shape(grad_output, &self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "AddBackward"
    }
}

/// Element-wise addition `a + b` with broadcasting.
///
/// # Errors
/// `DataTypeMismatch` if the data types differ, `BroadcastError` if the shapes
/// are not broadcast-compatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_binary_op(a, b, |x, y| x + y, |x, y| x + y, "add")?;
    Ok(finish_op(output, &[a, b], || {
        Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: a.shape(),
            b_shape: b.shape(),
        })
    }))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
