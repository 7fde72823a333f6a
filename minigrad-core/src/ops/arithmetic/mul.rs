use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::{apply_binary_op, finish_op};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass structure for element-wise multiplication.
///
/// Keeps both operands since each one's gradient depends on the other.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    /// For \( z = a \cdot b \): \( \frac{dL}{da} = g \cdot b \), \( \frac{dL}{db} = g \cdot a \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let grad_a = reduce_to_shape(&mul_op(grad_output, &self.b)?, &self.a.shape())?;
        let grad_b = reduce_to_shape(&mul_op(grad_output, &self.a)?, &self.b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "MulBackward"
    }
}

/// Element-wise multiplication `a * b` with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_binary_op(a, b, |x, y| x * y, |x, y| x * y, "mul")?;
    Ok(finish_op(output, &[a, b], || {
        Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
