use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::ops::{apply_binary_op, finish_op};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct DivBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for DivBackward {
    /// For \( z = a / b \): \( \frac{dL}{da} = g / b \), \( \frac{dL}{db} = -g \cdot a / b^2 \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let grad_a = div_op(grad_output, &self.b)?;
        let b_squared = mul_op(&self.b, &self.b)?;
        let grad_b = neg_op(&div_op(&mul_op(grad_output, &self.a)?, &b_squared)?)?;
        Ok(vec![
            reduce_to_shape(&grad_a, &self.a.shape())?,
            reduce_to_shape(&grad_b, &self.b.shape())?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "DivBackward"
    }
}

/// Element-wise division `a / b` with broadcasting.
///
/// Division by zero follows IEEE semantics (`inf`/`NaN`), it is not an error.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_binary_op(a, b, |x, y| x / y, |x, y| x / y, "div")?;
    Ok(finish_op(output, &[a, b], || {
        Arc::new(DivBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
