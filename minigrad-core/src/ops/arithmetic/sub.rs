use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::neg_op;
use crate::ops::{apply_binary_op, finish_op};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for SubBackward {
    /// dL/da = g, dL/db = -g, both reduced to the input shapes.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let grad_a = reduce_to_shape(grad_output, &self.a_shape)?;
        let grad_b = reduce_to_shape(&neg_op(grad_output)?, &self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "SubBackward"
    }
}

/// Element-wise subtraction `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_binary_op(a, b, |x, y| x - y, |x, y| x - y, "sub")?;
    Ok(finish_op(output, &[a, b], || {
        Arc::new(SubBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: a.shape(),
            b_shape: b.shape(),
        })
    }))
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
