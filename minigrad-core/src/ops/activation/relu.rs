use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct ReluBackward {
    a: Tensor,
}

impl BackwardOp for ReluBackward {
    /// Passes the gradient through where the input was positive.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let mask = apply_unary_op(
            &self.a,
            |x| if x > 0.0 { 1.0 } else { 0.0 },
            |x| if x > 0.0 { 1.0 } else { 0.0 },
        )?;
        Ok(vec![mul_op(grad_output, &mask)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "ReluBackward"
    }
}

/// Rectified linear unit, `max(a, 0)`. The derivative at 0 is taken as 0.
pub fn relu_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_unary_op(a, |x| x.max(0.0), |x| x.max(0.0))?;
    Ok(finish_op(output, &[a], || Arc::new(ReluBackward { a: a.clone() })))
}
