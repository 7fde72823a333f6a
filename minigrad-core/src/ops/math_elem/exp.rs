use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct ExpBackward {
    a: Tensor,
    /// Detached copy of the forward result, \( e^a \).
    output: Tensor,
}

impl BackwardOp for ExpBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        Ok(vec![mul_op(grad_output, &self.output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "ExpBackward"
    }
}

/// Element-wise natural exponential.
pub fn exp_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_unary_op(a, f32::exp, f64::exp)?;
    let saved = output.detach();
    Ok(finish_op(output, &[a], || {
        Arc::new(ExpBackward {
            a: a.clone(),
            output: saved,
        })
    }))
}
