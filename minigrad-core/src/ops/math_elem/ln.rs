use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::div_op;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct LnBackward {
    a: Tensor,
}

impl BackwardOp for LnBackward {
    /// \( \frac{d}{da} \ln a = 1 / a \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        Ok(vec![div_op(grad_output, &self.a)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "LnBackward"
    }
}

/// Element-wise natural logarithm. Non-positive inputs yield `NaN`/`-inf`.
pub fn ln_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_unary_op(a, f32::ln, f64::ln)?;
    Ok(finish_op(output, &[a], || Arc::new(LnBackward { a: a.clone() })))
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
