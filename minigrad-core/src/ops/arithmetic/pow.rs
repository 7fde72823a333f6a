use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct PowScalarBackward {
    a: Tensor,
    exponent: f64,
}

impl BackwardOp for PowScalarBackward {
    /// \( \frac{d}{da} a^p = p \cdot a^{p-1} \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let p = self.exponent;
        let local = apply_unary_op(
            &self.a,
            |x| (p as f32) * x.powf((p - 1.0) as f32),
            |x| p * x.powf(p - 1.0),
        )?;
        Ok(vec![mul_op(grad_output, &local)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "PowScalarBackward"
    }
}

/// Raises every element of `a` to the power `exponent`.
pub fn pow_scalar_op(a: &Tensor, exponent: f64) -> Result<Tensor, MinigradError> {
    let output = apply_unary_op(a, |x| x.powf(exponent as f32), |x| x.powf(exponent))?;
    Ok(finish_op(output, &[a], || {
        Arc::new(PowScalarBackward {
            a: a.clone(),
            exponent,
        })
    }))
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
