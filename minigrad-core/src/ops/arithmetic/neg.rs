use crate::autograd::BackwardOp;
use crate::error::MinigradError;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct NegBackward {
    a: Tensor,
}

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        Ok(vec![neg_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "NegBackward"
    }
}

/// Element-wise negation `-a`.
pub fn neg_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let output = apply_unary_op(a, |x| -x, |x| -x)?;
    Ok(finish_op(output, &[a], || Arc::new(NegBackward { a: a.clone() })))
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
