use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::ops::finish_op;
use crate::tensor::broadcast_utils::expand_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct SumBackward {
    a: Tensor,
}

impl BackwardOp for SumBackward {
    /// Every input element contributes with weight 1, so the scalar upstream
    /// gradient is broadcast back to the input shape.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        Ok(vec![expand_to_shape(grad_output, &self.a.shape())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "SumBackward"
    }
}

/// Sums all elements into a 0-dimensional tensor.
pub fn sum_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let buffer = match &*a.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(vec![data.iter().sum()]),
        Buffer::F64(data) => Buffer::F64(vec![data.iter().sum()]),
    };
    let output = Tensor::from_buffer(buffer, vec![])?;
    Ok(finish_op(output, &[a], || Arc::new(SumBackward { a: a.clone() })))
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
