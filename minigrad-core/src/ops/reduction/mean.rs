use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::ops::{apply_unary_op, finish_op};
use crate::tensor::broadcast_utils::expand_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct MeanBackward {
    a: Tensor,
    numel: usize,
}

impl BackwardOp for MeanBackward {
    /// \( \frac{d}{da_i} \frac{1}{N}\sum_j a_j = \frac{1}{N} \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let n = self.numel as f64;
        let scaled = apply_unary_op(grad_output, |g| g / n as f32, |g| g / n)?;
        Ok(vec![expand_to_shape(&scaled, &self.a.shape())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "MeanBackward"
    }
}

/// Mean of all elements as a 0-dimensional tensor.
///
/// # Errors
/// `UnsupportedOperation` on an empty tensor.
pub fn mean_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let numel = a.numel();
    if numel == 0 {
        return Err(MinigradError::UnsupportedOperation(
            "mean of an empty tensor".to_string(),
        ));
    }
    let buffer = match &*a.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(vec![data.iter().sum::<f32>() / numel as f32]),
        Buffer::F64(data) => Buffer::F64(vec![data.iter().sum::<f64>() / numel as f64]),
    };
    let output = Tensor::from_buffer(buffer, vec![])?;
    Ok(finish_op(output, &[a], || Arc::new(MeanBackward { a: a.clone(), numel })))
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
