use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::ops::finish_op;
use crate::ops::linalg::matrix_dims;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct TransposeBackward {
    a: Tensor,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        Ok(vec![transpose_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn name(&self) -> &'static str {
        "TransposeBackward"
    }
}

/// Swaps the two axes of a 2-D tensor. The result is a contiguous copy.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, MinigradError> {
    let (rows, cols) = matrix_dims(a)?;
    let buffer = match &*a.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(transpose_kernel(data, rows, cols)),
        Buffer::F64(data) => Buffer::F64(transpose_kernel(data, rows, cols)),
    };
    let output = Tensor::from_buffer(buffer, vec![cols, rows])?;
    Ok(finish_op(output, &[a], || Arc::new(TransposeBackward { a: a.clone() })))
}

fn transpose_kernel<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    (0..cols)
        .flat_map(|j| (0..rows).map(move |i| data[i * cols + j]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};

    #[test]
    fn test_transpose_forward_backward() {
        let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let t = transpose_op(&a).unwrap();
        check_tensor_near(&t, &[3, 2], &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 1e-6);

        let seed = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
        t.backward(Some(seed)).unwrap();
        check_tensor_near(&a.grad().unwrap(), &[2, 3], &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0], 1e-6);
    }
}
