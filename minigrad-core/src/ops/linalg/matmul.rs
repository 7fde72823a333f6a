use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::ops::linalg::{matrix_dims, transpose_op};
use crate::ops::traits::MinigradNumeric;
use crate::ops::{check_same_dtype, finish_op};
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass structure for 2-D matrix multiplication.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    /// For \( C = A B \): \( \frac{dL}{dA} = G B^T \), \( \frac{dL}{dB} = A^T G \).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let grad_a = matmul_op(grad_output, &transpose_op(&self.b)?)?;
        let grad_b = matmul_op(&transpose_op(&self.a)?, grad_output)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "MatmulBackward"
    }
}

/// Matrix product of `a` (`[m, k]`) and `b` (`[k, n]`), giving `[m, n]`.
///
/// # Errors
/// `RankMismatch` if either input is not 2-D, `ShapeMismatch` if the inner
/// dimensions differ, `DataTypeMismatch` if the data types differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    check_same_dtype(a, b, "matmul")?;
    let (m, k) = matrix_dims(a)?;
    let (k2, n) = matrix_dims(b)?;
    if k != k2 {
        return Err(MinigradError::ShapeMismatch {
            expected: format!("[{}, _] for the right-hand side", k),
            actual: format!("{:?}", b.shape()),
            operation: "matmul".to_string(),
        });
    }

    let (a_buffer, b_buffer) = (a.buffer_arc(), b.buffer_arc());
    let buffer = match (&*a_buffer, &*b_buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => Buffer::F32(matmul_kernel(x, y, m, k, n)),
        (Buffer::F64(x), Buffer::F64(y)) => Buffer::F64(matmul_kernel(x, y, m, k, n)),
        _ => {
            return Err(MinigradError::InternalError(
                "matmul: buffer types diverge from tensor dtypes".to_string(),
            ))
        }
    };
    let output = Tensor::from_buffer(buffer, vec![m, n])?;
    Ok(finish_op(output, &[a, b], || {
        Arc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

fn matmul_kernel<T: MinigradNumeric>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            for j in 0..n {
                out[i * n + j] += a_ip * b[p * n + j];
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
