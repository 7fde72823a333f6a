//! Two-dimensional linear algebra.

pub mod matmul;
pub mod transpose;

pub use matmul::matmul_op;
pub use transpose::transpose_op;

use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Returns `(rows, cols)` of a rank-2 tensor, or `RankMismatch`.
pub(crate) fn matrix_dims(t: &Tensor) -> Result<(usize, usize), MinigradError> {
    match t.shape().as_slice() {
        [rows, cols] => Ok((*rows, *cols)),
        other => Err(MinigradError::RankMismatch {
            expected: 2,
            actual: other.len(),
        }),
    }
}
