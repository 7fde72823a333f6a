use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::Tensor;

fn reject_tracked(t: &Tensor, operation: &str) -> Result<(), MinigradError> {
    if t.requires_grad() {
        return Err(MinigradError::UnsupportedOperation(format!(
            "{} does not propagate gradients; detach() the input first",
            operation
        )));
    }
    Ok(())
}

/// Rows `start..end` of the leading axis, as a copy.
///
/// A tensor of shape `[n, d1, ...]` yields `[end - start, d1, ...]`.
///
/// # Errors
/// `RankMismatch` for 0-dimensional inputs, `IndexOutOfBounds` if the range is
/// empty-reversed or past the end.
pub fn slice_rows(t: &Tensor, start: usize, end: usize) -> Result<Tensor, MinigradError> {
    reject_tracked(t, "slice_rows")?;
    let shape = t.shape();
    let rows = *shape.first().ok_or(MinigradError::RankMismatch {
        expected: 1,
        actual: 0,
    })?;
    if start > end || end > rows {
        return Err(MinigradError::IndexOutOfBounds {
            index: vec![start, end],
            shape,
        });
    }
    let row_len: usize = shape[1..].iter().product();
    let range = start * row_len..end * row_len;
    let buffer = match &*t.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(data[range].to_vec()),
        Buffer::F64(data) => Buffer::F64(data[range].to_vec()),
    };
    let mut out_shape = shape;
    out_shape[0] = end - start;
    Tensor::from_buffer(buffer, out_shape)
}

/// Concatenates tensors along the leading axis.
///
/// All inputs must share the data type and the trailing dimensions.
pub fn cat_rows(tensors: &[Tensor]) -> Result<Tensor, MinigradError> {
    let first = tensors.first().ok_or_else(|| {
        MinigradError::UnsupportedOperation("cat_rows needs at least one tensor".to_string())
    })?;
    let first_shape = first.shape();
    if first_shape.is_empty() {
        return Err(MinigradError::RankMismatch {
            expected: 1,
            actual: 0,
        });
    }
    let dtype = first.dtype();

    let mut total_rows = 0;
    let mut values: Vec<f64> = Vec::new();
    for t in tensors {
        reject_tracked(t, "cat_rows")?;
        if t.dtype() != dtype {
            return Err(MinigradError::DataTypeMismatch {
                expected: dtype,
                actual: t.dtype(),
                operation: "cat_rows".to_string(),
            });
        }
        let shape = t.shape();
        if shape.len() != first_shape.len() || shape[1..] != first_shape[1..] {
            return Err(MinigradError::ShapeMismatch {
                expected: format!("[_, {:?}]", &first_shape[1..]),
                actual: format!("{:?}", shape),
                operation: "cat_rows".to_string(),
            });
        }
        total_rows += shape[0];
        values.extend(t.to_f64_vec());
    }

    let mut out_shape = first_shape;
    out_shape[0] = total_rows;
    Tensor::from_buffer(Buffer::from_f64_vec(dtype, values), out_shape)
}
