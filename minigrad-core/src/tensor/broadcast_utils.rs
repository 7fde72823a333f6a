use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::ops::traits::MinigradNumeric;
use crate::tensor::utils::{broadcast_shapes, broadcast_strides, calculate_strides, coord_to_offset, index_to_coord};
use crate::tensor::Tensor;

/// Sums `grad` over the axes along which a tensor of `target_shape` was
/// broadcast, producing a gradient with exactly `target_shape`.
///
/// This is the backward counterpart of broadcasting: an input of shape `[1, 3]`
/// that was stretched to `[4, 3]` receives the column sums of a `[4, 3]` gradient.
pub fn reduce_to_shape(grad: &Tensor, target_shape: &[usize]) -> Result<Tensor, MinigradError> {
    let grad_shape = grad.shape();
    if grad_shape == target_shape {
        return Ok(grad.clone());
    }
    check_broadcastable(target_shape, &grad_shape)?;

    let buffer = match &*grad.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(reduce_kernel(data, &grad_shape, target_shape)),
        Buffer::F64(data) => Buffer::F64(reduce_kernel(data, &grad_shape, target_shape)),
    };
    Tensor::from_buffer(buffer, target_shape.to_vec())
}

/// Materializes `tensor` broadcast to `target_shape`.
pub fn expand_to_shape(tensor: &Tensor, target_shape: &[usize]) -> Result<Tensor, MinigradError> {
    let shape = tensor.shape();
    if shape == target_shape {
        return Ok(tensor.clone());
    }
    check_broadcastable(&shape, target_shape)?;

    let buffer = match &*tensor.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(expand_kernel(data, &shape, target_shape)),
        Buffer::F64(data) => Buffer::F64(expand_kernel(data, &shape, target_shape)),
    };
    Tensor::from_buffer(buffer, target_shape.to_vec())
}

/// Applies `f` element-wise over two broadcast inputs.
pub(crate) fn broadcast_binary_kernel<T: Copy, F: Fn(T, T) -> T>(
    a: &[T],
    a_shape: &[usize],
    b: &[T],
    b_shape: &[usize],
    output_shape: &[usize],
    f: F,
) -> Vec<T> {
    let numel: usize = output_shape.iter().product();
    if a_shape == output_shape && b_shape == output_shape {
        return a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect();
    }
    let output_strides = calculate_strides(output_shape);
    let a_strides = broadcast_strides(a_shape, output_shape);
    let b_strides = broadcast_strides(b_shape, output_shape);
    (0..numel)
        .map(|i| {
            let coord = index_to_coord(i, &output_strides, output_shape);
            f(a[coord_to_offset(&coord, &a_strides)], b[coord_to_offset(&coord, &b_strides)])
        })
        .collect()
}

fn check_broadcastable(shape: &[usize], target_shape: &[usize]) -> Result<(), MinigradError> {
    let combined = broadcast_shapes(shape, target_shape)?;
    if combined != target_shape {
        return Err(MinigradError::BroadcastError {
            shape1: shape.to_vec(),
            shape2: target_shape.to_vec(),
        });
    }
    Ok(())
}

fn reduce_kernel<T: MinigradNumeric>(data: &[T], grad_shape: &[usize], target_shape: &[usize]) -> Vec<T> {
    let mut reduced = vec![T::zero(); target_shape.iter().product()];
    let grad_strides = calculate_strides(grad_shape);
    let target_strides = broadcast_strides(target_shape, grad_shape);
    for (i, &value) in data.iter().enumerate() {
        let coord = index_to_coord(i, &grad_strides, grad_shape);
        reduced[coord_to_offset(&coord, &target_strides)] += value;
    }
    reduced
}

fn expand_kernel<T: Copy>(data: &[T], shape: &[usize], target_shape: &[usize]) -> Vec<T> {
    let numel: usize = target_shape.iter().product();
    let target_strides = calculate_strides(target_shape);
    let source_strides = broadcast_strides(shape, target_shape);
    (0..numel)
        .map(|i| {
            let coord = index_to_coord(i, &target_strides, target_shape);
            data[coord_to_offset(&coord, &source_strides)]
        })
        .collect()
}
