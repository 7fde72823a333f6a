use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::sync::Arc;

/// Creates a new F32 leaf tensor, optionally tracking gradients.
///
/// This is the entry point for values that gradients should flow into:
/// a leaf created with `requires_grad = true` accumulates gradients during
/// `backward()`, one created with `false` never does.
pub fn create(data: Vec<f32>, shape: Vec<usize>, requires_grad: bool) -> Result<Tensor, MinigradError> {
    leaf(Buffer::F32(data), shape, requires_grad)
}

/// F64 version of [`create`].
pub fn create_f64(data: Vec<f64>, shape: Vec<usize>, requires_grad: bool) -> Result<Tensor, MinigradError> {
    leaf(Buffer::F64(data), shape, requires_grad)
}

fn leaf(buffer: Buffer, shape: Vec<usize>, requires_grad: bool) -> Result<Tensor, MinigradError> {
    let tensor = Tensor::from_buffer(buffer, shape)?;
    tensor.write_data().requires_grad = requires_grad;
    Ok(tensor)
}

pub fn zeros(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full_dtype(shape, 0.0, DType::F32)
}

pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full_dtype(shape, 0.0, DType::F64)
}

pub fn ones(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full_dtype(shape, 1.0, DType::F32)
}

pub fn ones_f64(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full_dtype(shape, 1.0, DType::F64)
}

pub fn full(shape: &[usize], value: f32) -> Result<Tensor, MinigradError> {
    full_dtype(shape, value as f64, DType::F32)
}

pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, MinigradError> {
    full_dtype(shape, value, DType::F64)
}

/// Creates a tensor of the given data type filled with `value`.
pub fn full_dtype(shape: &[usize], value: f64, dtype: DType) -> Result<Tensor, MinigradError> {
    let numel = shape.iter().product();
    Tensor::from_buffer(Buffer::full(dtype, numel, value), shape.to_vec())
}

/// Creates a 0-dimensional F32 tensor.
pub fn scalar(value: f32) -> Tensor {
    Tensor::from_tensor_data(TensorData::sharing(Arc::new(Buffer::F32(vec![value])), vec![]))
}

/// Creates a 0-dimensional F64 tensor.
pub fn scalar_f64(value: f64) -> Tensor {
    Tensor::from_tensor_data(TensorData::sharing(Arc::new(Buffer::F64(vec![value])), vec![]))
}

/// Zero-filled tensor with the shape and data type of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, MinigradError> {
    full_dtype(&tensor.shape(), 0.0, tensor.dtype())
}

/// One-filled tensor with the shape and data type of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, MinigradError> {
    full_dtype(&tensor.shape(), 1.0, tensor.dtype())
}

/// `steps` evenly spaced F32 values from `start` to `end` inclusive.
pub fn linspace(start: f32, end: f32, steps: usize) -> Result<Tensor, MinigradError> {
    let values = linspace_values(start as f64, end as f64, steps)?;
    Tensor::from_buffer(Buffer::from_f64_vec(DType::F32, values), vec![steps])
}

/// `steps` evenly spaced F64 values from `start` to `end` inclusive.
pub fn linspace_f64(start: f64, end: f64, steps: usize) -> Result<Tensor, MinigradError> {
    let values = linspace_values(start, end, steps)?;
    Tensor::new_f64(values, vec![steps])
}

fn linspace_values(start: f64, end: f64, steps: usize) -> Result<Vec<f64>, MinigradError> {
    if steps < 2 {
        return Err(MinigradError::UnsupportedOperation(
            "Linspace requires at least 2 steps".to_string(),
        ));
    }
    let step_size = (end - start) / (steps - 1) as f64;
    let mut values: Vec<f64> = (0..steps).map(|i| start + i as f64 * step_size).collect();
    // Pin the last value so it is exactly `end`.
    values[steps - 1] = end;
    Ok(values)
}

/// Standard-normal F32 tensor drawn from the thread-local RNG.
pub fn randn(shape: &[usize]) -> Result<Tensor, MinigradError> {
    randn_with_rng(shape, DType::F32, &mut rand::thread_rng())
}

/// Standard-normal F64 tensor drawn from the thread-local RNG.
pub fn randn_f64(shape: &[usize]) -> Result<Tensor, MinigradError> {
    randn_with_rng(shape, DType::F64, &mut rand::thread_rng())
}

/// Standard-normal tensor drawn from a caller-provided RNG (for reproducibility).
pub fn randn_with_rng<R: Rng + ?Sized>(
    shape: &[usize],
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, MinigradError> {
    let numel = shape.iter().product();
    let buffer = match dtype {
        DType::F32 => Buffer::F32((0..numel).map(|_| StandardNormal.sample(rng)).collect()),
        DType::F64 => Buffer::F64((0..numel).map(|_| StandardNormal.sample(rng)).collect()),
    };
    Tensor::from_buffer(buffer, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
