//! Parameter initialization.

use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Tensor of `shape` with values drawn uniformly from `[low, high)`.
pub fn uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, MinigradError> {
    if !(low < high) {
        return Err(MinigradError::InvalidConfig(format!(
            "uniform bounds must satisfy low < high, got [{}, {})",
            low, high
        )));
    }
    let numel = shape.iter().product();
    let dist = Uniform::new(low, high);
    let values: Vec<f64> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::from_buffer(Buffer::from_f64_vec(dtype, values), shape.to_vec())
}

/// The default `Linear` initialization: uniform in `±1/sqrt(fan_in)`.
pub fn fan_in_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, MinigradError> {
    if fan_in == 0 {
        return Err(MinigradError::InvalidConfig("fan_in must be positive".to_string()));
    }
    let bound = 1.0 / (fan_in as f64).sqrt();
    uniform(shape, -bound, bound, dtype, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
