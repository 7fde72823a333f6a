use num_traits::{Float, NumAssignOps, NumOps};
use std::fmt::Debug;

/// A trait representing numeric types usable in minigrad tensor kernels.
///
/// Only floating-point element types (`f32`, `f64`) implement it; every
/// differentiable operation is written once against this bound and then
/// dispatched on the tensor's `DType`.
pub trait MinigradNumeric:
    Float + NumAssignOps + NumOps + PartialOrd + Debug + Copy + Send + Sync + 'static
{
}

impl MinigradNumeric for f32 {}

impl MinigradNumeric for f64 {}
