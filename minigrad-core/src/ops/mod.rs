//! # Tensor operations (`ops`)
//!
//! Every differentiable operation has an `xxx_op` function that validates its
//! inputs, computes the forward result and, when any input tracks gradients,
//! attaches a `XxxBackward` struct implementing [`BackwardOp`]. Tensor methods
//! (`a.add(&b)`, `a.matmul(&b)`, ...) are thin wrappers over these functions.
//!
//! [`combine`] is the explicit graph-building entry point: it dispatches an
//! [`Op`] tag to the matching `xxx_op` after checking arity.
//!
//! ## Submodules
//!
//! - [`arithmetic`]: add, sub, mul, div, neg, pow with a scalar exponent.
//! - [`math_elem`]: exp, ln.
//! - [`activation`]: relu.
//! - [`linalg`]: 2-D matmul and transpose.
//! - [`reduction`]: full sum and mean.
//! - [`view`]: non-differentiable row slicing and concatenation.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod traits;
pub mod view;

use crate::autograd::{is_grad_enabled, BackwardOp};
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::broadcast_utils::broadcast_binary_kernel;
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use crate::types::DType;
use std::sync::Arc;

/// Tag identifying a differentiable operation, for use with [`combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    /// Raise every element to a fixed exponent.
    PowScalar(f64),
    Exp,
    Ln,
    Relu,
    Matmul,
    Transpose,
    Sum,
    Mean,
}

impl Op {
    /// Number of tensor inputs the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Matmul => 2,
            Op::Neg | Op::PowScalar(_) | Op::Exp | Op::Ln | Op::Relu | Op::Transpose | Op::Sum | Op::Mean => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Neg => "neg",
            Op::PowScalar(_) => "pow_scalar",
            Op::Exp => "exp",
            Op::Ln => "ln",
            Op::Relu => "relu",
            Op::Matmul => "matmul",
            Op::Transpose => "transpose",
            Op::Sum => "sum",
            Op::Mean => "mean",
        }
    }
}

/// Applies `op` to `inputs`, producing a new tensor whose producing operation is `op`.
///
/// The result requires gradients iff any input does (and graph recording is
/// enabled); only then is a backward node attached.
///
/// # Errors
/// `ArityMismatch` if the number of inputs does not match the operation, plus
/// whatever the operation itself reports (dtype, shape, broadcast errors).
pub fn combine(op: Op, inputs: &[&Tensor]) -> Result<Tensor, MinigradError> {
    if inputs.len() != op.arity() {
        return Err(MinigradError::ArityMismatch {
            operation: op.name().to_string(),
            expected: op.arity(),
            actual: inputs.len(),
        });
    }
    match (op, inputs) {
        (Op::Add, [a, b]) => arithmetic::add_op(a, b),
        (Op::Sub, [a, b]) => arithmetic::sub_op(a, b),
        (Op::Mul, [a, b]) => arithmetic::mul_op(a, b),
        (Op::Div, [a, b]) => arithmetic::div_op(a, b),
        (Op::Matmul, [a, b]) => linalg::matmul_op(a, b),
        (Op::Neg, [a]) => arithmetic::neg_op(a),
        (Op::PowScalar(exponent), [a]) => arithmetic::pow_scalar_op(a, exponent),
        (Op::Exp, [a]) => math_elem::exp_op(a),
        (Op::Ln, [a]) => math_elem::ln_op(a),
        (Op::Relu, [a]) => activation::relu_op(a),
        (Op::Transpose, [a]) => linalg::transpose_op(a),
        (Op::Sum, [a]) => reduction::sum_op(a),
        (Op::Mean, [a]) => reduction::mean_op(a),
        _ => Err(MinigradError::InternalError(format!(
            "combine: unhandled arity for {}",
            op.name()
        ))),
    }
}

/// Fails with `DataTypeMismatch` unless both tensors share a data type.
pub(crate) fn check_same_dtype(a: &Tensor, b: &Tensor, op_name: &str) -> Result<DType, MinigradError> {
    let (dtype_a, dtype_b) = (a.dtype(), b.dtype());
    if dtype_a != dtype_b {
        return Err(MinigradError::DataTypeMismatch {
            expected: dtype_a,
            actual: dtype_b,
            operation: op_name.to_string(),
        });
    }
    Ok(dtype_a)
}

/// Attaches a backward node to `output` when any of `inputs` tracks gradients.
///
/// `backward_builder` is only invoked in that case, so untracked forward passes
/// never clone inputs or save intermediate values.
pub(crate) fn finish_op<B>(output: Tensor, inputs: &[&Tensor], backward_builder: B) -> Tensor
where
    B: FnOnce() -> Arc<dyn BackwardOp>,
{
    let requires_grad = is_grad_enabled() && inputs.iter().any(|t| t.requires_grad());
    if requires_grad {
        let grad_fn = backward_builder();
        let mut guard = output.write_data();
        guard.grad_fn = Some(grad_fn);
        guard.requires_grad = true;
    }
    output
}

/// Applies a unary element-wise kernel, dispatching on the tensor's data type.
///
/// Only computes the values; the caller attaches autograd metadata.
pub(crate) fn apply_unary_op<F32Op, F64Op>(a: &Tensor, op_f32: F32Op, op_f64: F64Op) -> Result<Tensor, MinigradError>
where
    F32Op: Fn(f32) -> f32,
    F64Op: Fn(f64) -> f64,
{
    let buffer = match &*a.buffer_arc() {
        Buffer::F32(data) => Buffer::F32(data.iter().map(|&x| op_f32(x)).collect()),
        Buffer::F64(data) => Buffer::F64(data.iter().map(|&x| op_f64(x)).collect()),
    };
    Tensor::from_buffer(buffer, a.shape())
}

/// Applies a binary element-wise kernel with NumPy-style broadcasting.
///
/// Fails fast on mismatched data types or incompatible shapes.
pub(crate) fn apply_binary_op<F32Op, F64Op>(
    a: &Tensor,
    b: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
    op_name: &str,
) -> Result<Tensor, MinigradError>
where
    F32Op: Fn(f32, f32) -> f32,
    F64Op: Fn(f64, f64) -> f64,
{
    check_same_dtype(a, b, op_name)?;
    let (a_shape, b_shape) = (a.shape(), b.shape());
    let output_shape = broadcast_shapes(&a_shape, &b_shape)?;

    let (a_buffer, b_buffer) = (a.buffer_arc(), b.buffer_arc());
    let buffer = match (&*a_buffer, &*b_buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => {
            Buffer::F32(broadcast_binary_kernel(x, &a_shape, y, &b_shape, &output_shape, op_f32))
        }
        (Buffer::F64(x), Buffer::F64(y)) => {
            Buffer::F64(broadcast_binary_kernel(x, &a_shape, y, &b_shape, &output_shape, op_f64))
        }
        _ => {
            return Err(MinigradError::InternalError(format!(
                "{}: buffer types diverge from tensor dtypes",
                op_name
            )))
        }
    };
    Tensor::from_buffer(buffer, output_shape)
}

#[cfg(test)]
#[path = "ops_test.rs"]
mod tests;
