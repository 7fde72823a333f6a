use crate::error::MinigradError;
use crate::ops::{activation, arithmetic, linalg, math_elem, reduction, view};
use crate::tensor::Tensor;

/// Method-call forms of the operations in [`crate::ops`].
impl Tensor {
    pub fn add(&self, other: &Tensor) -> Result<Tensor, MinigradError> {
        arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, MinigradError> {
        arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, MinigradError> {
        arithmetic::mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor) -> Result<Tensor, MinigradError> {
        arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, MinigradError> {
        arithmetic::neg_op(self)
    }

    pub fn pow_scalar(&self, exponent: f64) -> Result<Tensor, MinigradError> {
        arithmetic::pow_scalar_op(self, exponent)
    }

    pub fn exp(&self) -> Result<Tensor, MinigradError> {
        math_elem::exp_op(self)
    }

    pub fn ln(&self) -> Result<Tensor, MinigradError> {
        math_elem::ln_op(self)
    }

    pub fn relu(&self) -> Result<Tensor, MinigradError> {
        activation::relu_op(self)
    }

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, MinigradError> {
        linalg::matmul_op(self, other)
    }

    /// Transpose of a 2-D tensor.
    pub fn t(&self) -> Result<Tensor, MinigradError> {
        linalg::transpose_op(self)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Result<Tensor, MinigradError> {
        reduction::sum_op(self)
    }

    /// Mean of all elements.
    pub fn mean(&self) -> Result<Tensor, MinigradError> {
        reduction::mean_op(self)
    }

    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Tensor, MinigradError> {
        view::slice_rows(self, start, end)
    }
}
