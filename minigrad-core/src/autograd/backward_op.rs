use crate::error::MinigradError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` (a tensor resulting from an operation
/// on inputs that require gradients) has an associated `BackwardOp` implementation.
/// This implementation is stored in the output tensor's `grad_fn` field and is used
/// during the `backward()` call to propagate gradients according to the chain rule.
///
/// The trait requires `Debug + Send + Sync` because the `Arc<dyn BackwardOp>` holding
/// the state is shared by every handle to the output tensor.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs with respect to the loss,
    /// given the gradient of the operation's output with respect to the loss.
    ///
    /// If the operation is \( \text{Output} = f(\text{Input}_1, ..., \text{Input}_n) \),
    /// this method computes
    /// \[ \frac{dL}{d\text{Input}_i} = \frac{dL}{d\text{Output}} \cdot \frac{d\text{Output}}{d\text{Input}_i} \]
    ///
    /// # Arguments
    /// * `grad_output`: the gradient flowing into the output node (dL/dOutput). It has
    ///   the same shape and data type as the operation's output.
    ///
    /// # Returns
    /// One gradient per input, in the order returned by [`BackwardOp::inputs`], each with
    /// the shape of its input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError>;

    /// Returns the input tensors that participated in the forward operation.
    ///
    /// These are the edges of the computation graph followed during the backward pass.
    fn inputs(&self) -> Vec<Tensor>;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;
}
