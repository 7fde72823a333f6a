use crate::error::MinigradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules.
///
/// A module maps an input tensor to an output tensor and owns a set of
/// learnable parameters, created at construction and updated in place by an
/// optimizer.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError>;

    /// Returns handles to all learnable parameters of the module.
    ///
    /// The handles share storage with the module's own parameters, so they can
    /// be handed to an optimizer.
    fn parameters(&self) -> Vec<Parameter>;

    /// Parameters with hierarchical names such as `"weight"` or `"bias"`.
    fn named_parameters(&self) -> Vec<(String, Parameter)>;

    /// Drops the accumulated gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }

    /// Total number of scalar parameters.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }
}
