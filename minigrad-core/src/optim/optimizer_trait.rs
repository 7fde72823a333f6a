use super::param_group::ParamGroup;
use crate::error::MinigradError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Reads the accumulated gradient and current value of every parameter
    /// and writes the new values in place.
    ///
    /// # Errors
    /// `NoGradient` if any parameter has no accumulated gradient (no backward
    /// pass since the last [`Optimizer::zero_grad`]). No parameter is modified
    /// in that case.
    fn step(&mut self) -> Result<(), MinigradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Gradients return to the uninitialized state, so the next `step` needs a
    /// fresh backward pass.
    fn zero_grad(&mut self) {
        for group in self.param_groups() {
            for param in &group.params {
                param.clear_grad();
            }
        }
    }

    /// Adds a new parameter group to the optimizer.
    ///
    /// Missing options are filled from the optimizer's defaults.
    ///
    /// # Errors
    /// `InvalidConfig` if an explicit option is out of range.
    fn add_param_group(&mut self, param_group: ParamGroup) -> Result<(), MinigradError>;

    /// Returns an immutable slice of the parameter groups managed by the optimizer.
    fn param_groups(&self) -> &[ParamGroup];

    /// Returns a mutable slice of the parameter groups, e.g. to change learning rates.
    fn param_groups_mut(&mut self) -> &mut [ParamGroup];
}
