//! Optimizers for training neural networks.
//!
//! This module provides the [`Optimizer`] trait, [`ParamGroup`] for per-group
//! hyperparameters, the [`Sgd`] and [`Adam`] update rules and the [`StepLR`]
//! learning-rate scheduler.
//!
//! Every optimizer reads all gradients before it writes any parameter: if one
//! tracked parameter has no gradient, `step` fails with `NoGradient` and the
//! whole model is left untouched.

pub mod adam;
pub mod lr_scheduler;
pub mod optimizer_trait;
pub mod param_group;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use lr_scheduler::{LRScheduler, StepLR};
pub use optimizer_trait::Optimizer;
pub use param_group::{ParamGroup, ParamGroupOptions};
pub use sgd::{Sgd, SgdConfig};

use crate::autograd::no_grad;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::nn::Parameter;

/// Current value and gradient of one parameter, widened to `f64`.
pub(crate) struct ParamSnapshot {
    pub(crate) values: Vec<f64>,
    pub(crate) grad: Vec<f64>,
}

/// Reads every parameter's value and gradient, group by group.
///
/// # Errors
/// `NoGradient` naming the first parameter without an accumulated gradient.
/// A gradient that was zeroed and not accumulated into since counts as absent.
pub(crate) fn snapshot_groups(groups: &[ParamGroup]) -> Result<Vec<Vec<ParamSnapshot>>, MinigradError> {
    groups
        .iter()
        .map(|group| group.params.iter().map(snapshot).collect::<Result<Vec<_>, _>>())
        .collect()
}

fn snapshot(param: &Parameter) -> Result<ParamSnapshot, MinigradError> {
    let grad = param
        .grad()
        .filter(|_| param.has_fresh_grad())
        .ok_or_else(|| MinigradError::NoGradient {
            parameter: param.label(),
        })?;
    Ok(ParamSnapshot {
        values: param.to_f64_vec(),
        grad: grad.to_f64_vec(),
    })
}

/// Writes `values` into `param` in place, keeping its identity and data type.
pub(crate) fn write_param(param: &Parameter, values: Vec<f64>) -> Result<(), MinigradError> {
    no_grad(|| param.replace_buffer(Buffer::from_f64_vec(param.dtype(), values)))
}

/// Fails with `InvalidConfig` unless `lr` is finite and positive.
pub(crate) fn validate_lr(lr: f64) -> Result<(), MinigradError> {
    if !(lr.is_finite() && lr > 0.0) {
        return Err(MinigradError::InvalidConfig(format!(
            "learning rate must be positive and finite, got {}",
            lr
        )));
    }
    Ok(())
}

/// Fails with `InvalidConfig` unless `value` is finite and non-negative.
pub(crate) fn validate_non_negative(name: &str, value: f64) -> Result<(), MinigradError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(MinigradError::InvalidConfig(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}
