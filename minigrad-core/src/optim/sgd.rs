use crate::error::MinigradError;
use crate::nn::parameter::Parameter;
use crate::optim::param_group::{ParamGroup, ParamGroupOptions};
use crate::optim::{snapshot_groups, validate_lr, validate_non_negative, write_param, Optimizer};
use crate::tensor::NodeId;
use log::debug;
use std::collections::HashMap;

/// Hyperparameters for [`Sgd`].
#[derive(Debug, Clone, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    pub momentum: f64,
    pub weight_decay: f64,
    pub nesterov: bool,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            lr: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        }
    }
}

impl SgdConfig {
    /// Plain gradient descent with the given learning rate.
    pub fn with_lr(lr: f64) -> Self {
        SgdConfig {
            lr,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), MinigradError> {
        validate_lr(self.lr)?;
        validate_non_negative("momentum", self.momentum)?;
        validate_non_negative("weight_decay", self.weight_decay)?;
        if self.nesterov && self.momentum == 0.0 {
            return Err(MinigradError::InvalidConfig(
                "Nesterov momentum requires a momentum > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stochastic Gradient Descent, with optional momentum, weight decay and
/// Nesterov momentum.
///
/// For each parameter \( p \) with gradient \( g \):
/// \[ g \leftarrow g + \lambda p \]
/// \[ b \leftarrow \mu b + g \quad (b = g \text{ on the first step}) \]
/// \[ p \leftarrow p - \eta \cdot (\text{nesterov} ? g + \mu b : b) \]
/// Without momentum the update is simply \( p \leftarrow p - \eta g \).
#[derive(Debug)]
pub struct Sgd {
    param_groups: Vec<ParamGroup>,
    defaults: SgdConfig,
    momentum_buffers: HashMap<NodeId, Vec<f64>>,
}

impl Sgd {
    /// Creates an optimizer over `params` as a single group.
    pub fn new(params: Vec<Parameter>, config: SgdConfig) -> Result<Self, MinigradError> {
        config.validate()?;
        let mut optimizer = Sgd {
            param_groups: Vec::new(),
            defaults: config,
            momentum_buffers: HashMap::new(),
        };
        optimizer.add_param_group(ParamGroup::new(params))?;
        Ok(optimizer)
    }

    fn resolve_options(&self, options: &ParamGroupOptions) -> Result<ParamGroupOptions, MinigradError> {
        let resolved = SgdConfig {
            lr: options.lr.unwrap_or(self.defaults.lr),
            momentum: options.momentum.unwrap_or(self.defaults.momentum),
            weight_decay: options.weight_decay.unwrap_or(self.defaults.weight_decay),
            nesterov: options.nesterov.unwrap_or(self.defaults.nesterov),
        };
        resolved.validate()?;
        Ok(ParamGroupOptions {
            lr: Some(resolved.lr),
            momentum: Some(resolved.momentum),
            weight_decay: Some(resolved.weight_decay),
            nesterov: Some(resolved.nesterov),
            ..options.clone()
        })
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), MinigradError> {
        let snapshots = snapshot_groups(&self.param_groups)?;
        let mut updated = 0;

        for (group, group_snapshots) in self.param_groups.iter().zip(snapshots) {
            let lr = group.options.lr.unwrap_or(self.defaults.lr);
            let momentum = group.options.momentum.unwrap_or(self.defaults.momentum);
            let weight_decay = group.options.weight_decay.unwrap_or(self.defaults.weight_decay);
            let nesterov = group.options.nesterov.unwrap_or(self.defaults.nesterov);

            for (param, snapshot) in group.params.iter().zip(group_snapshots) {
                let mut direction: Vec<f64> = snapshot
                    .grad
                    .iter()
                    .zip(&snapshot.values)
                    .map(|(g, p)| g + weight_decay * p)
                    .collect();

                if momentum != 0.0 {
                    let buffer = self
                        .momentum_buffers
                        .entry(param.node_id())
                        .and_modify(|buffer| {
                            for (b, d) in buffer.iter_mut().zip(&direction) {
                                *b = momentum * *b + d;
                            }
                        })
                        .or_insert_with(|| direction.clone());
                    if nesterov {
                        for (d, b) in direction.iter_mut().zip(buffer.iter()) {
                            *d += momentum * b;
                        }
                    } else {
                        direction.clone_from(buffer);
                    }
                }

                let new_values = snapshot
                    .values
                    .iter()
                    .zip(&direction)
                    .map(|(p, d)| p - lr * d)
                    .collect();
                write_param(param, new_values)?;
                updated += 1;
            }
        }
        debug!("SGD step updated {} parameter(s)", updated);
        Ok(())
    }

    fn add_param_group(&mut self, mut param_group: ParamGroup) -> Result<(), MinigradError> {
        param_group.options = self.resolve_options(&param_group.options)?;
        self.param_groups.push(param_group);
        Ok(())
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.param_groups
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        &mut self.param_groups
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
