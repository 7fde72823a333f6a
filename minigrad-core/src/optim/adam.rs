use crate::error::MinigradError;
use crate::nn::parameter::Parameter;
use crate::optim::param_group::{ParamGroup, ParamGroupOptions};
use crate::optim::{snapshot_groups, validate_lr, validate_non_negative, write_param, Optimizer};
use crate::tensor::NodeId;
use log::debug;
use std::collections::HashMap;

/// Hyperparameters for [`Adam`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub betas: (f64, f64),
    pub eps: f64,
    pub weight_decay: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 1e-3,
            betas: (0.9, 0.999),
            eps: 1e-8,
            weight_decay: 0.0,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<(), MinigradError> {
        validate_lr(self.lr)?;
        let (beta1, beta2) = self.betas;
        if !(0.0..1.0).contains(&beta1) {
            return Err(MinigradError::InvalidConfig("Beta1 must be in [0, 1)".to_string()));
        }
        if !(0.0..1.0).contains(&beta2) {
            return Err(MinigradError::InvalidConfig("Beta2 must be in [0, 1)".to_string()));
        }
        if !(self.eps > 0.0) {
            return Err(MinigradError::InvalidConfig("Epsilon must be positive".to_string()));
        }
        validate_non_negative("weight_decay", self.weight_decay)
    }
}

/// Represents the state for a single parameter in the Adam optimizer.
#[derive(Debug, Clone)]
struct AdamParamState {
    step: i32,
    /// First moment (exponential moving average of gradients).
    m: Vec<f64>,
    /// Second moment (exponential moving average of squared gradients).
    v: Vec<f64>,
}

/// Adam optimizer with bias-corrected moment estimates and L2 weight decay.
#[derive(Debug)]
pub struct Adam {
    param_groups: Vec<ParamGroup>,
    defaults: AdamConfig,
    state: HashMap<NodeId, AdamParamState>,
}

impl Adam {
    pub fn new(params: Vec<Parameter>, config: AdamConfig) -> Result<Self, MinigradError> {
        config.validate()?;
        let mut optimizer = Adam {
            param_groups: Vec::new(),
            defaults: config,
            state: HashMap::new(),
        };
        optimizer.add_param_group(ParamGroup::new(params))?;
        Ok(optimizer)
    }

    fn group_config(&self, options: &ParamGroupOptions) -> AdamConfig {
        AdamConfig {
            lr: options.lr.unwrap_or(self.defaults.lr),
            betas: options.betas.unwrap_or(self.defaults.betas),
            eps: options.eps.unwrap_or(self.defaults.eps),
            weight_decay: options.weight_decay.unwrap_or(self.defaults.weight_decay),
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self) -> Result<(), MinigradError> {
        let snapshots = snapshot_groups(&self.param_groups)?;

        for (group, group_snapshots) in self.param_groups.iter().zip(snapshots) {
            let config = self.group_config(&group.options);
            let (beta1, beta2) = config.betas;

            for (param, snapshot) in group.params.iter().zip(group_snapshots) {
                let numel = snapshot.values.len();
                let state = self.state.entry(param.node_id()).or_insert_with(|| AdamParamState {
                    step: 0,
                    m: vec![0.0; numel],
                    v: vec![0.0; numel],
                });
                state.step += 1;
                let bias_correction1 = 1.0 - beta1.powi(state.step);
                let bias_correction2 = 1.0 - beta2.powi(state.step);

                let mut new_values = Vec::with_capacity(numel);
                for (i, (&p, &g)) in snapshot.values.iter().zip(&snapshot.grad).enumerate() {
                    let g = g + config.weight_decay * p;
                    state.m[i] = beta1 * state.m[i] + (1.0 - beta1) * g;
                    state.v[i] = beta2 * state.v[i] + (1.0 - beta2) * g * g;
                    let m_hat = state.m[i] / bias_correction1;
                    let v_hat = state.v[i] / bias_correction2;
                    new_values.push(p - config.lr * m_hat / (v_hat.sqrt() + config.eps));
                }
                write_param(param, new_values)?;
            }
        }
        debug!("Adam step complete ({} tracked state(s))", self.state.len());
        Ok(())
    }

    fn add_param_group(&mut self, mut param_group: ParamGroup) -> Result<(), MinigradError> {
        let config = self.group_config(&param_group.options);
        config.validate()?;
        param_group.options = ParamGroupOptions {
            lr: Some(config.lr),
            betas: Some(config.betas),
            eps: Some(config.eps),
            weight_decay: Some(config.weight_decay),
            ..param_group.options
        };
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
#[path = "adam_test.rs"]
mod tests;
