use crate::error::MinigradError;
use crate::optim::Optimizer;
use log::{debug, warn};

/// Adjusts the learning rates of an optimizer's parameter groups over the
/// course of training.
pub trait LRScheduler<O: Optimizer> {
    /// Advances the schedule by one epoch.
    ///
    /// Call it once per epoch, after the optimizer steps of that epoch.
    fn step(&mut self) -> Result<(), MinigradError>;

    /// Current learning rate of each parameter group, in group order.
    fn get_last_lr(&self) -> Vec<f64>;

    fn optimizer(&self) -> &O;

    fn optimizer_mut(&mut self) -> &mut O;
}

/// Decays the learning rate of each parameter group by `gamma` every
/// `step_size` epochs.
#[derive(Debug)]
pub struct StepLR<O: Optimizer> {
    optimizer: O,
    step_size: usize,
    gamma: f64,
    last_epoch: usize,
}

impl<O: Optimizer> StepLR<O> {
    /// Wraps `optimizer`.
    ///
    /// # Errors
    /// `InvalidConfig` if `step_size` is 0 or `gamma` is not positive.
    pub fn new(optimizer: O, step_size: usize, gamma: f64) -> Result<Self, MinigradError> {
        if step_size == 0 {
            return Err(MinigradError::InvalidConfig(
                "StepLR: step_size cannot be zero".to_string(),
            ));
        }
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(MinigradError::InvalidConfig(format!(
                "StepLR: gamma must be positive, got {}",
                gamma
            )));
        }
        if gamma >= 1.0 {
            warn!("StepLR with gamma = {} never decreases the learning rate", gamma);
        }
        Ok(StepLR {
            optimizer,
            step_size,
            gamma,
            last_epoch: 0,
        })
    }

    /// Number of calls to `step` so far.
    pub fn last_epoch(&self) -> usize {
        self.last_epoch
    }

    pub fn into_inner(self) -> O {
        self.optimizer
    }
}

impl<O: Optimizer> LRScheduler<O> for StepLR<O> {
    fn step(&mut self) -> Result<(), MinigradError> {
        self.last_epoch += 1;
        if self.last_epoch % self.step_size != 0 {
            return Ok(());
        }
        for group in self.optimizer.param_groups_mut() {
            let lr = group.lr().ok_or_else(|| {
                MinigradError::InternalError("parameter group has no learning rate".to_string())
            })?;
            group.set_lr(lr * self.gamma);
        }
        debug!("StepLR epoch {}: lr = {:?}", self.last_epoch, self.get_last_lr());
        Ok(())
    }

    fn get_last_lr(&self) -> Vec<f64> {
        self.optimizer
            .param_groups()
            .iter()
            .filter_map(|group| group.lr())
            .collect()
    }

    fn optimizer(&self) -> &O {
        &self.optimizer
    }

    fn optimizer_mut(&mut self) -> &mut O {
        &mut self.optimizer
    }
}
