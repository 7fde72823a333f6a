use crate::error::MinigradError;
use crate::nn::{Loss, Module};
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use log::{debug, info};

/// Settings for [`Trainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Number of passes over the batch source.
    pub epochs: usize,
    /// Log the epoch loss every `log_every` epochs (0 disables progress logs).
    pub log_every: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            epochs: 100,
            log_every: 10,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<(), MinigradError> {
        if self.epochs == 0 {
            return Err(MinigradError::InvalidConfig(
                "Trainer needs at least one epoch".to_string(),
            ));
        }
        Ok(())
    }
}

/// Anything that can hand out the `(input, target)` batches of one epoch.
pub trait BatchSource {
    /// Batches for epoch `epoch` (0-based). Sources that shuffle may return a
    /// different order each epoch.
    fn batches(&self, epoch: usize) -> Result<Vec<(Tensor, Tensor)>, MinigradError>;
}

/// A single `(inputs, targets)` pair is one full batch every epoch.
impl BatchSource for (Tensor, Tensor) {
    fn batches(&self, _epoch: usize) -> Result<Vec<(Tensor, Tensor)>, MinigradError> {
        Ok(vec![(self.0.clone(), self.1.clone())])
    }
}

/// Loss history of a [`Trainer::fit`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    /// Mean batch loss of each epoch, in order.
    pub epoch_losses: Vec<f64>,
}

impl TrainingReport {
    /// Loss of the last epoch, or `None` if no epoch ran.
    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}

/// Drives the training loop for a model, a loss and an optimizer.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Result<Self, MinigradError> {
        config.validate()?;
        Ok(Trainer { config })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Runs one forward/loss/backward/update/reset cycle on a batch and
    /// returns the batch loss.
    ///
    /// Gradients are cleared after the update, so every call starts from
    /// uninitialized gradients.
    pub fn train_step(
        &self,
        model: &dyn Module,
        loss_fn: &dyn Loss,
        optimizer: &mut dyn Optimizer,
        inputs: &Tensor,
        targets: &Tensor,
    ) -> Result<f64, MinigradError> {
        let predictions = model.forward(inputs)?;
        let loss = loss_fn.calculate(&predictions, targets)?;
        let loss_value = loss.item()?;
        loss.backward(None)?;
        optimizer.step()?;
        optimizer.zero_grad();
        Ok(loss_value)
    }

    /// Trains `model` for the configured number of epochs.
    ///
    /// Each batch is forwarded once and followed by one optimizer step. The
    /// trained values stay in the model's parameters.
    ///
    /// # Errors
    /// `InvalidConfig` if an epoch yields no batches; any error raised by the
    /// model, the loss, the backward pass or the optimizer.
    pub fn fit(
        &self,
        model: &dyn Module,
        loss_fn: &dyn Loss,
        optimizer: &mut dyn Optimizer,
        data: &dyn BatchSource,
    ) -> Result<TrainingReport, MinigradError> {
        let mut report = TrainingReport::default();
        info!(
            "Training {} parameter(s) for {} epoch(s)",
            model.num_parameters(),
            self.config.epochs
        );

        for epoch in 0..self.config.epochs {
            let batches = data.batches(epoch)?;
            if batches.is_empty() {
                return Err(MinigradError::InvalidConfig(format!(
                    "Batch source produced no batches for epoch {}",
                    epoch
                )));
            }
            let mut total = 0.0;
            for (inputs, targets) in &batches {
                total += self.train_step(model, loss_fn, optimizer, inputs, targets)?;
            }
            let epoch_loss = total / batches.len() as f64;
            debug!("Epoch {}: {} batch(es), loss {:.6}", epoch + 1, batches.len(), epoch_loss);
            if self.config.log_every > 0 && (epoch + 1) % self.config.log_every == 0 {
                info!("Epoch [{}/{}], Loss: {:.6}", epoch + 1, self.config.epochs, epoch_loss);
            }
            report.epoch_losses.push(epoch_loss);
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
