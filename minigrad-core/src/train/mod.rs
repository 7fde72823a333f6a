//! The gradient-descent training loop.
//!
//! [`Trainer`] repeats forward, loss, backward, update and gradient reset over
//! the batches of a [`BatchSource`] for a fixed number of epochs.

pub mod trainer;

pub use trainer::{BatchSource, Trainer, TrainerConfig, TrainingReport};
