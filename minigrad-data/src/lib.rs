//! Datasets, samplers and a mini-batch data loader for minigrad.
//!
//! A [`DataLoader`] over a two-tensor [`TensorDataset`] plugs straight into
//! `minigrad_core::train::Trainer::fit` as its batch source.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::DataLoader;
pub use datasets::{Dataset, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
