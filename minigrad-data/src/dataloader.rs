//! # DataLoader
//!
//! Groups the items of a [`Dataset`] into mini-batches, in the order chosen by a
//! [`Sampler`].
//!
//! ```rust
//! use minigrad_core::Tensor;
//! use minigrad_data::{DataLoader, TensorDataset, SequentialSampler};
//!
//! let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5, 1]).unwrap();
//! let y = Tensor::new(vec![2.0, 4.0, 6.0, 8.0, 10.0], vec![5, 1]).unwrap();
//! let dataset = TensorDataset::new(vec![x, y]).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! let batches = loader.tensor_batches().unwrap();
//! assert_eq!(batches.len(), 3);
//! assert_eq!(batches[0][0].shape(), vec![2, 1]);
//! ```

use crate::datasets::{Dataset, TensorDataset};
use crate::samplers::Sampler;
use log::debug;
use minigrad_core::ops::view::cat_rows;
use minigrad_core::train::BatchSource;
use minigrad_core::{MinigradError, Tensor};

/// Batching and sampling over a dataset.
///
/// # Type parameters
/// - `D`: the dataset, implementing [`Dataset`].
/// - `S`: the sampler, implementing [`Sampler`].
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// If `drop_last` is true, a final batch smaller than `batch_size` is
    /// skipped.
    ///
    /// # Errors
    /// `InvalidConfig` if `batch_size` is 0.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, MinigradError> {
        if batch_size == 0 {
            return Err(MinigradError::InvalidConfig(
                "DataLoader batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    /// Number of batches in one pass over the dataset.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a new pass: the sampler is asked for a fresh index order.
    pub fn iter(&self) -> Batches<'_, D> {
        Batches {
            dataset: &self.dataset,
            batch_size: self.batch_size,
            drop_last: self.drop_last,
            indices: self.sampler.iter(self.dataset.len()),
        }
    }

    /// Collects all batches of one new pass.
    pub fn epoch_batches(&self) -> Result<Vec<Vec<D::Item>>, MinigradError> {
        self.iter().collect()
    }
}

impl<S: Sampler> DataLoader<TensorDataset, S> {
    /// One pass where each batch holds, per dataset tensor, its sampled rows
    /// concatenated into a single `[batch, ...]` tensor.
    pub fn tensor_batches(&self) -> Result<Vec<Vec<Tensor>>, MinigradError> {
        let num_tensors = self.dataset.num_tensors();
        let batches = self
            .iter()
            .map(|batch| collate_rows(batch?, num_tensors))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "DataLoader produced {} batch(es) of up to {} sample(s)",
            batches.len(),
            self.batch_size
        );
        Ok(batches)
    }
}

/// Feeds `(inputs, targets)` mini-batches to the training loop. The dataset
/// must hold exactly two tensors: inputs first, targets second.
impl<S: Sampler> BatchSource for DataLoader<TensorDataset, S> {
    fn batches(&self, _epoch: usize) -> Result<Vec<(Tensor, Tensor)>, MinigradError> {
        let num_tensors = self.dataset.num_tensors();
        if num_tensors != 2 {
            return Err(MinigradError::ArityMismatch {
                operation: "DataLoader as BatchSource".to_string(),
                expected: 2,
                actual: num_tensors,
            });
        }
        self.tensor_batches()?
            .into_iter()
            .map(|mut batch| {
                let targets = batch.pop();
                let inputs = batch.pop();
                match (inputs, targets) {
                    (Some(inputs), Some(targets)) => Ok((inputs, targets)),
                    _ => Err(MinigradError::InternalError(
                        "collated batch lost a tensor".to_string(),
                    )),
                }
            })
            .collect()
    }
}

fn collate_rows(items: Vec<Vec<Tensor>>, num_tensors: usize) -> Result<Vec<Tensor>, MinigradError> {
    (0..num_tensors)
        .map(|k| {
            let rows: Vec<Tensor> = items.iter().map(|item| item[k].clone()).collect();
            cat_rows(&rows)
        })
        .collect()
}

/// Iterator over the batches of one pass, returned by [`DataLoader::iter`].
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    batch_size: usize,
    drop_last: bool,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset> Iterator for Batches<'_, D> {
    type Item = Result<Vec<D::Item>, MinigradError>;

    /// - `Some(Ok(batch))`: the next batch.
    /// - `Some(Err(e))`: an item could not be fetched.
    /// - `None`: the pass is over.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        Some(Ok(batch))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
