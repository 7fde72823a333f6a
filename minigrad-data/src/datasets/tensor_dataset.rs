use super::traits::Dataset;
use minigrad_core::{MinigradError, Tensor};

/// A dataset composed of one or more tensors.
///
/// All tensors in a `TensorDataset` must have the same size in their first
/// dimension, which is treated as the sample dimension. `get(index)` returns one
/// `[1, ...]` row slice per tensor, in construction order.
///
/// The dataset holds detached handles: its values never take part in a
/// gradient computation.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    tensors: Vec<Tensor>,
    length: usize,
}

impl TensorDataset {
    /// Creates a new `TensorDataset` from a vector of tensors.
    ///
    /// If the vector of tensors is empty, the dataset has a length of 0.
    ///
    /// # Errors
    ///
    /// Returns `MinigradError::RankMismatch` if any tensor is a scalar (rank 0).
    /// Returns `MinigradError::ShapeMismatch` if tensors have inconsistent first
    /// dimension sizes.
    pub fn new(tensors: Vec<Tensor>) -> Result<Self, MinigradError> {
        let mut length = None;
        for (i, tensor) in tensors.iter().enumerate() {
            let rows = *tensor.shape().first().ok_or(MinigradError::RankMismatch {
                expected: 1,
                actual: 0,
            })?;
            match length {
                None => length = Some(rows),
                Some(expected) if expected != rows => {
                    return Err(MinigradError::ShapeMismatch {
                        expected: format!("First dimension of size {}", expected),
                        actual: format!("First dimension of size {} for tensor at index {}", rows, i),
                        operation: "TensorDataset::new".to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            tensors: tensors.iter().map(Tensor::detach).collect(),
            length: length.unwrap_or(0),
        })
    }

    /// Number of tensors making up each item.
    pub fn num_tensors(&self) -> usize {
        self.tensors.len()
    }

    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }
}

impl Dataset for TensorDataset {
    type Item = Vec<Tensor>;

    fn get(&self, index: usize) -> Result<Self::Item, MinigradError> {
        if index >= self.length {
            return Err(MinigradError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.length],
            });
        }
        self.tensors
            .iter()
            .map(|tensor| tensor.slice_rows(index, index + 1))
            .collect()
    }

    fn len(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
