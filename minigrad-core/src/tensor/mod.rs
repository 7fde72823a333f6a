// src/tensor/mod.rs

use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::fmt;
use std::sync::{Arc, RwLock};

mod autograd_methods;
mod ops_methods;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{
    create, create_f64, full, full_f64, linspace, linspace_f64, ones, ones_f64, ones_like, randn,
    randn_f64, scalar, scalar_f64, zeros, zeros_f64, zeros_like,
};

/// Stable identity of a tensor node in the computation graph.
///
/// Two `Tensor` handles have the same `NodeId` if and only if they point to
/// the same underlying `TensorData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Represents a multi-dimensional array (tensor) that can take part in
/// automatic differentiation.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Multiple `Tensor` handles can point to the same
///     node without copying the data (cheap clones).
/// 2.  **Interior Mutability:** Autograd metadata (`requires_grad`, `grad`) and
///     parameter values can be modified through a shared handle.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new F32 leaf tensor with the given data and shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, MinigradError> {
        Self::from_buffer(Buffer::F32(data_vec), shape)
    }

    /// Creates a new F64 leaf tensor with the given data and shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, MinigradError> {
        Self::from_buffer(Buffer::F64(data_vec), shape)
    }

    /// Creates a leaf tensor from an already typed buffer.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, MinigradError> {
        let tensor_data = TensorData::new(buffer, shape)?;
        Ok(Tensor::from_tensor_data(tensor_data))
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Identity of the underlying graph node.
    pub fn node_id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.data) as *const () as usize)
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Returns a shared handle to the current buffer.
    pub(crate) fn buffer_arc(&self) -> Arc<Buffer> {
        Arc::clone(&self.read_data().buffer)
    }

    /// Copies the tensor data out as a `Vec<f32>`.
    /// Returns an error if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, MinigradError> {
        let guard = self.read_data();
        Ok(guard.buffer.try_get_f32()?.to_vec())
    }

    /// Copies the tensor data out as a `Vec<f64>`.
    /// Returns an error if the tensor is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, MinigradError> {
        let guard = self.read_data();
        Ok(guard.buffer.try_get_f64()?.to_vec())
    }

    /// Copies the tensor data out as `f64` regardless of its data type.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.read_data().buffer.to_f64_vec()
    }

    /// Extracts the value of a single-element F32 tensor.
    pub fn item_f32(&self) -> Result<f32, MinigradError> {
        let data = self.get_f32_data()?;
        single_element(&data, &self.shape())
    }

    /// Extracts the value of a single-element F64 tensor.
    pub fn item_f64(&self) -> Result<f64, MinigradError> {
        let data = self.get_f64_data()?;
        single_element(&data, &self.shape())
    }

    /// Extracts the value of any single-element tensor, widened to `f64`.
    pub fn item(&self) -> Result<f64, MinigradError> {
        let data = self.to_f64_vec();
        single_element(&data, &self.shape())
    }

    /// Replaces the values of this tensor without touching its graph identity.
    ///
    /// Used by optimizers to update parameters in place. The new buffer must
    /// have the same data type and number of elements.
    pub(crate) fn replace_buffer(&self, buffer: Buffer) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        if buffer.dtype() != guard.dtype {
            return Err(MinigradError::DataTypeMismatch {
                expected: guard.dtype,
                actual: buffer.dtype(),
                operation: "replace_buffer".to_string(),
            });
        }
        if buffer.len() != guard.numel() {
            return Err(MinigradError::TensorCreationError {
                data_len: buffer.len(),
                shape: guard.shape.clone(),
            });
        }
        guard.buffer = Arc::new(buffer);
        Ok(())
    }
}

fn single_element<T: Copy>(data: &[T], shape: &[usize]) -> Result<T, MinigradError> {
    match data {
        [value] => Ok(*value),
        _ => Err(MinigradError::ShapeMismatch {
            expected: "a single-element tensor".to_string(),
            actual: format!("{:?}", shape),
            operation: "item".to_string(),
        }),
    }
}

impl Clone for Tensor {
    /// Cloning a tensor clones the handle, not the data.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("shape", &guard.shape)
            .field("dtype", &guard.dtype)
            .field("data", &guard.buffer)
            .field("requires_grad", &guard.requires_grad)
            .field("is_leaf", &guard.is_leaf())
            .finish()
    }
}

impl PartialEq for Tensor {
    /// Tensors compare equal when they hold the same values with the same shape.
    fn eq(&self, other: &Self) -> bool {
        if self.node_id() == other.node_id() {
            return true;
        }
        let a = self.read_data();
        let b = other.read_data();
        a.shape == b.shape && a.buffer == b.buffer
    }
}
