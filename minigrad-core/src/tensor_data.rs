// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the data buffer, shape, data type, and autograd-related
/// information. It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor`
/// struct to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying typed data buffer, shared by detached copies.
    pub(crate) buffer: Arc<Buffer>,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor. Empty for scalars.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Flag indicating if the tensor requires gradient computation.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient. Only ever populated when `requires_grad` is true;
    /// `None` until the first backward pass reaches this tensor.
    pub(crate) grad: Option<Tensor>,
    /// Set by gradient accumulation, cleared by `zero_grad`/`clear_grad`.
    /// A zero-filled `grad` with this flag unset holds no step information.
    pub(crate) grad_fresh: bool,
    /// The operation that produced this tensor. Leaf tensors have `None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from a buffer and shape.
    ///
    /// # Errors
    /// Returns `MinigradError::TensorCreationError` if the buffer length does not
    /// match the number of elements described by `shape`.
    pub fn new(buffer: Buffer, shape: Vec<usize>) -> Result<Self, MinigradError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(MinigradError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer: Arc::new(buffer),
            shape,
            requires_grad: false,
            grad: None,
            grad_fresh: false,
            grad_fn: None,
        })
    }

    /// Creates a leaf that shares an existing buffer (used by `detach`).
    pub(crate) fn sharing(buffer: Arc<Buffer>, shape: Vec<usize>) -> Self {
        TensorData {
            dtype: buffer.dtype(),
            buffer,
            shape,
            requires_grad: false,
            grad: None,
            grad_fresh: false,
            grad_fn: None,
        }
    }

    /// Provides immutable access to the underlying data buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// True if this tensor was not produced by a tracked operation.
    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}

impl Drop for TensorData {
    /// Releases the producing graph without recursing through it.
    ///
    /// Every node whose last handle is being released has its `grad_fn` moved
    /// onto a worklist before the node itself is freed, so dropping a chain of
    /// any depth runs in constant stack space. Nodes still referenced
    /// elsewhere are left intact.
    fn drop(&mut self) {
        let mut pending: Vec<Arc<dyn BackwardOp>> = self.grad_fn.take().into_iter().collect();
        while let Some(op) = pending.pop() {
            if Arc::strong_count(&op) > 1 {
                continue;
            }
            let inputs = op.inputs();
            drop(op);
            for mut input in inputs {
                if let Some(lock) = Arc::get_mut(&mut input.data) {
                    let data = match lock.get_mut() {
                        Ok(data) => data,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    pending.extend(data.grad_fn.take());
                }
            }
        }
    }
}
