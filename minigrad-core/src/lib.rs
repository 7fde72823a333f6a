//! Core of minigrad: tensors with reverse-mode automatic differentiation,
//! differentiable operations, neural-network building blocks, optimizers
//! and a gradient-descent training loop.

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod train;
pub mod types;
pub mod utils;

// Re-export the central types so they are reachable as `minigrad_core::Tensor`.
pub use buffer::Buffer;
pub use error::MinigradError;
pub use tensor::Tensor;
pub use types::DType;
// Re-export traits required by public functions/structs
pub use num_traits;
