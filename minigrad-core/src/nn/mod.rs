//! Neural-network building blocks: parameters, modules, layers and losses.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::linear::Linear;
pub use losses::{Loss, MSELoss, Reduction};
pub use module::Module;
pub use parameter::Parameter;
