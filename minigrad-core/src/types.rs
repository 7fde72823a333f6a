/// Defines the possible data types for Tensor elements.
///
/// Operations never convert between data types implicitly: combining an
/// `F32` tensor with an `F64` tensor is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
}

