use crate::error::MinigradError;
use crate::types::DType;

/// Typed, contiguous, row-major storage for tensor elements.
///
/// `TensorData` holds it behind an `Arc` so detached tensors can share the
/// same values without copying them.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Vec<f32>),
    /// Buffer holding f64 data.
    F64(Vec<f64>),
}

impl Buffer {
    /// Returns the data type of the stored elements.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    /// Returns the number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
        }
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get the underlying `f32` slice.
    ///
    /// Returns `DataTypeMismatch` if this is not an F32 buffer.
    pub fn try_get_f32(&self) -> Result<&[f32], MinigradError> {
        match self {
            Buffer::F32(data) => Ok(data),
            other => Err(MinigradError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get the underlying `f64` slice.
    ///
    /// Returns `DataTypeMismatch` if this is not an F64 buffer.
    pub fn try_get_f64(&self) -> Result<&[f64], MinigradError> {
        match self {
            Buffer::F64(data) => Ok(data),
            other => Err(MinigradError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_get_f64".to_string(),
            }),
        }
    }

    /// Creates a buffer of `len` elements all equal to `value`.
    pub fn full(dtype: DType, len: usize, value: f64) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(vec![value as f32; len]),
            DType::F64 => Buffer::F64(vec![value; len]),
        }
    }

    /// Copies the elements into a `Vec<f64>`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Buffer::F32(data) => data.iter().map(|&x| x as f64).collect(),
            Buffer::F64(data) => data.clone(),
        }
    }

    /// Builds a buffer of the requested type from `f64` values.
    pub fn from_f64_vec(dtype: DType, values: Vec<f64>) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(values.into_iter().map(|x| x as f32).collect()),
            DType::F64 => Buffer::F64(values),
        }
    }

    /// Element-wise sum of two buffers of identical type and length.
    pub(crate) fn add(&self, other: &Buffer) -> Result<Buffer, MinigradError> {
        if self.len() != other.len() {
            return Err(MinigradError::InternalError(format!(
                "Buffer length mismatch in add: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        match (self, other) {
            (Buffer::F32(a), Buffer::F32(b)) => {
                Ok(Buffer::F32(a.iter().zip(b).map(|(x, y)| x + y).collect()))
            }
            (Buffer::F64(a), Buffer::F64(b)) => {
                Ok(Buffer::F64(a.iter().zip(b).map(|(x, y)| x + y).collect()))
            }
            (a, b) => Err(MinigradError::DataTypeMismatch {
                expected: a.dtype(),
                actual: b.dtype(),
                operation: "buffer add".to_string(),
            }),
        }
    }
}

impl From<Vec<f32>> for Buffer {
    fn from(data: Vec<f32>) -> Self {
        Buffer::F32(data)
    }
}

impl From<Vec<f64>> for Buffer {
    fn from(data: Vec<f64>) -> Self {
        Buffer::F64(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_dtype_and_len() {
        let buffer = Buffer::from(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(buffer.dtype(), DType::F32);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.try_get_f64().is_err());
    }

    #[test]
    fn test_buffer_add_rejects_mixed_types() {
        let a = Buffer::from(vec![1.0f32]);
        let b = Buffer::from(vec![1.0f64]);
        assert!(matches!(
            a.add(&b),
            Err(MinigradError::DataTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_buffer_f64_round_trip() {
        let buffer = Buffer::from_f64_vec(DType::F32, vec![0.5, 1.5]);
        assert_eq!(buffer, Buffer::F32(vec![0.5, 1.5]));
        assert_eq!(buffer.to_f64_vec(), vec![0.5, 1.5]);
    }
}
