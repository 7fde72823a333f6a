use crate::tensor::Tensor;

/// Checks that `actual` has `expected_shape` and values within `tolerance` of
/// `expected_data`. Works for both data types (values are compared in `f64`).
///
/// Panics with the first mismatching index otherwise.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    let actual_data = actual.to_f64_vec();
    assert_eq!(actual_data.len(), expected_data.len(), "Data length mismatch");

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

#[cfg(test)]
/// Helper to create a simple f32 tensor for testing purposes.
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

#[cfg(test)]
/// Helper to create a simple f32 tensor that requires gradient for testing.
pub(crate) fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    crate::tensor::create(data, shape, true).expect("Failed to create test tensor with grad")
}

#[cfg(test)]
/// F64 leaf tracking gradients, used by gradient checks.
pub(crate) fn create_test_tensor_f64_with_grad(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    crate::tensor::create_f64(data, shape, true).expect("Failed to create f64 test tensor with grad")
}
