use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_mean_forward() {
    let a = Tensor::new_f64(vec![1.0, 2.0, 3.0, 6.0], vec![4]).unwrap();
    assert_eq!(mean_op(&a).unwrap().item_f64().unwrap(), 3.0);
}

#[test]
fn test_mean_backward() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    mean_op(&a).unwrap().backward(None).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[2, 2], &[0.25; 4], 1e-6);
}

#[test]
fn test_mean_empty_is_error() {
    let a = Tensor::new(vec![], vec![0]).unwrap();
    assert!(matches!(mean_op(&a), Err(MinigradError::UnsupportedOperation(_))));
}

#[test]
fn test_mean_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![0.5, -1.5, 2.0, 1.0, 0.0, 3.0], vec![3, 2]);
    let output_grad = crate::tensor::scalar_f64(-2.0);
    check_grad(|inputs| mean_op(&inputs[0]), &[a], &output_grad, 1e-6, 1e-6)
        .expect("Mean gradient check failed");
}
