use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_ln_forward() {
    let a = Tensor::new(vec![1.0, std::f32::consts::E], vec![2]).unwrap();
    check_tensor_near(&ln_op(&a).unwrap(), &[2], &[0.0, 1.0], 1e-6);
}

#[test]
fn test_ln_non_positive_is_not_finite() {
    let a = Tensor::new(vec![0.0, -1.0], vec![2]).unwrap();
    let data = ln_op(&a).unwrap().get_f32_data().unwrap();
    assert_eq!(data[0], f32::NEG_INFINITY);
    assert!(data[1].is_nan());
}

#[test]
fn test_ln_backward() {
    let a = create_test_tensor_with_grad(vec![2.0, 4.0], vec![2]);
    ln_op(&a).unwrap().backward(Some(Tensor::new(vec![1.0, 1.0], vec![2]).unwrap())).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[2], &[0.5, 0.25], 1e-6);
}

#[test]
fn test_ln_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![0.5, 1.0, 2.0, 5.0], vec![4]);
    let output_grad = Tensor::new_f64(vec![1.0, -1.0, 2.0, 0.5], vec![4]).unwrap();
    check_grad(|inputs| ln_op(&inputs[0]), &[a], &output_grad, 1e-6, 1e-5)
        .expect("Ln gradient check failed");
}
