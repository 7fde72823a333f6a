use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_pow_scalar_forward_backward() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let result = pow_scalar_op(&a, 2.0).unwrap();
    check_tensor_near(&result, &[3], &[1.0, 4.0, 9.0], 1e-6);
    result.backward(Some(Tensor::new(vec![1.0, 1.0, 1.0], vec![3]).unwrap())).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[3], &[2.0, 4.0, 6.0], 1e-5);
}

#[test]
fn test_pow_scalar_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![0.5, 1.5, 2.0, 3.0], vec![4]);
    let output_grad = Tensor::new_f64(vec![1.0, -1.0, 0.5, 2.0], vec![4]).unwrap();
    check_grad(|inputs| pow_scalar_op(&inputs[0], 3.0), &[a.clone()], &output_grad, 1e-6, 1e-5)
        .expect("Pow gradient check (cube) failed");
    check_grad(|inputs| pow_scalar_op(&inputs[0], 0.5), &[a], &output_grad, 1e-6, 1e-5)
        .expect("Pow gradient check (sqrt) failed");
}
