use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_mul_forward_broadcast_scalar() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let s = crate::tensor::scalar(2.0);
    check_tensor_near(&mul_op(&a, &s).unwrap(), &[2, 2], &[2.0, 4.0, 6.0, 8.0], 1e-6);
}

#[test]
fn test_mul_backward() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor_with_grad(vec![4.0, 5.0, 6.0], vec![3]);
    let result = mul_op(&a, &b).unwrap();
    result.backward(Some(Tensor::new(vec![1.0, 1.0, 1.0], vec![3]).unwrap())).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[3], &[4.0, 5.0, 6.0], 1e-6);
    check_tensor_near(&b.grad().unwrap(), &[3], &[1.0, 2.0, 3.0], 1e-6);
}

#[test]
fn test_mul_same_tensor_twice() {
    // d(x*x)/dx = 2x, both edges of the graph land on the same leaf.
    let x = create_test_tensor_with_grad(vec![3.0], vec![1]);
    let y = mul_op(&x, &x).unwrap();
    y.backward(None).unwrap();
    check_tensor_near(&x.grad().unwrap(), &[1], &[6.0], 1e-6);
}

#[test]
fn test_mul_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![1.5, -2.0, 0.5, 3.0, -1.0, 2.0], vec![2, 3]);
    let b = create_test_tensor_f64_with_grad(vec![0.7, -1.3], vec![2, 1]);
    let output_grad = Tensor::new_f64(vec![1.0, 0.5, -1.0, 2.0, 1.0, -0.5], vec![2, 3]).unwrap();
    check_grad(|inputs| mul_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-6, 1e-6)
        .expect("Mul gradient check failed");
}
