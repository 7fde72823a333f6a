use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_div_forward() {
    let a = create_test_tensor(vec![6.0, 8.0], vec![2]);
    let b = create_test_tensor(vec![2.0, 4.0], vec![2]);
    check_tensor_near(&div_op(&a, &b).unwrap(), &[2], &[3.0, 2.0], 1e-6);
}

#[test]
fn test_div_backward() {
    let a = create_test_tensor_with_grad(vec![6.0], vec![1]);
    let b = create_test_tensor_with_grad(vec![2.0], vec![1]);
    div_op(&a, &b).unwrap().backward(None).unwrap();
    // d(a/b)/da = 1/b, d(a/b)/db = -a/b^2
    check_tensor_near(&a.grad().unwrap(), &[1], &[0.5], 1e-6);
    check_tensor_near(&b.grad().unwrap(), &[1], &[-1.5], 1e-6);
}

#[test]
fn test_div_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![1.0, -2.0, 3.0, 0.5], vec![2, 2]);
    let b = create_test_tensor_f64_with_grad(vec![1.5, -2.5], vec![2]);
    let output_grad = Tensor::new_f64(vec![1.0, 1.0, -0.5, 2.0], vec![2, 2]).unwrap();
    check_grad(|inputs| div_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-6, 1e-6)
        .expect("Div gradient check failed");
}
