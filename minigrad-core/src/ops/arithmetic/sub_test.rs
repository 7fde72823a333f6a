use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_sub_forward() {
    let a = create_test_tensor(vec![5.0, 7.0, 9.0], vec![3]);
    let b = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    check_tensor_near(&sub_op(&a, &b).unwrap(), &[3], &[4.0, 5.0, 6.0], 1e-6);
}

#[test]
fn test_sub_backward_negates_second_input() {
    let a = create_test_tensor_with_grad(vec![5.0, 7.0], vec![2]);
    let b = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let result = sub_op(&a, &b).unwrap();
    result.backward(Some(Tensor::new(vec![1.0, 3.0], vec![2]).unwrap())).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[2], &[1.0, 3.0], 1e-6);
    check_tensor_near(&b.grad().unwrap(), &[1], &[-4.0], 1e-6);
}

#[test]
fn test_sub_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![1.0, -2.0, 0.5, 4.0], vec![2, 2]);
    let b = create_test_tensor_f64_with_grad(vec![0.25, -0.75], vec![2, 1]);
    let output_grad = Tensor::new_f64(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2]).unwrap();
    check_grad(|inputs| sub_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-6, 1e-6)
        .expect("Sub gradient check failed");
}
