use super::*;
use crate::autograd::grad_check::check_grad;
use crate::error::MinigradError;
use crate::utils::testing::{
    check_tensor_near, create_test_tensor, create_test_tensor_f64_with_grad, create_test_tensor_with_grad,
};

#[test]
fn test_add_tensors_ok() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let result = add_op(&t1, &t2).unwrap();
    check_tensor_near(&result, &[2, 2], &[6.0, 8.0, 10.0, 12.0], 1e-6);
    assert!(!result.requires_grad());
    assert!(result.is_leaf());
}

#[test]
fn test_add_broadcasting() {
    let matrix = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let row = create_test_tensor(vec![10.0, 20.0, 30.0], vec![3]);
    let result = add_op(&matrix, &row).unwrap();
    check_tensor_near(&result, &[2, 3], &[11.0, 22.0, 33.0, 14.0, 25.0, 36.0], 1e-6);
}

#[test]
fn test_add_tensors_shape_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0], vec![2, 3]);
    match add_op(&t1, &t2) {
        Err(MinigradError::BroadcastError { shape1, shape2 }) => {
            assert_eq!(shape1, vec![2, 2]);
            assert_eq!(shape2, vec![2, 3]);
        }
        other => panic!("Expected BroadcastError, got {:?}", other),
    }
}

#[test]
fn test_add_dtype_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = Tensor::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(matches!(
        add_op(&t1, &t2),
        Err(MinigradError::DataTypeMismatch { .. })
    ));
}

#[test]
fn test_add_backward_broadcast_reduces_gradient() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor_with_grad(vec![1.0, 1.0, 1.0], vec![1, 3]);
    let result = add_op(&a, &b).unwrap();
    assert!(result.requires_grad());
    assert!(!result.is_leaf());

    let seed = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    result.backward(Some(seed)).unwrap();

    check_tensor_near(&a.grad().unwrap(), &[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1e-6);
    check_tensor_near(&b.grad().unwrap(), &[1, 3], &[5.0, 7.0, 9.0], 1e-6);
}

#[test]
fn test_add_only_tracked_input_gets_gradient() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 4.0], vec![2]);
    let result = add_op(&a, &b).unwrap();
    result.backward(Some(Tensor::new(vec![1.0, 1.0], vec![2]).unwrap())).unwrap();
    assert!(a.grad().is_some());
    assert!(b.grad().is_none());
}

#[test]
fn test_add_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![0.3, -1.2, 2.5, 0.7, 1.1, -0.4], vec![2, 3]);
    let b = create_test_tensor_f64_with_grad(vec![0.5, -0.5, 1.5], vec![3]);
    let output_grad = Tensor::new_f64(vec![1.0, -2.0, 0.5, 3.0, 1.0, -1.0], vec![2, 3]).unwrap();
    check_grad(|inputs| add_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-6, 1e-6)
        .expect("Add gradient check failed");
}
