use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_f64_with_grad, create_test_tensor_with_grad};

#[test]
fn test_matmul_forward() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]);
    let c = matmul_op(&a, &b).unwrap();
    check_tensor_near(&c, &[2, 2], &[58.0, 64.0, 139.0, 154.0], 1e-5);
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let a = create_test_tensor(vec![1.0; 6], vec![2, 3]);
    let b = create_test_tensor(vec![1.0; 4], vec![2, 2]);
    assert!(matches!(
        matmul_op(&a, &b),
        Err(MinigradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_matmul_requires_rank_two() {
    let a = create_test_tensor(vec![1.0; 3], vec![3]);
    let b = create_test_tensor(vec![1.0; 3], vec![3, 1]);
    assert_eq!(
        matmul_op(&a, &b).err(),
        Some(MinigradError::RankMismatch { expected: 2, actual: 1 })
    );
}

#[test]
fn test_matmul_backward() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = create_test_tensor_with_grad(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let c = matmul_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap())).unwrap();
    // G Bᵀ with G = ones: row sums of B
    check_tensor_near(&a.grad().unwrap(), &[2, 2], &[11.0, 15.0, 11.0, 15.0], 1e-5);
    // Aᵀ G: column sums of A
    check_tensor_near(&b.grad().unwrap(), &[2, 2], &[4.0, 4.0, 6.0, 6.0], 1e-5);
}

#[test]
fn test_matmul_grad_check() {
    let a = create_test_tensor_f64_with_grad(vec![0.5, -1.0, 2.0, 1.5, 0.25, -0.75], vec![3, 2]);
    let b = create_test_tensor_f64_with_grad(vec![1.0, 2.0, -1.0, 0.5, -0.5, 3.0, 1.0, -2.0], vec![2, 4]);
    let output_grad = Tensor::new_f64((0..12).map(|i| (i as f64 - 6.0) * 0.25).collect(), vec![3, 4]).unwrap();
    check_grad(|inputs| matmul_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-6, 1e-5)
        .expect("Matmul gradient check failed");
}
