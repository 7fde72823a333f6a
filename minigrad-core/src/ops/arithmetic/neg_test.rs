use super::*;
use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};

#[test]
fn test_neg_forward_backward() {
    let a = create_test_tensor_with_grad(vec![1.0, -2.0, 3.0], vec![3]);
    let result = neg_op(&a).unwrap();
    check_tensor_near(&result, &[3], &[-1.0, 2.0, -3.0], 1e-6);
    result.backward(Some(Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap())).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[3], &[-1.0, -2.0, -3.0], 1e-6);
}
