use super::*;
use crate::error::MinigradError;

#[test]
fn test_parameter_enables_tracking() {
    let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(!t.requires_grad());
    let p = Parameter::new(t.clone(), Some("w".to_string())).unwrap();
    assert!(p.requires_grad());
    assert!(t.requires_grad(), "Parameter shares the node with the wrapped tensor");
    assert_eq!(p.name(), Some("w"));
    assert_eq!(p.label(), "w");
}

#[test]
fn test_parameter_clone_shares_storage() {
    let p = Parameter::new_unnamed(Tensor::new(vec![1.0], vec![1]).unwrap()).unwrap();
    let q = p.clone();
    assert_eq!(p.node_id(), q.node_id());
    q.backward(None).unwrap();
    assert!(p.grad().is_some());
    assert_eq!(p.label(), "<unnamed [1]>");
}

#[test]
fn test_parameter_rejects_non_leaf() {
    let x = crate::tensor::create(vec![1.0], vec![1], true).unwrap();
    let y = x.mul(&x).unwrap();
    assert!(matches!(
        Parameter::new_unnamed(y),
        Err(MinigradError::UnsupportedOperation(_))
    ));
}
