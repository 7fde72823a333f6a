use super::*;
use minigrad_core::tensor::create;

fn create_test_tensor(data: Vec<f32>, shape: &[usize]) -> Tensor {
    Tensor::new(data, shape.to_vec()).unwrap()
}

#[test]
fn test_tensor_dataset_new_empty() {
    let dataset = TensorDataset::new(vec![]).unwrap();
    assert_eq!(dataset.len(), 0);
    assert!(dataset.is_empty());
    assert_eq!(dataset.num_tensors(), 0);
}

#[test]
fn test_tensor_dataset_new_multiple_tensors_valid() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
    let t2 = create_test_tensor(vec![0.0, 1.0, 0.0], &[3, 1]);
    let dataset = TensorDataset::new(vec![t1, t2]).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.num_tensors(), 2);
}

#[test]
fn test_tensor_dataset_new_rank_mismatch_in_list() {
    let t1 = create_test_tensor(vec![1.0, 2.0], &[2, 1]);
    let t2 = create_test_tensor(vec![3.0], &[]);
    let err = TensorDataset::new(vec![t1, t2]).err().unwrap();
    match err {
        MinigradError::RankMismatch { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        _ => panic!("Expected RankMismatch error"),
    }
}

#[test]
fn test_tensor_dataset_new_first_dim_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let t2 = create_test_tensor(vec![1.0, 2.0, 3.0], &[3, 1]);
    let err = TensorDataset::new(vec![t1, t2]).err().unwrap();
    assert!(matches!(err, MinigradError::ShapeMismatch { .. }));
}

#[test]
fn test_tensor_dataset_get_returns_row_slices() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
    let t2 = Tensor::new_f64(vec![10.0, 20.0, 30.0], vec![3]).unwrap();
    let dataset = TensorDataset::new(vec![t1, t2]).unwrap();

    let item = dataset.get(1).unwrap();
    assert_eq!(item.len(), 2);
    assert_eq!(item[0].shape(), vec![1, 2]);
    assert_eq!(item[0].get_f32_data().unwrap(), vec![3.0, 4.0]);
    assert_eq!(item[1].shape(), vec![1]);
    assert_eq!(item[1].get_f64_data().unwrap(), vec![20.0]);
}

#[test]
fn test_tensor_dataset_get_out_of_bounds() {
    let t1 = create_test_tensor(vec![1.0, 2.0], &[2, 1]);
    let dataset = TensorDataset::new(vec![t1]).unwrap();
    match dataset.get(2) {
        Err(MinigradError::IndexOutOfBounds { index, shape }) => {
            assert_eq!(index, vec![2]);
            assert_eq!(shape, vec![2]);
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_tensor_dataset_detaches_tracked_inputs() {
    let tracked = create(vec![1.0, 2.0], vec![2, 1], true).unwrap();
    let dataset = TensorDataset::new(vec![tracked.clone()]).unwrap();
    let item = dataset.get(0).unwrap();
    assert!(!item[0].requires_grad());
    assert!(tracked.requires_grad(), "the caller's tensor is untouched");
    assert_eq!(dataset.tensors()[0].get_f32_data().unwrap(), vec![1.0, 2.0]);
}
