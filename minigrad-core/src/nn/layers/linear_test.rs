use super::*;
use crate::autograd::grad_check::check_grad;
use crate::error::MinigradError;
use crate::utils::testing::check_tensor_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_layer() -> Linear {
    let weight = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let bias = Tensor::new(vec![0.5, -0.5], vec![2]).unwrap();
    Linear::from_parameters(weight, Some(bias)).unwrap()
}

#[test]
fn test_linear_forward() {
    let layer = fixed_layer();
    let input = Tensor::new(vec![1.0, 0.0, -1.0, 2.0, 1.0, 0.0], vec![2, 3]).unwrap();
    let output = layer.forward(&input).unwrap();
    // Row 1: [1-3, 4-6] + b, row 2: [2+2, 8+5] + b
    check_tensor_near(&output, &[2, 2], &[-1.5, -2.5, 4.5, 12.5], 1e-6);
}

#[test]
fn test_linear_backward_populates_parameter_grads() {
    let layer = fixed_layer();
    let input = Tensor::new(vec![1.0, 0.0, -1.0, 2.0, 1.0, 0.0], vec![2, 3]).unwrap();
    let loss = layer.forward(&input).unwrap().sum().unwrap();
    loss.backward(None).unwrap();

    // dL/dW = onesᵀ X, identical rows holding the column sums of X.
    check_tensor_near(&layer.weight().grad().unwrap(), &[2, 3], &[3.0, 1.0, -1.0, 3.0, 1.0, -1.0], 1e-6);
    check_tensor_near(&layer.bias().unwrap().grad().unwrap(), &[2], &[2.0, 2.0], 1e-6);
    assert!(input.grad().is_none());
}

#[test]
fn test_linear_rejects_wrong_input_width() {
    let layer = fixed_layer();
    let input = Tensor::new(vec![1.0, 2.0], vec![1, 2]).unwrap();
    assert!(matches!(layer.forward(&input), Err(MinigradError::ShapeMismatch { .. })));
}

#[test]
fn test_linear_parameters_and_names() {
    let mut rng = StdRng::seed_from_u64(3);
    let layer = Linear::with_rng(4, 2, true, DType::F64, &mut rng).unwrap();
    assert_eq!(layer.parameters().len(), 2);
    assert_eq!(layer.num_parameters(), 10);
    let names: Vec<String> = layer.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["weight".to_string(), "bias".to_string()]);
    assert_eq!(layer.weight().dtype(), DType::F64);

    let no_bias = Linear::with_rng(4, 2, false, DType::F32, &mut rng).unwrap();
    assert!(no_bias.bias().is_none());
    assert_eq!(no_bias.parameters().len(), 1);
}

#[test]
fn test_linear_from_parameters_validates_bias() {
    let weight = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    let bad_bias = Tensor::new(vec![1.0; 3], vec![3]).unwrap();
    assert!(matches!(
        Linear::from_parameters(weight, Some(bad_bias)),
        Err(MinigradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_module_zero_grad_clears() {
    let layer = fixed_layer();
    let input = Tensor::new(vec![1.0, 1.0, 1.0], vec![1, 3]).unwrap();
    layer.forward(&input).unwrap().sum().unwrap().backward(None).unwrap();
    layer.zero_grad();
    assert!(layer.parameters().iter().all(|p| p.grad().is_none()));
}

#[test]
fn test_linear_grad_check() {
    let mut rng = StdRng::seed_from_u64(11);
    let layer = Linear::with_rng(3, 2, true, DType::F64, &mut rng).unwrap();
    let weight = layer.weight().tensor().clone();
    let bias = layer.bias().unwrap().tensor().clone();
    let input = Tensor::new_f64(vec![0.5, -1.0, 2.0, 1.5, 0.0, -0.5], vec![2, 3]).unwrap();
    let output_grad = Tensor::new_f64(vec![1.0, -1.0, 0.5, 2.0], vec![2, 2]).unwrap();
    check_grad(
        |inputs| {
            let layer = Linear::from_parameters(inputs[0].clone(), Some(inputs[1].clone()))?;
            layer.forward(&inputs[2])
        },
        &[weight, bias, input],
        &output_grad,
        1e-6,
        1e-5,
    )
    .expect("Linear gradient check failed");
}
