use crate::buffer::Buffer;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(MinigradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(MinigradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(MinigradError),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}: {value}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
}

impl From<MinigradError> for GradCheckError {
    fn from(err: MinigradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// The scalar being differentiated is `sum(func(inputs) * output_grad)`, so the
/// analytical side is `func(inputs).backward(Some(output_grad))`. Every element
/// of every input that requires grad is perturbed by `±epsilon`; the two
/// estimates must agree within `tolerance`, either absolutely or relative to
/// the analytical value.
///
/// Works for both data types; perturbed values are computed in `f64` and
/// converted back to the input's type, so F32 checks need a coarser epsilon.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, MinigradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        if input.requires_grad() {
            input.clear_grad();
        }
    }

    // --- Analytical gradients ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    let any_input_requires_grad = inputs.iter().any(|t| t.requires_grad());
    if any_input_requires_grad != output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if output.requires_grad() {
        output
            .backward(Some(output_grad.clone()))
            .map_err(GradCheckError::BackwardPassError)?;
    }

    // --- Numerical gradients ---
    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical = original_input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .to_f64_vec();
        let original_values = original_input.to_f64_vec();

        for elem_idx in 0..original_values.len() {
            let loss_plus = perturbed_loss(&func, inputs, i, &original_values, elem_idx, epsilon, output_grad)?;
            let loss_minus = perturbed_loss(&func, inputs, i, &original_values, elem_idx, -epsilon, output_grad)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// Evaluates the weighted loss with one element of one input shifted by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    original_values: &[f64],
    elem_idx: usize,
    delta: f64,
    output_grad: &Tensor,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, MinigradError>,
{
    let original = &inputs[input_index];
    let mut values = original_values.to_vec();
    values[elem_idx] += delta;
    let perturbed = Tensor::from_buffer(Buffer::from_f64_vec(original.dtype(), values), original.shape())?;

    let mut shifted_inputs = inputs.to_vec();
    shifted_inputs[input_index] = perturbed;
    // The numerical side never needs a graph.
    let output = crate::autograd::no_grad(|| func(&shifted_inputs)).map_err(GradCheckError::ForwardPassError)?;
    calculate_loss(&output, output_grad)
}

/// `sum(output * output_grad)` computed directly in `f64`.
fn calculate_loss(output: &Tensor, output_grad: &Tensor) -> Result<f64, GradCheckError> {
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::TensorError(MinigradError::ShapeMismatch {
            expected: format!("{:?}", output.shape()),
            actual: format!("{:?}", output_grad.shape()),
            operation: "calculate_loss (grad_check)".to_string(),
        }));
    }
    let loss = output
        .to_f64_vec()
        .iter()
        .zip(output_grad.to_f64_vec())
        .map(|(o, g)| o * g)
        .sum();
    Ok(loss)
}
