use crate::autograd::{no_grad, BackwardOp};
use crate::error::MinigradError;
use crate::nn::losses::Loss;
use crate::ops::arithmetic::{mul_op, neg_op, sub_op};
use crate::ops::{apply_unary_op, check_same_dtype, finish_op};
use crate::tensor::Tensor;
use std::fmt::Debug;
use std::sync::Arc;

/// Specifies the reduction applied over the squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

/// Mean Squared Error between a prediction and a target of the same shape.
///
/// The loss is recorded as a single graph node whose backward applies the
/// closed-form derivative \( \frac{2}{N}(x - y) \) (or \( 2(x - y) \) for `Sum`).
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }
}

impl Loss for MSELoss {
    fn calculate(&self, prediction: &Tensor, target: &Tensor) -> Result<Tensor, MinigradError> {
        if prediction.shape() != target.shape() {
            return Err(MinigradError::ShapeMismatch {
                expected: format!("{:?}", target.shape()),
                actual: format!("{:?}", prediction.shape()),
                operation: "MSELoss calculate".to_string(),
            });
        }
        check_same_dtype(prediction, target, "MSELoss calculate")?;
        let numel = prediction.numel();
        if numel == 0 {
            return Err(MinigradError::UnsupportedOperation(
                "MSELoss of empty tensors".to_string(),
            ));
        }

        let loss = no_grad(|| {
            let diff = sub_op(prediction, target)?;
            let squared = mul_op(&diff, &diff)?;
            match self.reduction {
                Reduction::Mean => squared.mean(),
                Reduction::Sum => squared.sum(),
            }
        })?;

        let reduction = self.reduction;
        Ok(finish_op(loss, &[prediction, target], || {
            Arc::new(MSEBackward {
                prediction: prediction.clone(),
                target: target.clone(),
                reduction,
                numel,
            })
        }))
    }
}

#[derive(Debug)]
struct MSEBackward {
    prediction: Tensor,
    target: Tensor,
    reduction: Reduction,
    numel: usize,
}

impl BackwardOp for MSEBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, MinigradError> {
        let scale = match self.reduction {
            Reduction::Mean => 2.0 / self.numel as f64,
            Reduction::Sum => 2.0,
        };
        let diff = sub_op(&self.prediction, &self.target)?;
        let scaled = apply_unary_op(&diff, |d| d * scale as f32, |d| d * scale)?;
        let grad_prediction = mul_op(&scaled, grad_output)?;
        let grad_target = neg_op(&grad_prediction)?;
        Ok(vec![grad_prediction, grad_target])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.prediction.clone(), self.target.clone()]
    }

    fn name(&self) -> &'static str {
        "MSEBackward"
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
