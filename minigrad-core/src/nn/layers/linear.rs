use crate::error::MinigradError;
use crate::nn::init::fan_in_uniform;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::Rng;

/// Applies a linear transformation to the incoming data: `y = x Wᵀ + b`.
///
/// `weight` has shape `[out_features, in_features]`, `bias` has shape
/// `[out_features]`. Inputs are `[batch, in_features]`.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates an F32 layer initialized from the thread-local RNG.
    pub fn new(in_features: usize, out_features: usize, has_bias: bool) -> Result<Self, MinigradError> {
        Self::with_rng(in_features, out_features, has_bias, DType::F32, &mut rand::thread_rng())
    }

    /// Creates a layer with weights and bias drawn uniformly from
    /// `±1/sqrt(in_features)` using `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, MinigradError> {
        let weight = fan_in_uniform(&[out_features, in_features], in_features, dtype, rng)?;
        let bias = if has_bias {
            Some(fan_in_uniform(&[out_features], in_features, dtype, rng)?)
        } else {
            None
        };
        Self::from_parameters(weight, bias)
    }

    /// Builds a layer from explicit weight and bias values.
    ///
    /// # Errors
    /// `RankMismatch` if `weight` is not 2-D, `ShapeMismatch` if `bias` is not
    /// `[out_features]`, `DataTypeMismatch` if their data types differ.
    pub fn from_parameters(weight: Tensor, bias: Option<Tensor>) -> Result<Self, MinigradError> {
        let (out_features, in_features) = match weight.shape().as_slice() {
            [out_f, in_f] => (*out_f, *in_f),
            other => {
                return Err(MinigradError::RankMismatch {
                    expected: 2,
                    actual: other.len(),
                })
            }
        };
        let bias = match bias {
            Some(b) => {
                if b.shape() != [out_features] {
                    return Err(MinigradError::ShapeMismatch {
                        expected: format!("[{}]", out_features),
                        actual: format!("{:?}", b.shape()),
                        operation: "Linear bias".to_string(),
                    });
                }
                if b.dtype() != weight.dtype() {
                    return Err(MinigradError::DataTypeMismatch {
                        expected: weight.dtype(),
                        actual: b.dtype(),
                        operation: "Linear bias".to_string(),
                    });
                }
                Some(Parameter::new(b, Some("bias".to_string()))?)
            }
            None => None,
        };
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string()))?,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        let input_shape = input.shape();
        if input_shape.len() != 2 || input_shape[1] != self.in_features {
            return Err(MinigradError::ShapeMismatch {
                expected: format!("[_, {}]", self.in_features),
                actual: format!("{:?}", input_shape),
                operation: "Linear forward".to_string(),
            });
        }
        let output = input.matmul(&self.weight.t()?)?;
        match &self.bias {
            Some(bias) => output.add(bias),
            None => Ok(output),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.parameters()
            .into_iter()
            .map(|p| (p.label(), p))
            .collect()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
