use crate::error::MinigradError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a Tensor indicating it is a learnable parameter of a Module.
///
/// Parameters always have `requires_grad` set to `true`. Cloning a parameter
/// clones the handle, so a model and its optimizer observe the same values and
/// the same gradient storage.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Creates a new Parameter from a Tensor, turning gradient tracking on.
    ///
    /// # Errors
    /// `UnsupportedOperation` if `tensor` is the output of a tracked operation;
    /// parameters must be graph leaves.
    pub fn new(tensor: Tensor, name: Option<String>) -> Result<Self, MinigradError> {
        if !tensor.is_leaf() {
            return Err(MinigradError::UnsupportedOperation(
                "Parameter must wrap a leaf tensor; call detach() first".to_string(),
            ));
        }
        tensor.set_requires_grad(true)?;
        Ok(Parameter { tensor, name })
    }

    /// Creates an unnamed parameter.
    pub fn new_unnamed(tensor: Tensor) -> Result<Self, MinigradError> {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Label used in logs and errors: the name if set, otherwise the shape.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("<unnamed {:?}>", self.tensor.shape()),
        }
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("tensor", &self.tensor)
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
