use crate::nn::parameter::Parameter;

/// Defines a group of parameters with specific optimizer hyperparameters.
///
/// This allows applying different settings (like learning rate or weight decay)
/// to different parts of a model. Options left as `None` are filled from the
/// optimizer's configuration when the group is added.
#[derive(Clone, Debug)]
pub struct ParamGroup {
    /// Handles to the parameters; they share storage with the model.
    pub params: Vec<Parameter>,
    /// Specific options/hyperparameters for this group.
    pub options: ParamGroupOptions,
}

/// Options specific to a parameter group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamGroupOptions {
    pub lr: Option<f64>,
    pub weight_decay: Option<f64>,
    pub momentum: Option<f64>,
    pub nesterov: Option<bool>,
    pub betas: Option<(f64, f64)>,
    pub eps: Option<f64>,
}

impl ParamGroup {
    /// Creates a new parameter group with default options.
    pub fn new(params: Vec<Parameter>) -> Self {
        ParamGroup {
            params,
            options: ParamGroupOptions::default(),
        }
    }

    pub fn with_options(params: Vec<Parameter>, options: ParamGroupOptions) -> Self {
        ParamGroup { params, options }
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.options.lr = Some(lr);
    }

    pub fn lr(&self) -> Option<f64> {
        self.options.lr
    }
}
