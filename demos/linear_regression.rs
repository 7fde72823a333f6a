//! # Linear regression with mini-batch SGD
//!
//! Fits `Y = 2X + 0.7` on `X = linspace(0, 1, 20)` with a single `Linear(1, 1)`
//! layer, a mean squared error loss and plain SGD over shuffled mini-batches.
//!
//! ## Running
//! `RUST_LOG=info cargo run -p minigrad-data --example linear_regression`

use log::info;
use minigrad_core::nn::{Linear, MSELoss, Module};
use minigrad_core::optim::{Sgd, SgdConfig};
use minigrad_core::tensor::linspace;
use minigrad_core::train::{Trainer, TrainerConfig};
use minigrad_core::types::DType;
use minigrad_core::{MinigradError, Tensor};
use minigrad_data::{DataLoader, RandomSampler, TensorDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TRUE_WEIGHT: f32 = 2.0;
const TRUE_BIAS: f32 = 0.7;

fn main() -> Result<(), MinigradError> {
    env_logger::init();

    let xs = linspace(0.0, 1.0, 20)?.get_f32_data()?;
    let ys: Vec<f32> = xs.iter().map(|x| TRUE_WEIGHT * x + TRUE_BIAS).collect();
    let dataset = TensorDataset::new(vec![Tensor::new(xs, vec![20, 1])?, Tensor::new(ys, vec![20, 1])?])?;
    let loader = DataLoader::new(dataset, 5, RandomSampler::with_seed(false, None, 0), false)?;

    let model = Linear::with_rng(1, 1, true, DType::F32, &mut StdRng::seed_from_u64(42))?;
    let mut optimizer = Sgd::new(model.parameters(), SgdConfig::with_lr(0.1))?;
    let trainer = Trainer::new(TrainerConfig {
        epochs: 200,
        log_every: 20,
    })?;

    let report = trainer.fit(&model, &MSELoss::default(), &mut optimizer, &loader)?;

    for (name, param) in model.named_parameters() {
        info!("{} = {:?}", name, param.to_f64_vec());
    }
    println!(
        "Final loss: {:.6}",
        report.final_loss().unwrap_or(f64::NAN)
    );
    println!(
        "Learned w = {:.4} (true {}), b = {:.4} (true {})",
        model.weight().item()?,
        TRUE_WEIGHT,
        model.bias().map(|b| b.item()).transpose()?.unwrap_or(0.0),
        TRUE_BIAS
    );
    Ok(())
}
