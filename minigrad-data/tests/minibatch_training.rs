use approx::assert_abs_diff_eq;
use minigrad_core::nn::{Linear, MSELoss, Module};
use minigrad_core::optim::{Sgd, SgdConfig};
use minigrad_core::tensor::linspace;
use minigrad_core::train::{Trainer, TrainerConfig};
use minigrad_core::types::DType;
use minigrad_core::Tensor;
use minigrad_data::{DataLoader, RandomSampler, SequentialSampler, TensorDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn regression_dataset() -> TensorDataset {
    let xs = linspace(0.0, 1.0, 20).unwrap().get_f32_data().unwrap();
    let ys: Vec<f32> = xs.iter().map(|x| 2.0 * x + 0.7).collect();
    TensorDataset::new(vec![
        Tensor::new(xs, vec![20, 1]).unwrap(),
        Tensor::new(ys, vec![20, 1]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn shuffled_minibatches_converge() {
    let _ = env_logger::builder().is_test(true).try_init();
    let model = Linear::with_rng(1, 1, true, DType::F32, &mut StdRng::seed_from_u64(42)).unwrap();
    let loader = DataLoader::new(
        regression_dataset(),
        5,
        RandomSampler::with_seed(false, None, 1234),
        false,
    )
    .unwrap();
    let mut optimizer = Sgd::new(model.parameters(), SgdConfig::with_lr(0.1)).unwrap();
    let trainer = Trainer::new(TrainerConfig {
        epochs: 200,
        log_every: 50,
    })
    .unwrap();

    let report = trainer.fit(&model, &MSELoss::default(), &mut optimizer, &loader).unwrap();

    assert_eq!(report.epoch_losses.len(), 200);
    let w = model.weight().get_f32_data().unwrap()[0];
    let b = model.bias().unwrap().get_f32_data().unwrap()[0];
    assert_abs_diff_eq!(w, 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(b, 0.7, epsilon = 0.05);
}

#[test]
fn one_step_per_minibatch() {
    // Four batches per epoch: after one epoch the optimizer has stepped four
    // times, which moves the bias further than a single full-batch step would.
    let start = || {
        Linear::from_parameters(
            Tensor::new(vec![0.0], vec![1, 1]).unwrap(),
            Some(Tensor::new(vec![0.0], vec![1]).unwrap()),
        )
        .unwrap()
    };
    let one_epoch = TrainerConfig {
        epochs: 1,
        log_every: 0,
    };

    let batched = start();
    let loader = DataLoader::new(regression_dataset(), 5, SequentialSampler::new(), false).unwrap();
    let mut optimizer = Sgd::new(batched.parameters(), SgdConfig::with_lr(0.1)).unwrap();
    let report = Trainer::new(one_epoch.clone())
        .unwrap()
        .fit(&batched, &MSELoss::default(), &mut optimizer, &loader)
        .unwrap();
    assert_eq!(report.epoch_losses.len(), 1);

    let full = start();
    let (x, y) = {
        let dataset = regression_dataset();
        (dataset.tensors()[0].clone(), dataset.tensors()[1].clone())
    };
    let mut optimizer = Sgd::new(full.parameters(), SgdConfig::with_lr(0.1)).unwrap();
    Trainer::new(one_epoch)
        .unwrap()
        .fit(&full, &MSELoss::default(), &mut optimizer, &(x, y))
        .unwrap();

    let batched_bias = batched.bias().unwrap().get_f32_data().unwrap()[0];
    let full_bias = full.bias().unwrap().get_f32_data().unwrap()[0];
    assert!(batched_bias > full_bias);
}
