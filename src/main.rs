//! Trains a feed-forward classifier on MNIST (or a synthetic blob dataset)
//! with mini-batch gradient descent, delegating tensors, autodiff and the
//! optimizer to `burn`.
//!
//! # Usage
//! Runnable via
//! ```sh
//! cargo run -- -h
//! cargo run -- --dataset mnist
//! ```
//!
//! Supports custom learning rate, momentum, batch size, hidden layer widths
//! and either of the two loss code paths (raw logits or log-probabilities).

use std::sync::Arc;

use burn::{
    backend::{Autodiff, NdArray, ndarray::NdArrayDevice},
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::vision::MnistDataset,
    },
    optim::{SgdConfig, momentum::MomentumConfig},
    tensor::backend::Backend,
};
use clap::Parser;

use mnist_mlp::{
    data::{FeatureBatch, FeatureBatcher},
    datasets::{self, DatasetKind},
    loss::LossKind,
    model::MlpConfig,
    plot::{plot_loss_curve, plot_probabilities},
    train::{self, TrainSettings},
};

type TrainingBackend = Autodiff<NdArray<f32>>;

const MNIST_FEATURES: usize = 784;
const MNIST_CLASSES: usize = 10;

#[derive(Parser)]
struct Args {
    #[clap(short, long, default_value_t = DatasetKind::Blobs)]
    dataset: DatasetKind,
    /// Samples per class for the synthetic dataset
    #[clap(short, long, default_value_t = 500)]
    class_size: usize,
    #[clap(short, long, default_value_t = 64)]
    batch_size: usize,
    #[clap(short, long, default_value_t = 10)]
    epochs: usize,
    #[clap(short, long, default_value_t = 0.01)]
    lr: f64,
    #[clap(short, long, default_value_t = 0.0)]
    momentum: f64,
    #[clap(long, default_value_t = LossKind::Logits)]
    loss: LossKind,
    #[clap(long, default_value_t = 128)]
    hidden1: usize,
    #[clap(long, default_value_t = 64)]
    hidden2: usize,
    #[clap(short, long, default_value_t = 42)]
    seed: u64,
    #[clap(short, long, default_value_t = format!("output"))]
    output_dir: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let device = NdArrayDevice::Cpu;
    TrainingBackend::seed(args.seed);
    std::fs::create_dir_all(&args.output_dir).unwrap();

    match args.dataset {
        DatasetKind::Mnist => {
            let batcher = FeatureBatcher::<TrainingBackend>::new(device);
            let loader = DataLoaderBuilder::new(batcher)
                .batch_size(args.batch_size)
                .shuffle(args.seed)
                .build(MnistDataset::train());
            run(loader, MNIST_FEATURES, MNIST_CLASSES, &args);
        }
        DatasetKind::Blobs => {
            let items = datasets::gen_blob_data(args.class_size, args.seed);
            let dataset = datasets::in_memory_dataset(items).unwrap();
            let batcher = FeatureBatcher::<TrainingBackend>::new(device);
            let loader = DataLoaderBuilder::new(batcher)
                .batch_size(args.batch_size)
                .shuffle(args.seed)
                .build(dataset);
            run(
                loader,
                datasets::BLOB_FEATURES,
                datasets::BLOB_CLASSES,
                &args,
            );
        }
    }
}

fn run(
    loader: Arc<dyn DataLoader<FeatureBatch<TrainingBackend>>>,
    num_inputs: usize,
    num_classes: usize,
    args: &Args,
) {
    let device = NdArrayDevice::Cpu;
    let model = MlpConfig::new(num_inputs, num_classes)
        .with_hidden1(args.hidden1)
        .with_hidden2(args.hidden2)
        .init::<TrainingBackend>(&device);

    let mut sgd = SgdConfig::new();
    if args.momentum > 0.0 {
        sgd = sgd.with_momentum(Some(MomentumConfig::new().with_momentum(args.momentum)));
    }
    let mut optim = sgd.init();

    let settings = TrainSettings {
        epochs: args.epochs,
        lr: args.lr,
        loss: args.loss,
    };
    let report = train::fit(model, loader.clone(), &mut optim, &settings).unwrap();

    plot_loss_curve(
        &report.epoch_losses,
        &format!("{}/loss_{}.png", args.output_dir, args.dataset),
    )
    .unwrap();

    // Render the trained model's class distribution for one held sample
    let batch = loader.iter().next().unwrap();
    let probs = report
        .model
        .probabilities(batch.images.slice([0..1]))
        .unwrap();
    let probs = probs.into_data().to_vec::<f32>().unwrap();
    plot_probabilities(
        &probs,
        &format!("{}/probabilities_{}.png", args.output_dir, args.dataset),
    )
    .unwrap();
}
