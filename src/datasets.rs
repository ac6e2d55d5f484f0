//! Synthetic classification datasets and the dataset selector
//!
//! MNIST itself is supplied by `burn`'s vision dataset source; this module
//! only generates small in-memory datasets useful for smoke runs and tests.

use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use burn::data::dataset::InMemDataset;
use clap::ValueEnum;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;
use thiserror::Error;

/// Errors for dataset construction
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(
        "all input vectors must have the same dimension. Received different sizes: {input_dims:?}"
    )]
    InputDimensionMismatch { input_dims: HashSet<usize> },
    #[error("dataset must contain at least one sample")]
    Empty,
}

/// Toggles between dataset types
#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum DatasetKind {
    Blobs,
    Mnist,
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Blobs => write!(f, "blobs"),
            DatasetKind::Mnist => write!(f, "mnist"),
        }
    }
}

/// A single sample: a flat feature vector and its integer class label
#[derive(Clone, Debug, PartialEq)]
pub struct VectorItem {
    pub features: Vec<f32>,
    pub label: usize,
}

/// Number of classes produced by [`gen_blob_data`]
pub const BLOB_CLASSES: usize = 2;
/// Feature dimension produced by [`gen_blob_data`]
pub const BLOB_FEATURES: usize = 2;

/// Generates two linearly separable Gaussian blobs, `class_size` points each.
/// The generator is seeded so runs are reproducible.
pub fn gen_blob_data(class_size: usize, seed: u64) -> Vec<VectorItem> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let noise = Normal::new(0.0f32, 1.0).unwrap();
    let centers = [(-2.5f32, -2.5f32), (2.5f32, 2.5f32)];

    let mut items = Vec::with_capacity(class_size * centers.len());
    for (label, (cx, cy)) in centers.iter().enumerate() {
        for _ in 0..class_size {
            items.push(VectorItem {
                features: vec![cx + noise.sample(&mut rng), cy + noise.sample(&mut rng)],
                label,
            });
        }
    }

    items
}

/// Wraps samples in an in-memory dataset, validating that every feature
/// vector has the same width
pub fn in_memory_dataset(items: Vec<VectorItem>) -> Result<InMemDataset<VectorItem>, DatasetError> {
    if items.is_empty() {
        return Err(DatasetError::Empty);
    }
    let input_dims = items
        .iter()
        .map(|item| item.features.len())
        .collect::<HashSet<_>>();
    if input_dims.len() > 1 {
        return Err(DatasetError::InputDimensionMismatch { input_dims });
    }
    Ok(InMemDataset::new(items))
}
