//! Batching of dataset items into tensors
//!
//! Takes inspiration from the PyTorch DataLoader collate step
//! <https://pytorch.org/docs/stable/data.html#torch.utils.data.DataLoader>;
//! the iteration and shuffling themselves are `burn`'s responsibility.

use burn::{
    data::{dataloader::batcher::Batcher, dataset::vision::MnistItem},
    tensor::{Int, Tensor, TensorData, backend::Backend},
};

use crate::datasets::VectorItem;

/// A mini-batch ready for the forward pass: flattened inputs and integer
/// class labels. Immutable once yielded by the loader.
#[derive(Clone, Debug)]
pub struct FeatureBatch<B: Backend> {
    /// `[batch_size, num_features]`
    pub images: Tensor<B, 2>,
    /// `[batch_size]`
    pub targets: Tensor<B, 1, Int>,
}

/// Collates dataset items into [`FeatureBatch`]es on a fixed device
#[derive(Clone)]
pub struct FeatureBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn targets(&self, labels: Vec<i64>) -> Tensor<B, 1, Int> {
        let len = labels.len();
        Tensor::from_data(TensorData::new(labels, [len]), &self.device)
    }
}

impl<B: Backend> Batcher<MnistItem, FeatureBatch<B>> for FeatureBatcher<B> {
    /// Flattens each 28x28 image to a 784-vector and normalizes pixels to
    /// `[-1, 1]` with mean 0.5 and std 0.5, matching the usual MNIST
    /// transform pipeline
    fn batch(&self, items: Vec<MnistItem>) -> FeatureBatch<B> {
        let images = items
            .iter()
            .map(|item| TensorData::from(item.image))
            .map(|data| Tensor::<B, 2>::from_data(data.convert::<B::FloatElem>(), &self.device))
            .map(|tensor| tensor.reshape([1, 784]))
            .map(|tensor| ((tensor / 255) - 0.5) / 0.5)
            .collect();
        let targets = items.iter().map(|item| item.label as i64).collect();

        FeatureBatch {
            images: Tensor::cat(images, 0),
            targets: self.targets(targets),
        }
    }
}

impl<B: Backend> Batcher<VectorItem, FeatureBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<VectorItem>) -> FeatureBatch<B> {
        let rows = items.len();
        let cols = items.first().map_or(0, |item| item.features.len());
        let flat = items
            .iter()
            .flat_map(|item| item.features.iter().copied())
            .collect::<Vec<_>>();
        let targets = items.iter().map(|item| item.label as i64).collect();

        FeatureBatch {
            images: Tensor::from_data(TensorData::new(flat, [rows, cols]), &self.device),
            targets: self.targets(targets),
        }
    }
}
