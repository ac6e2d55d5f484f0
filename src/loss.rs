//! Loss functions for classification
//!
//! Two equivalent code paths are provided, mirroring the two conventions in
//! common use: cross entropy over raw scores (logits), and negative
//! log-likelihood over scores the caller has already log-normalized. Working
//! on raw or log-space scores avoids the numerical underflow of normalized
//! probabilities near 0 and 1.

use std::fmt::{self, Display};

use burn::{
    nn::loss::CrossEntropyLossConfig,
    tensor::{Int, Tensor, backend::Backend},
};
use clap::ValueEnum;

/// Selects which loss code path the training driver uses
#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum LossKind {
    /// Cross entropy computed directly from raw logits
    Logits,
    /// Negative log-likelihood from log-softmaxed scores
    LogProbs,
}

impl Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossKind::Logits => write!(f, "logits"),
            LossKind::LogProbs => write!(f, "log-probs"),
        }
    }
}

/// Mean cross entropy between raw class scores and integer class labels
///
/// # Shapes
///
/// - logits: `[batch_size, num_classes]`
/// - targets: `[batch_size]`
pub fn cross_entropy_from_logits<B: Backend>(
    logits: Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
) -> Tensor<B, 1> {
    CrossEntropyLossConfig::new()
        .init(&logits.device())
        .forward(logits, targets)
}

/// Mean negative log-likelihood of the target class, given scores that are
/// already log-probabilities (i.e. `log_softmax` has been applied)
pub fn nll_from_log_probs<B: Backend>(
    log_probs: Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
) -> Tensor<B, 1> {
    let [batch_size, _] = log_probs.dims();
    log_probs
        .gather(1, targets.reshape([batch_size, 1]))
        .mean()
        .neg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, backend::ndarray::NdArrayDevice, tensor::activation};

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_cross_entropy_known_value() {
        let device = NdArrayDevice::Cpu;
        // Two equal scores: p = (0.5, 0.5), so -log p(target) = ln 2
        let logits = Tensor::<TestBackend, 2>::from_floats([[0.0, 0.0]], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0], &device);
        let loss: f32 = cross_entropy_from_logits(logits, targets).into_scalar();
        assert!((loss - 2.0f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_loss_paths_agree() {
        let device = NdArrayDevice::Cpu;
        let logits =
            Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0], [0.5, -0.5, 0.0]], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([2, 0], &device);

        let ce = cross_entropy_from_logits(logits.clone(), targets.clone());
        let nll = nll_from_log_probs(activation::log_softmax(logits, 1), targets);

        ce.into_data().assert_approx_eq(&nll.into_data(), 5);
    }
}
