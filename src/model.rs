//! The feed-forward classifier

use burn::{
    config::Config,
    module::Module,
    nn::{Linear, LinearConfig, Relu},
    tensor::{Tensor, activation, backend::Backend},
};
use thiserror::Error;

/// Errors for the model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("input feature size mismatch: expected {expected}, got {got}")]
    InputSizeMismatch { expected: usize, got: usize },
}

/// Configuration of the multi-layer perceptron.
/// The defaults reproduce the classic MNIST network: 784 -> 128 -> 64 -> 10.
#[derive(Config, Debug)]
pub struct MlpConfig {
    pub num_inputs: usize,
    pub num_classes: usize,
    #[config(default = 128)]
    pub hidden1: usize,
    #[config(default = 64)]
    pub hidden2: usize,
}

impl MlpConfig {
    /// Initializes the model with freshly sampled weights on the given device
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        Mlp {
            l1: LinearConfig::new(self.num_inputs, self.hidden1).init(device),
            l2: LinearConfig::new(self.hidden1, self.hidden2).init(device),
            out: LinearConfig::new(self.hidden2, self.num_classes).init(device),
            activation: Relu::new(),
        }
    }
}

/// A three-layer perceptron with ReLU activations producing unnormalized
/// class scores (logits). Analogous to a torch.nn.Sequential of Linear/ReLU
/// units ending in a Linear output layer.
#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    l1: Linear<B>,
    l2: Linear<B>,
    out: Linear<B>,
    activation: Relu,
}

impl<B: Backend> Mlp<B> {
    /// Maps a `[batch_size, num_inputs]` batch to `[batch_size, num_classes]`
    /// logits. The input feature width is validated up front so that a
    /// mismatched batch surfaces as an error instead of a panic inside the
    /// framework's matmul.
    pub fn forward(&self, input: Tensor<B, 2>) -> Result<Tensor<B, 2>, ModelError> {
        let [_, features] = input.dims();
        let expected = self.l1.weight.val().dims()[0];
        if features != expected {
            return Err(ModelError::InputSizeMismatch {
                expected,
                got: features,
            });
        }
        let x = self.activation.forward(self.l1.forward(input));
        let x = self.activation.forward(self.l2.forward(x));
        Ok(self.out.forward(x))
    }

    /// Softmax over the logits, for consumers that want a probability
    /// distribution over classes (e.g. the plotting helper)
    pub fn probabilities(&self, input: Tensor<B, 2>) -> Result<Tensor<B, 2>, ModelError> {
        Ok(activation::softmax(self.forward(input)?, 1))
    }
}
