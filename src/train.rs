//! The training driver: mini-batch gradient descent over epochs
//!
//! Each step runs forward -> loss -> backward -> update in strict sequence.
//! Gradients are materialized fresh by every `backward()` call and dropped
//! with the step, so a stale gradient from iteration N-1 can never leak into
//! iteration N's update.

use std::sync::Arc;

use burn::{
    data::dataloader::DataLoader,
    optim::{GradientsParams, Optimizer},
    tensor::{ElementConversion, activation, backend::AutodiffBackend},
};
use thiserror::Error;

use crate::{
    data::FeatureBatch,
    loss::{LossKind, cross_entropy_from_logits, nll_from_log_probs},
    model::{Mlp, ModelError},
};

/// Errors for the training driver
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("loss is not finite ({loss}); check the learning rate and input scaling")]
    NumericalInstability { loss: f32 },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Hyperparameters of the training run
#[derive(Debug, Clone, Copy)]
pub struct TrainSettings {
    pub epochs: usize,
    /// Fixed step size applied to gradients at every update
    pub lr: f64,
    pub loss: LossKind,
}

/// Outcome of a training run: the trained model and the mean loss per epoch
pub struct TrainReport<B: AutodiffBackend> {
    pub model: Mlp<B>,
    pub epoch_losses: Vec<f32>,
}

/// Performs one optimization step on a single mini-batch and returns the
/// updated model together with the scalar loss of the batch.
///
/// A non-finite loss aborts the step before the backward pass, so a poisoned
/// update is never applied to the parameters.
pub fn train_step<B, O>(
    model: Mlp<B>,
    optim: &mut O,
    batch: &FeatureBatch<B>,
    lr: f64,
    loss: LossKind,
) -> Result<(Mlp<B>, f32), TrainError>
where
    B: AutodiffBackend,
    O: Optimizer<Mlp<B>, B>,
{
    let logits = model.forward(batch.images.clone())?;
    let loss_tensor = match loss {
        LossKind::Logits => cross_entropy_from_logits(logits, batch.targets.clone()),
        LossKind::LogProbs => {
            nll_from_log_probs(activation::log_softmax(logits, 1), batch.targets.clone())
        }
    };
    let loss_value = loss_tensor.clone().into_scalar().elem::<f32>();
    if !loss_value.is_finite() {
        return Err(TrainError::NumericalInstability { loss: loss_value });
    }

    let grads = loss_tensor.backward();
    let grads = GradientsParams::from_grads(grads, &model);
    let model = optim.step(lr, model, grads);

    Ok((model, loss_value))
}

/// Trains the model for a fixed number of epochs, logging and recording the
/// mean loss of each epoch.
///
/// The final batch of an epoch may be smaller than the rest; every batch
/// still contributes equally to the epoch mean.
pub fn fit<B, O>(
    mut model: Mlp<B>,
    loader: Arc<dyn DataLoader<FeatureBatch<B>>>,
    optim: &mut O,
    settings: &TrainSettings,
) -> Result<TrainReport<B>, TrainError>
where
    B: AutodiffBackend,
    O: Optimizer<Mlp<B>, B>,
{
    let mut epoch_losses = Vec::with_capacity(settings.epochs);

    for epoch in 0..settings.epochs {
        let mut running_loss = 0.0;
        let mut num_batches = 0;
        for batch in loader.iter() {
            let (updated, loss) = train_step(model, optim, &batch, settings.lr, settings.loss)?;
            model = updated;
            running_loss += loss;
            num_batches += 1;
        }
        let mean_loss = running_loss / num_batches as f32;
        log::info!("epoch: {}, mean loss: {}", epoch + 1, mean_loss);
        epoch_losses.push(mean_loss);
    }

    Ok(TrainReport {
        model,
        epoch_losses,
    })
}
