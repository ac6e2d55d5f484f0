//! Training a feed-forward image classifier with the `burn` framework
//! using a PyTorch-like workflow.
//!
//! All tensor arithmetic, reverse-mode differentiation and optimizer math is
//! delegated to `burn`; this crate only composes the model, selects the loss
//! path, and drives the epoch/mini-batch loop.

pub mod data;
pub mod datasets;
pub mod loss;
pub mod model;
pub mod plot;
pub mod train;
