//! Categorical cross-entropy over one-hot targets, plus batch accuracy.
//!
//! Both are generic over `B: Backend` and operate on burn tensors. Targets
//! arrive one-hot encoded from the dataset builder, so the loss is computed
//! directly against the full label distribution rather than class indices.

use burn::prelude::*;
use burn::tensor::activation;

/// Categorical cross-entropy loss.
///
/// # Arguments
/// - `logits`: shape `(batch, num_classes)` — raw head outputs
/// - `targets`: shape `(batch, num_classes)` — one-hot label rows
///
/// # Returns
/// Scalar loss tensor of shape `(1,)`: mean over the batch of
/// `-sum(target * log_softmax(logits))`.
pub fn cross_entropy_one_hot<B: Backend>(
    logits: Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let log_probs = activation::log_softmax(logits, 1);
    (targets * log_probs).sum_dim(1).neg().mean()
}

/// Count of argmax matches between logits and one-hot targets.
///
/// Returns `(correct, total)` so callers can weight across batches of
/// unequal size.
pub fn correct_predictions<B: Backend>(
    logits: Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> (usize, usize) {
    let total = logits.dims()[0];
    let predicted = logits.argmax(1);
    let expected = targets.argmax(1);
    let correct: i64 = predicted.equal(expected).int().sum().into_scalar().elem();
    (correct as usize, total)
}
