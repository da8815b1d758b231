//! Validation-set evaluation: reference vs. predicted label indices.

use burn::prelude::*;

use crate::dataset::Sample;
use crate::model::bridge::{samples_to_tensors, tensor_to_indices};
use crate::model::head::ClassifierHead;

/// Largest batch used while walking the validation set.
const EVAL_BATCH_SIZE: usize = 32;

/// Run the trained head over the validation samples in batches.
///
/// Returns `(reference, predicted)` — two parallel label-index sequences of
/// validation-set length, for external metric computation (confusion
/// matrices, per-class accuracy). Batches are capped at
/// `min(32, validation_len)` to bound peak memory; only the small index
/// vectors are accumulated across batches.
pub fn evaluate<B: Backend>(
    head: &ClassifierHead<B>,
    validation: &[Sample],
    device: &B::Device,
) -> (Vec<usize>, Vec<usize>) {
    let mut reference = Vec::with_capacity(validation.len());
    let mut predicted = Vec::with_capacity(validation.len());
    if validation.is_empty() {
        return (reference, predicted);
    }

    let batch_size = validation.len().min(EVAL_BATCH_SIZE);
    for chunk in validation.chunks(batch_size) {
        let (features, targets) = samples_to_tensors::<B>(chunk, device);
        predicted.extend(tensor_to_indices::<B>(head.forward(features).argmax(1)));
        reference.extend(tensor_to_indices::<B>(targets.argmax(1)));
    }

    (reference, predicted)
}
