//! Dataset preparation: per-class shuffle, one-hot encoding, deterministic
//! train/validation split, and batched tensor iteration.

use burn::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::TeachableError;
use crate::model::bridge::samples_to_tensors;
use crate::shuffle::fisher_yates;
use crate::store::ExampleStore;

/// Fraction of each class held out for validation, rounded up per class.
pub const VALIDATION_FRACTION: f64 = 0.15;

/// One prepared example: a feature vector paired with its one-hot label.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: Vec<f32>,
}

/// Encode a class index as a one-hot vector of length `num_classes`.
pub fn one_hot(label: usize, num_classes: usize) -> Vec<f32> {
    let mut encoded = vec![0.0; num_classes];
    encoded[label] = 1.0;
    encoded
}

/// Disjoint train/validation sample sequences ready for batched iteration.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub train: Vec<Sample>,
    pub validation: Vec<Sample>,
    num_features: usize,
    num_classes: usize,
}

/// Build a prepared dataset from the example store.
///
/// Per class: shuffle the bucket, then split at
/// `num_train = len − ceil(0.15 · len)` — the first `num_train` examples
/// train, the remainder validate. The combined train and validation
/// sequences are then each shuffled once more. With a seed the whole
/// procedure is reproducible; the generator is re-seeded on every call, so
/// repeated preparation with the same seed and same store yields identical
/// splits.
///
/// Tiny classes are a known edge: `ceil(0.15 · n)` can consume most or all
/// of a 1–3 example class. That mirrors the split rule exactly rather than
/// special-casing it.
pub fn prepare(store: &ExampleStore, seed: Option<u64>) -> Result<PreparedDataset, TeachableError> {
    if store.num_classes() == 0 {
        return Err(TeachableError::EmptyClass(0));
    }
    if let Some(class) = store.first_empty_class() {
        return Err(TeachableError::EmptyClass(class));
    }

    let mut rng = seed.map(StdRng::seed_from_u64);
    let num_classes = store.num_classes();

    let mut train: Vec<Sample> = Vec::new();
    let mut validation: Vec<Sample> = Vec::new();

    for (class, bucket) in store.buckets().iter().enumerate() {
        let shuffled = fisher_yates(bucket, rng.as_mut());
        let label = one_hot(class, num_classes);

        let class_len = shuffled.len();
        let num_validation = (VALIDATION_FRACTION * class_len as f64).ceil() as usize;
        let num_train = class_len - num_validation;

        for (i, features) in shuffled.into_iter().enumerate() {
            let sample = Sample {
                features,
                label: label.clone(),
            };
            if i < num_train {
                train.push(sample);
            } else {
                validation.push(sample);
            }
        }
    }

    let train = fisher_yates(&train, rng.as_mut());
    let validation = fisher_yates(&validation, rng.as_mut());

    let num_features = train
        .first()
        .or_else(|| validation.first())
        .map(|s| s.features.len())
        .unwrap_or(0);

    tracing::debug!(
        train = train.len(),
        validation = validation.len(),
        num_classes,
        num_features,
        "dataset prepared"
    );

    Ok(PreparedDataset {
        train,
        validation,
        num_features,
        num_classes,
    })
}

impl PreparedDataset {
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Batch the training split into (features, labels) tensor pairs.
    pub fn train_batches<B: Backend>(
        &self,
        batch_size: usize,
        device: &B::Device,
    ) -> Vec<(Tensor<B, 2>, Tensor<B, 2>)> {
        Self::batches(&self.train, batch_size, device)
    }

    /// Batch the validation split into (features, labels) tensor pairs.
    pub fn validation_batches<B: Backend>(
        &self,
        batch_size: usize,
        device: &B::Device,
    ) -> Vec<(Tensor<B, 2>, Tensor<B, 2>)> {
        Self::batches(&self.validation, batch_size, device)
    }

    fn batches<B: Backend>(
        samples: &[Sample],
        batch_size: usize,
        device: &B::Device,
    ) -> Vec<(Tensor<B, 2>, Tensor<B, 2>)> {
        assert!(batch_size > 0, "batch size must be > 0");
        samples
            .chunks(batch_size)
            .map(|chunk| samples_to_tensors::<B>(chunk, device))
            .collect()
    }
}
