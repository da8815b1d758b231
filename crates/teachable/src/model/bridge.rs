//! Tensor bridge: conversions between extracted feature vectors / one-hot
//! labels and burn tensors.
//!
//! The feature extractor produces plain `Vec<f32>` buffers; the classifier
//! head needs `Tensor<B, 2>` inputs. This module is that boundary.

use burn::prelude::*;
use burn::tensor::TensorData;

use crate::dataset::Sample;

/// Stack a batch of extracted feature rows into a `(batch, dim)` tensor.
///
/// Row width is taken from the first row; every row must match it. The
/// store only ever holds vectors of the extractor's fixed width, so a
/// mismatch here means a bug upstream, not bad user input.
///
/// # Panics
/// Panics on an empty batch or ragged rows.
pub fn features_to_tensor<B: Backend>(
    features: &[Vec<f32>],
    device: &B::Device,
) -> Tensor<B, 2> {
    assert!(!features.is_empty(), "cannot build a tensor from zero rows");
    let dim = features[0].len();
    assert!(dim > 0, "feature rows cannot be zero-width");
    for (i, row) in features.iter().enumerate() {
        assert_eq!(
            row.len(),
            dim,
            "row {i} is {} wide but the batch is {dim} wide",
            row.len()
        );
    }

    let batch = features.len();
    let flat: Vec<f32> = features.iter().flat_map(|v| v.iter().copied()).collect();
    Tensor::from_data(TensorData::new(flat, [batch, dim]), device)
}

/// Lift one feature vector into a single-row `(1, dim)` tensor for
/// inference.
pub fn feature_to_tensor<B: Backend>(features: &[f32], device: &B::Device) -> Tensor<B, 2> {
    let dim = features.len();
    assert!(dim > 0, "feature rows cannot be zero-width");
    Tensor::from_data(TensorData::new(features.to_vec(), [1, dim]), device)
}

/// Convert a batch of samples to paired (features, one-hot labels) tensors.
///
/// # Panics
/// Panics if `samples` is empty (batching never produces empty chunks).
pub fn samples_to_tensors<B: Backend>(
    samples: &[Sample],
    device: &B::Device,
) -> (Tensor<B, 2>, Tensor<B, 2>) {
    assert!(!samples.is_empty(), "samples must not be empty");
    let features: Vec<Vec<f32>> = samples.iter().map(|s| s.features.clone()).collect();
    let labels: Vec<Vec<f32>> = samples.iter().map(|s| s.label.clone()).collect();
    (
        features_to_tensor::<B>(&features, device),
        features_to_tensor::<B>(&labels, device),
    )
}

/// Extract f32 values from a burn 2D tensor, flattened row-major.
pub fn tensor_to_floats<B: Backend>(tensor: Tensor<B, 2>) -> Vec<f32> {
    tensor.into_data().to_vec::<f32>().unwrap()
}

/// Extract argmax-style index values from a burn 2D integer tensor.
pub fn tensor_to_indices<B: Backend>(tensor: Tensor<B, 2, Int>) -> Vec<usize> {
    tensor
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .unwrap()
        .into_iter()
        .map(|v| v as usize)
        .collect()
}
