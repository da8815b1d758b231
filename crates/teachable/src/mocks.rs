//! Deterministic stand-ins for real feature backbones, used by tests and
//! demos that must run without model weights.

use anyhow::Result;
use backbone::{FeatureExtractor, ImageFrame};

/// Extractor that folds pixel values into a fixed-width feature vector.
///
/// Frames with different content land on different feature vectors, and the
/// same frame always maps to the same vector, which is all a classifier-head
/// test needs. No pretrained weights are involved.
#[derive(Debug, Clone)]
pub struct HashingExtractor {
    num_features: usize,
}

impl HashingExtractor {
    pub fn new(num_features: usize) -> Self {
        assert!(num_features > 0, "feature width must be positive");
        Self { num_features }
    }
}

impl FeatureExtractor for HashingExtractor {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn extract_frame(&self, frame: &ImageFrame) -> Result<Vec<f32>> {
        let mut features = vec![0.0f32; self.num_features];
        for (i, &value) in frame.pixels().iter().enumerate() {
            // Stride by a prime so neighboring pixels spread across slots.
            let slot = (i.wrapping_mul(31).wrapping_add(7)) % self.num_features;
            features[slot] += value / 255.0;
        }
        let scale =
            1.0 / (frame.pixels().len().max(1) as f32 / self.num_features as f32).max(1.0);
        for feature in &mut features {
            *feature *= scale;
        }
        Ok(features)
    }
}
