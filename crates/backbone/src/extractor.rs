//! The frozen-backbone trait: raw input in, fixed-length feature vector out.

use crate::input::{ClassifierInput, ImageFrame};

/// A frozen feature-extraction backbone.
///
/// Implementations wrap a pretrained network whose weights are never updated
/// by the teachable pipeline. `extract_frame` runs the backbone forward pass
/// on a raw frame; any intermediate buffers must be released before it
/// returns. The provided [`extract`](FeatureExtractor::extract) handles the
/// tagged-input dispatch: precomputed feature vectors pass through unchanged
/// after a length check.
pub trait FeatureExtractor {
    /// Output dimensionality of the backbone, fixed per configuration.
    fn num_features(&self) -> usize;

    /// Run the frozen backbone forward pass on a raw frame.
    fn extract_frame(&self, frame: &ImageFrame) -> anyhow::Result<Vec<f32>>;

    /// Extract features from either input variant.
    fn extract(&self, input: &ClassifierInput) -> anyhow::Result<Vec<f32>> {
        let features = match input {
            ClassifierInput::Features(features) => features.clone(),
            ClassifierInput::Frame(frame) => self.extract_frame(frame)?,
        };
        anyhow::ensure!(
            features.len() == self.num_features(),
            "expected a {}-dimensional feature vector, got {}",
            self.num_features(),
            features.len()
        );
        Ok(features)
    }
}

/// Extractor for pipelines whose features are computed upstream.
///
/// The pose pipeline estimates keypoints outside this crate and hands the
/// flattened keypoint vector in as [`ClassifierInput::Features`]; there is no
/// frame path at all.
#[derive(Debug, Clone)]
pub struct FeaturesOnly {
    num_features: usize,
}

impl FeaturesOnly {
    pub fn new(num_features: usize) -> Self {
        Self { num_features }
    }
}

impl FeatureExtractor for FeaturesOnly {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn extract_frame(&self, _frame: &ImageFrame) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("this extractor only accepts precomputed feature vectors")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_pass_through() {
        let extractor = FeaturesOnly::new(4);
        let input = ClassifierInput::Features(vec![0.1, 0.2, 0.3, 0.4]);
        let features = extractor.extract(&input).unwrap();
        assert_eq!(features, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let extractor = FeaturesOnly::new(4);
        let input = ClassifierInput::Features(vec![0.1; 7]);
        let err = extractor.extract(&input).unwrap_err();
        assert!(err.to_string().contains("4-dimensional"), "{err}");
    }

    #[test]
    fn test_frame_rejected_by_features_only() {
        let extractor = FeaturesOnly::new(4);
        let frame = ImageFrame::new(vec![0.0; 12], 2, 2);
        assert!(extractor.extract(&ClassifierInput::Frame(frame)).is_err());
    }
}
