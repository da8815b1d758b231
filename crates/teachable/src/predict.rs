//! Scoring helpers: full probability vectors and top-K selection.

use std::cmp::Reverse;

use burn::prelude::*;
use ordered_float::OrderedFloat;

use crate::model::bridge::{feature_to_tensor, tensor_to_floats};
use crate::model::head::ClassifierHead;

/// One scored class.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

/// Score a single feature vector against every class, in label order.
///
/// Softmax-normalized head outputs are reported directly as probabilities.
pub fn score_all<B: Backend>(
    head: &ClassifierHead<B>,
    labels: &[String],
    features: &[f32],
    device: &B::Device,
) -> Vec<Prediction> {
    let input = feature_to_tensor::<B>(features, device);
    let probabilities = tensor_to_floats::<B>(head.probabilities(input));

    labels
        .iter()
        .zip(probabilities)
        .map(|(class_name, probability)| Prediction {
            class_name: class_name.clone(),
            probability,
        })
        .collect()
}

/// Keep the `k` highest-probability predictions, descending.
///
/// Ties keep their original class order (the sort is stable), and `k`
/// larger than the class count returns everything.
pub fn top_k(predictions: &[Prediction], k: usize) -> Vec<Prediction> {
    let mut sorted = predictions.to_vec();
    sorted.sort_by_key(|p| Reverse(OrderedFloat(p.probability)));
    sorted.truncate(k.min(predictions.len()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::head::ClassifierHeadConfig;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn prediction(name: &str, probability: f32) -> Prediction {
        Prediction {
            class_name: name.to_string(),
            probability,
        }
    }

    #[test]
    fn test_score_all_is_a_distribution() {
        let device = Default::default();
        let head = ClassifierHeadConfig::new(8, 3)
            .with_hidden_units(4)
            .init::<TestBackend>(&device);
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let predictions = score_all(&head, &labels, &[0.5; 8], &device);

        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0].class_name, "a");
        let sum: f32 = predictions.iter().map(|p| p.probability).sum();
        assert!((sum - 1.0).abs() < 1e-5, "probabilities should sum to 1, got {sum}");
    }

    #[test]
    fn test_top_k_sorted_descending() {
        let all = vec![
            prediction("a", 0.1),
            prediction("b", 0.6),
            prediction("c", 0.3),
        ];
        let top = top_k(&all, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].class_name, "b");
        assert_eq!(top[1].class_name, "c");
    }

    #[test]
    fn test_top_k_caps_at_class_count() {
        let all = vec![prediction("a", 0.5), prediction("b", 0.5)];
        assert_eq!(top_k(&all, 10).len(), 2);
    }

    #[test]
    fn test_top_k_ties_keep_original_order() {
        let all = vec![
            prediction("a", 0.25),
            prediction("b", 0.25),
            prediction("c", 0.5),
        ];
        let top = top_k(&all, 3);
        assert_eq!(top[0].class_name, "c");
        // a and b tie: a came first in class order.
        assert_eq!(top[1].class_name, "a");
        assert_eq!(top[2].class_name, "b");
    }
}
