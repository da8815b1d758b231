//! The teachable model facade: collect examples, train the head, predict.
//!
//! Ties the frozen backbone, the example store, dataset preparation, the
//! training loop, and scoring together behind one stateful type. The state
//! machine is linear: collect examples, prepare (implicit on train), train,
//! then predict and evaluate.

use std::path::Path;

use backbone::{ClassifierInput, FeatureExtractor};
use burn::module::Module;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use burn::tensor::backend::AutodiffBackend;

use crate::dataset::{self, PreparedDataset};
use crate::error::TeachableError;
use crate::eval;
use crate::metadata::Metadata;
use crate::model::head::{ClassifierHead, ClassifierHeadConfig};
use crate::predict::{self, Prediction};
use crate::store::ExampleStore;
use crate::training::{
    train_head, OptimizerPolicy, StopSignal, TrainSummary, TrainingObserver, TrainingParams,
};

const WEIGHTS_FILE: &str = "head";
const METADATA_FILE: &str = "metadata.json";

/// A transfer-learning classifier over a frozen feature backbone.
///
/// Only the small dense head is ever trained; the backbone `E` stays frozen
/// and is used purely as an embedding function. `B` is the autodiff backend
/// used for training; inference runs on its inner backend.
pub struct TeachableModel<B: AutodiffBackend, E: FeatureExtractor> {
    extractor: E,
    metadata: Metadata,
    store: ExampleStore,
    dataset: Option<PreparedDataset>,
    head: Option<ClassifierHead<B::InnerBackend>>,
    policy: OptimizerPolicy,
    seed: Option<u64>,
    stop: StopSignal,
    device: B::Device,
}

impl<B: AutodiffBackend, E: FeatureExtractor> TeachableModel<B, E> {
    /// Image-variant model: Adam-trained head over an image backbone.
    pub fn image(extractor: E, labels: Vec<String>, device: B::Device) -> Self {
        Self::with_policy(extractor, labels, OptimizerPolicy::Adam, device)
    }

    /// Pose-variant model: RMSProp-trained head over precomputed keypoints.
    pub fn pose(extractor: E, labels: Vec<String>, device: B::Device) -> Self {
        Self::with_policy(extractor, labels, OptimizerPolicy::RmsProp, device)
    }

    fn with_policy(
        extractor: E,
        labels: Vec<String>,
        policy: OptimizerPolicy,
        device: B::Device,
    ) -> Self {
        let mut store = ExampleStore::new();
        store.set_classes(labels.len());
        Self {
            extractor,
            metadata: Metadata::new(labels),
            store,
            dataset: None,
            head: None,
            policy,
            seed: None,
            stop: StopSignal::new(),
            device,
        }
    }

    /// Fix the shuffle and weight-initialization seed for reproducible runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn labels(&self) -> &[String] {
        &self.metadata.labels
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn set_name(&mut self, name: String) {
        self.metadata.set_name(name);
    }

    /// Rename one class label without touching collected examples.
    pub fn set_label(&mut self, index: usize, label: String) -> Result<(), TeachableError> {
        self.metadata.set_label(index, label)
    }

    /// Replace the label set, discarding all collected examples and any
    /// trained head (the class count may have changed).
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.store.set_classes(labels.len());
        self.metadata.set_labels(labels);
        self.dataset = None;
        self.head = None;
    }

    /// Embed an input with the frozen backbone and file it under a class.
    ///
    /// Any prepared dataset is invalidated: the next training run will
    /// re-split from the updated store.
    pub fn add_example(
        &mut self,
        class: usize,
        input: &ClassifierInput,
    ) -> Result<(), TeachableError> {
        let features = self
            .extractor
            .extract(input)
            .map_err(TeachableError::Extraction)?;
        self.store.add(class, features)?;
        self.dataset = None;
        Ok(())
    }

    pub fn example_count(&self, class: usize) -> usize {
        self.store.counts().get(class).copied().unwrap_or(0)
    }

    pub fn total_examples(&self) -> usize {
        self.store.total()
    }

    /// Shuffle and split the collected examples into train/validation sets.
    ///
    /// Called implicitly by [`train`](Self::train) when needed; exposed so
    /// callers can surface preparation errors before committing to a run.
    pub fn prepare(&mut self) -> Result<(), TeachableError> {
        self.dataset = Some(dataset::prepare(&self.store, self.seed)?);
        Ok(())
    }

    pub fn is_prepared(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn is_trained(&self) -> bool {
        self.head.is_some()
    }

    /// Train a fresh head on the collected examples.
    ///
    /// Replaces any previously trained head only on success; a failed run
    /// leaves the model in its prior state.
    pub fn train(
        &mut self,
        params: &TrainingParams,
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainSummary, TeachableError> {
        if self.metadata.labels.len() != self.store.num_classes() {
            return Err(TeachableError::LabelMismatch {
                labels: self.metadata.labels.len(),
                classes: self.store.num_classes(),
            });
        }
        if self.dataset.is_none() {
            self.prepare()?;
        }
        let dataset = self.dataset.as_ref().ok_or(TeachableError::NotPrepared)?;

        self.stop.reset();
        let (head, summary) = train_head::<B>(
            params,
            self.policy,
            dataset,
            self.seed,
            observer,
            &self.stop,
            &self.device,
        )?;
        self.head = Some(head);
        Ok(summary)
    }

    /// Request a cooperative stop of the training run in progress.
    ///
    /// Returns a handle whose `is_acknowledged` flips once the loop has
    /// observed the request at an epoch boundary and terminated.
    pub fn stop_training(&self) -> StopSignal {
        self.stop.request();
        self.stop.clone()
    }

    /// Score an input against every class, in label order.
    pub fn predict(&self, input: &ClassifierInput) -> Result<Vec<Prediction>, TeachableError> {
        let head = self.head.as_ref().ok_or(TeachableError::NotTrained)?;
        let features = self
            .extractor
            .extract(input)
            .map_err(TeachableError::Extraction)?;
        Ok(predict::score_all(
            head,
            &self.metadata.labels,
            &features,
            &self.device,
        ))
    }

    /// Score an input and keep the `k` highest-probability classes.
    pub fn predict_top_k(
        &self,
        input: &ClassifierInput,
        k: usize,
    ) -> Result<Vec<Prediction>, TeachableError> {
        Ok(predict::top_k(&self.predict(input)?, k))
    }

    /// Run the trained head over the held-out validation split.
    ///
    /// Returns `(reference, predicted)` label-index sequences.
    pub fn evaluate_validation(&self) -> Result<(Vec<usize>, Vec<usize>), TeachableError> {
        let head = self.head.as_ref().ok_or(TeachableError::NotTrained)?;
        let dataset = self.dataset.as_ref().ok_or(TeachableError::NotPrepared)?;
        Ok(eval::evaluate(head, &dataset.validation, &self.device))
    }

    /// Persist the trained head weights and metadata under `dir`.
    ///
    /// Writes `head.mpk` (named MessagePack record) and `metadata.json`.
    pub fn save(&self, dir: &Path) -> Result<(), TeachableError> {
        let head = self.head.as_ref().ok_or(TeachableError::NotTrained)?;
        std::fs::create_dir_all(dir)?;

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        head.clone()
            .save_file(dir.join(WEIGHTS_FILE), &recorder)
            .map_err(|e| TeachableError::Record(e.to_string()))?;
        self.metadata.save(&dir.join(METADATA_FILE))?;

        tracing::info!(dir = %dir.display(), "saved model");
        Ok(())
    }

    /// Restore a trained head (and metadata) previously written by
    /// [`save`](Self::save).
    ///
    /// `hidden_units` must match the value the head was trained with; the
    /// record format carries no architecture, only weights.
    pub fn load(&mut self, dir: &Path, hidden_units: usize) -> Result<(), TeachableError> {
        let metadata = Metadata::from_path(&dir.join(METADATA_FILE))?;

        let head = ClassifierHeadConfig::new(self.extractor.num_features(), metadata.num_classes())
            .with_hidden_units(hidden_units)
            .init::<B::InnerBackend>(&self.device);
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let head = head
            .load_file(dir.join(WEIGHTS_FILE), &recorder, &self.device)
            .map_err(|e| TeachableError::Record(e.to_string()))?;

        self.store.set_classes(metadata.num_classes());
        self.metadata = metadata;
        self.dataset = None;
        self.head = Some(head);
        tracing::info!(dir = %dir.display(), "loaded model");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbone::FeaturesOnly;
    use burn::backend::ndarray::NdArray;
    use burn::backend::Autodiff;
    use crate::training::NoopObserver;

    type TestBackend = Autodiff<NdArray<f32>>;
    type Model = TeachableModel<TestBackend, FeaturesOnly>;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn feature_input(class: usize, jitter: f32) -> ClassifierInput {
        let mut features = vec![0.1; 4];
        features[class] = 1.0 + jitter;
        ClassifierInput::Features(features)
    }

    fn collected_model() -> Model {
        let mut model = Model::pose(FeaturesOnly::new(4), labels(&["a", "b"]), Default::default());
        model.set_seed(3);
        for i in 0..12 {
            model.add_example(0, &feature_input(0, i as f32 * 0.01)).unwrap();
            model.add_example(1, &feature_input(1, i as f32 * 0.01)).unwrap();
        }
        model
    }

    #[test]
    fn test_predict_before_train_fails() {
        let model = collected_model();
        let err = model.predict(&feature_input(0, 0.0)).unwrap_err();
        assert!(matches!(err, TeachableError::NotTrained));
    }

    #[test]
    fn test_train_then_predict() {
        let mut model = collected_model();
        let params = TrainingParams::new()
            .with_epochs(10)
            .with_hidden_units(8)
            .with_learning_rate(1e-2);
        let summary = model.train(&params, &mut NoopObserver).unwrap();
        assert_eq!(summary.epochs_run, 10);
        assert!(model.is_trained());

        let predictions = model.predict(&feature_input(0, 0.0)).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].class_name, "a");
        let sum: f32 = predictions.iter().map(|p| p.probability).sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_labels_discards_examples_and_head() {
        let mut model = collected_model();
        let params = TrainingParams::new().with_epochs(2).with_hidden_units(4);
        model.train(&params, &mut NoopObserver).unwrap();
        assert!(model.is_trained());

        model.set_labels(labels(&["x", "y", "z"]));
        assert_eq!(model.total_examples(), 0);
        assert!(!model.is_trained());
        assert!(!model.is_prepared());
        assert_eq!(model.labels(), ["x", "y", "z"]);
    }

    #[test]
    fn test_add_example_invalidates_prepared_dataset() {
        let mut model = collected_model();
        model.prepare().unwrap();
        assert!(model.is_prepared());
        model.add_example(0, &feature_input(0, 0.5)).unwrap();
        assert!(!model.is_prepared());
    }

    #[test]
    fn test_evaluate_validation_lengths() {
        let mut model = collected_model();
        let params = TrainingParams::new().with_epochs(3).with_hidden_units(4);
        model.train(&params, &mut NoopObserver).unwrap();

        // 12 per class: ceil(0.15 * 12) = 2 held out per class.
        let (reference, predicted) = model.evaluate_validation().unwrap();
        assert_eq!(reference.len(), 4);
        assert_eq!(predicted.len(), 4);
    }

    #[test]
    fn test_zero_batch_size_leaves_model_untrained() {
        let mut model = collected_model();
        let params = TrainingParams::new().with_batch_size(0);
        let err = model.train(&params, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, TeachableError::InvalidBatchSize(0)));
        assert!(!model.is_trained());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = collected_model();
        model.set_name("pair".to_string());
        let params = TrainingParams::new()
            .with_epochs(8)
            .with_hidden_units(8)
            .with_learning_rate(1e-2);
        model.train(&params, &mut NoopObserver).unwrap();
        let before = model.predict(&feature_input(1, 0.0)).unwrap();
        model.save(dir.path()).unwrap();

        let mut restored = Model::pose(FeaturesOnly::new(4), labels(&["?"]), Default::default());
        restored.load(dir.path(), 8).unwrap();
        assert_eq!(restored.labels(), ["a", "b"]);
        assert_eq!(restored.metadata().name(), "pair");

        let after = restored.predict(&feature_input(1, 0.0)).unwrap();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.class_name, a.class_name);
            assert!((b.probability - a.probability).abs() < 1e-6);
        }
    }
}
