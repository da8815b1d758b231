//! Epoch-based training loop for the classifier head.
//!
//! Builds a fresh head on every call, drives it with the per-variant
//! optimizer (Adam for image pipelines, RMSProp for pose), invokes caller
//! callbacks at epoch boundaries, and honors cooperative early stop. The
//! optimizer state lives only for the duration of the call.

use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer, RmsPropConfig};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::dataset::PreparedDataset;
use crate::error::TeachableError;
use crate::model::head::{ClassifierHead, ClassifierHeadConfig};
use crate::training::loss::{correct_predictions, cross_entropy_one_hot};
use crate::training::stop::StopSignal;

/// Hyperparameters for a training run.
#[derive(Config, Debug)]
pub struct TrainingParams {
    /// Hidden dense layer width.
    #[config(default = 100)]
    pub hidden_units: usize,
    /// Number of epochs over the training split.
    #[config(default = 20)]
    pub epochs: usize,
    /// Optimizer learning rate.
    #[config(default = 1e-3)]
    pub learning_rate: f64,
    /// Batch size for both train and validation splits.
    #[config(default = 16)]
    pub batch_size: usize,
}

/// Which optimizer drives the head — a fixed per-variant policy, not a user
/// knob beyond the learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerPolicy {
    /// Image pipelines.
    Adam,
    /// Pose pipelines.
    RmsProp,
}

/// Loss and accuracy for one epoch, train and validation splits.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochLogs {
    pub loss: f64,
    pub accuracy: f64,
    pub val_loss: f64,
    pub val_accuracy: f64,
}

/// Caller-supplied hooks invoked synchronously at epoch boundaries.
pub trait TrainingObserver {
    fn on_epoch_begin(&mut self, _epoch: usize) {}
    fn on_epoch_end(&mut self, _epoch: usize, _logs: &EpochLogs) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    /// Epochs actually executed (less than requested on early stop).
    pub epochs_run: usize,
    /// Whether the run terminated via the stop signal.
    pub stopped_early: bool,
    /// Logs from the last executed epoch.
    pub final_logs: Option<EpochLogs>,
}

/// Train a fresh classifier head against a prepared dataset.
///
/// Validates the batch size before any network is constructed. When a seed
/// is set, the backend generator is seeded so weight initialization (and
/// with it the whole run) is deterministic. Returns the trained head on the
/// inner (non-autodiff) backend, ready for inference; the optimizer and its
/// state are dropped before returning.
///
/// # Errors
/// - [`TeachableError::InvalidBatchSize`] for a zero batch size
/// - [`TeachableError::TrainingDiverged`] if any batch loss is non-finite
pub fn train_head<B: AutodiffBackend>(
    params: &TrainingParams,
    policy: OptimizerPolicy,
    dataset: &PreparedDataset,
    seed: Option<u64>,
    observer: &mut dyn TrainingObserver,
    stop: &StopSignal,
    device: &B::Device,
) -> Result<(ClassifierHead<B::InnerBackend>, TrainSummary), TeachableError> {
    if params.batch_size == 0 {
        return Err(TeachableError::InvalidBatchSize(params.batch_size));
    }

    if let Some(seed) = seed {
        B::seed(seed);
    }

    let config = ClassifierHeadConfig::new(dataset.num_features(), dataset.num_classes())
        .with_hidden_units(params.hidden_units);
    let model = config.init::<B>(device);

    tracing::info!(
        epochs = params.epochs,
        batch_size = params.batch_size,
        learning_rate = params.learning_rate,
        hidden_units = params.hidden_units,
        optimizer = ?policy,
        train = dataset.train.len(),
        validation = dataset.validation.len(),
        "training classifier head"
    );

    let (model, summary) = match policy {
        OptimizerPolicy::Adam => run_epochs(
            model,
            AdamConfig::new().init(),
            params,
            dataset,
            observer,
            stop,
            device,
        )?,
        OptimizerPolicy::RmsProp => run_epochs(
            model,
            RmsPropConfig::new().init(),
            params,
            dataset,
            observer,
            stop,
            device,
        )?,
    };

    // Optimizer state was dropped inside run_epochs; only the head survives.
    Ok((model.valid(), summary))
}

fn run_epochs<B: AutodiffBackend, O: Optimizer<ClassifierHead<B>, B>>(
    mut model: ClassifierHead<B>,
    mut optimizer: O,
    params: &TrainingParams,
    dataset: &PreparedDataset,
    observer: &mut dyn TrainingObserver,
    stop: &StopSignal,
    device: &B::Device,
) -> Result<(ClassifierHead<B>, TrainSummary), TeachableError> {
    let mut epochs_run = 0;
    let mut stopped_early = false;
    let mut final_logs = None;

    for epoch in 0..params.epochs {
        observer.on_epoch_begin(epoch);

        let mut loss_sum = 0.0;
        let mut correct = 0usize;
        let mut seen = 0usize;

        for (features, targets) in dataset.train_batches::<B>(params.batch_size, device) {
            let batch_len = features.dims()[0];
            let logits = model.forward(features);
            let loss = cross_entropy_one_hot(logits.clone(), targets.clone());

            let loss_val: f64 = loss.clone().into_scalar().elem();
            if !loss_val.is_finite() {
                return Err(TeachableError::TrainingDiverged { epoch });
            }

            let (batch_correct, _) = correct_predictions(logits, targets);

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(params.learning_rate.into(), model, grads);

            loss_sum += loss_val * batch_len as f64;
            correct += batch_correct;
            seen += batch_len;
        }

        let val_model = model.valid();
        let mut val_loss_sum = 0.0;
        let mut val_correct = 0usize;
        let mut val_seen = 0usize;

        for (features, targets) in
            dataset.validation_batches::<B::InnerBackend>(params.batch_size, device)
        {
            let batch_len = features.dims()[0];
            let logits = val_model.forward(features);
            let loss_val: f64 = cross_entropy_one_hot(logits.clone(), targets.clone())
                .into_scalar()
                .elem();
            let (batch_correct, _) = correct_predictions(logits, targets);

            val_loss_sum += loss_val * batch_len as f64;
            val_correct += batch_correct;
            val_seen += batch_len;
        }

        let logs = EpochLogs {
            loss: loss_sum / seen.max(1) as f64,
            accuracy: correct as f64 / seen.max(1) as f64,
            val_loss: val_loss_sum / val_seen.max(1) as f64,
            val_accuracy: val_correct as f64 / val_seen.max(1) as f64,
        };

        epochs_run = epoch + 1;
        tracing::debug!(
            epoch,
            loss = logs.loss,
            accuracy = logs.accuracy,
            val_loss = logs.val_loss,
            val_accuracy = logs.val_accuracy,
            "epoch finished"
        );
        observer.on_epoch_end(epoch, &logs);
        final_logs = Some(logs);

        // Cooperative early stop: takes effect here, at the epoch boundary.
        if stop.is_requested() {
            stop.acknowledge();
            stopped_early = true;
            tracing::info!(epoch, "stop request observed, terminating training");
            break;
        }
    }

    Ok((
        model,
        TrainSummary {
            epochs_run,
            stopped_early,
            final_logs,
        },
    ))
}
