//! Error taxonomy for the teachable pipeline.
//!
//! Precondition violations fail fast with a descriptive message and are
//! never retried internally. Extraction and I/O failures propagate to the
//! caller unchanged.

/// Errors from the teachable pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TeachableError {
    /// Predict or evaluate called before a successful `train()`.
    #[error("model has not been trained yet, call train() first")]
    NotTrained,

    /// Evaluation requested before the dataset was prepared.
    #[error("dataset has not been prepared, call prepare() or train() first")]
    NotPrepared,

    /// Example added for a class index outside the configured label range.
    #[error("class index {index} is out of range for {num_classes} classes, call set_labels() first")]
    ClassOutOfRange { index: usize, num_classes: usize },

    /// A class bucket is empty at dataset-preparation time.
    #[error("class {0} has no examples, add some examples before training")]
    EmptyClass(usize),

    /// Batch size of zero.
    #[error("batch size must be greater than zero, got {0}")]
    InvalidBatchSize(usize),

    /// Metadata label count disagrees with the example-store class count.
    #[error("cannot train with {labels} labels and {classes} example classes")]
    LabelMismatch { labels: usize, classes: usize },

    /// The optimizer produced a non-finite loss; the train() call aborts.
    #[error("training diverged at epoch {epoch}: loss is not finite")]
    TrainingDiverged { epoch: usize },

    /// Metadata failed minimal validation (labels must be an array).
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// The feature extractor rejected an input.
    #[error("feature extraction failed: {0}")]
    Extraction(#[source] anyhow::Error),

    /// Failed to persist or restore the trained head.
    #[error("failed to record trained head: {0}")]
    Record(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
