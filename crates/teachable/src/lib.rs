//! Transfer-learning classifier over a frozen feature backbone.
//!
//! The pipeline collects labeled examples as backbone embeddings, shuffles
//! and splits them into train/validation sets, trains a small two-layer
//! dense head, and serves softmax predictions. The backbone itself is never
//! updated; see the `backbone` crate for the extractor contract.
//!
//! [`TeachableModel`] is the facade most callers want. The lower-level
//! pieces (example store, dataset preparation, training loop, scoring) are
//! public for callers that need to drive them directly.

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod metadata;
pub mod mocks;
pub mod model;
pub mod predict;
pub mod shuffle;
pub mod store;
pub mod training;

pub use classifier::TeachableModel;
pub use dataset::{prepare, PreparedDataset, Sample};
pub use error::TeachableError;
pub use metadata::Metadata;
pub use model::head::{ClassifierHead, ClassifierHeadConfig};
pub use predict::Prediction;
pub use store::ExampleStore;
pub use training::{
    train_head, EpochLogs, NoopObserver, OptimizerPolicy, StopSignal, TrainSummary,
    TrainingObserver, TrainingParams,
};
