//! Classifier head training: loss/metric functions, cooperative stop signal,
//! and the epoch-based training loop.

pub mod loss;
pub mod stop;
pub mod trainer;

pub use stop::StopSignal;
pub use trainer::{
    train_head, EpochLogs, NoopObserver, OptimizerPolicy, TrainSummary, TrainingObserver,
    TrainingParams,
};
