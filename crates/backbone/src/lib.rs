//! Boundary around the frozen feature-extraction backbone.
//!
//! A teachable classifier never trains the backbone — it only reads
//! fixed-length feature vectors out of it. This crate owns that boundary:
//! the [`FeatureExtractor`] trait, the tagged [`ClassifierInput`] (raw image
//! frame vs. precomputed feature vector), and the checkpoint option parsing
//! that maps a version / width-multiplier pair to a deterministic checkpoint
//! URL. Actually fetching and running the checkpoint is the host
//! application's job, behind the trait.

pub mod extractor;
pub mod input;
pub mod options;

pub use extractor::{FeatureExtractor, FeaturesOnly};
pub use input::{ClassifierInput, ImageFrame};
pub use options::{BackboneError, BackboneOptions, ResolvedCheckpoint, IMAGE_SIZE};
