//! Backbone checkpoint selection.
//!
//! Maps a (version, width multiplier) pair to the deterministic checkpoint
//! URL scheme the pretrained weights are published under, along with the
//! name of the layer whose activations serve as classifier features.

/// Input resolution the published checkpoints expect.
pub const IMAGE_SIZE: usize = 224;

const DEFAULT_VERSION: u32 = 1;
const DEFAULT_ALPHA_V1: f32 = 0.25;
const DEFAULT_ALPHA_V2: f32 = 0.35;
const VALID_ALPHAS_V1: [f32; 4] = [0.25, 0.5, 0.75, 1.0];
const VALID_ALPHAS_V2: [f32; 4] = [0.35, 0.5, 0.75, 1.0];
const TRAINING_LAYER_V1: &str = "conv_pw_13_relu";
const TRAINING_LAYER_V2: &str = "out_relu";

/// Errors from backbone option parsing.
#[derive(Debug, thiserror::Error)]
pub enum BackboneError {
    /// Requested a backbone major version with no published checkpoints.
    #[error("backbone version {0} doesn't exist, supported versions are 1 and 2")]
    UnsupportedVersion(u32),
}

/// Options selecting which frozen backbone checkpoint to use.
///
/// Either an explicit `checkpoint_url` + `training_layer` pair, or a
/// (version, alpha) pair resolved through the published URL scheme.
#[derive(Debug, Clone, Default)]
pub struct BackboneOptions {
    /// Backbone major version (1 or 2). Defaults to 1.
    pub version: Option<u32>,
    /// Width multiplier. Invalid values fall back to the version default
    /// with a warning.
    pub alpha: Option<f32>,
    /// Explicit checkpoint URL, bypassing the scheme.
    pub checkpoint_url: Option<String>,
    /// Layer whose output is read as the feature vector. Required alongside
    /// `checkpoint_url`; ignored otherwise.
    pub training_layer: Option<String>,
}

/// A fully resolved checkpoint: where to fetch it and which layer to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCheckpoint {
    pub url: String,
    pub training_layer: String,
}

fn validated_alpha(version: u32, alpha: f32) -> f32 {
    let (valid, fallback) = match version {
        1 => (&VALID_ALPHAS_V1, DEFAULT_ALPHA_V1),
        _ => (&VALID_ALPHAS_V2, DEFAULT_ALPHA_V2),
    };
    if valid.contains(&alpha) {
        alpha
    } else {
        tracing::warn!(
            alpha,
            version,
            fallback,
            "invalid width multiplier, falling back to version default"
        );
        fallback
    }
}

impl BackboneOptions {
    /// Resolve these options to a checkpoint URL and training layer.
    ///
    /// An explicit `checkpoint_url` + `training_layer` pair wins outright;
    /// `version`/`alpha` are then ignored (with a warning if they were set).
    /// Otherwise the URL is derived from the published scheme for the
    /// version. Unsupported versions are a hard error; invalid alphas are
    /// auto-corrected to the version default.
    pub fn resolve(&self) -> Result<ResolvedCheckpoint, BackboneError> {
        if let (Some(url), Some(layer)) = (&self.checkpoint_url, &self.training_layer) {
            if self.alpha.is_some() || self.version.is_some() {
                tracing::warn!("explicit checkpoint URL set, version/alpha options are ignored");
            }
            return Ok(ResolvedCheckpoint {
                url: url.clone(),
                training_layer: layer.clone(),
            });
        }

        let version = self.version.unwrap_or(DEFAULT_VERSION);
        match version {
            1 => {
                let alpha = validated_alpha(1, self.alpha.unwrap_or(DEFAULT_ALPHA_V1));
                // The v1 scheme writes 1.00 as "1.0".
                let alpha_str = if alpha == 1.0 {
                    "1.0".to_string()
                } else {
                    format!("{alpha:.2}")
                };
                tracing::info!(version, alpha, "resolving backbone checkpoint");
                Ok(ResolvedCheckpoint {
                    url: format!(
                        "https://storage.googleapis.com/tfjs-models/tfjs/mobilenet_v1_{alpha_str}_{IMAGE_SIZE}/model.json"
                    ),
                    training_layer: TRAINING_LAYER_V1.to_string(),
                })
            }
            2 => {
                let alpha = validated_alpha(2, self.alpha.unwrap_or(DEFAULT_ALPHA_V2));
                tracing::info!(version, alpha, "resolving backbone checkpoint");
                Ok(ResolvedCheckpoint {
                    url: format!(
                        "https://storage.googleapis.com/teachable-machine-models/mobilenet_v2_weights_tf_dim_ordering_tf_kernels_{alpha:.2}_{IMAGE_SIZE}_no_top/model.json"
                    ),
                    training_layer: TRAINING_LAYER_V2.to_string(),
                })
            }
            other => Err(BackboneError::UnsupportedVersion(other)),
        }
    }
}
