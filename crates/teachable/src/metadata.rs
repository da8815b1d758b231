//! Model metadata: the descriptive record persisted alongside trained
//! weights (label names, package identity, creation time, input flags).

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::TeachableError;

const DEFAULT_MODEL_NAME: &str = "untitled";
const DEFAULT_IMAGE_SIZE: u32 = 224;

/// Descriptive record for a teachable model.
///
/// `labels` is the only required field; everything else is filled with
/// defaults at construction time. The wire format uses camelCase keys so
/// metadata files stay interchangeable with the reference artifact format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Ordered class names; index = class label.
    pub labels: Vec<String>,
    #[serde(default)]
    pub framework_version: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub package_version: String,
    #[serde(default)]
    pub model_name: String,
    /// Creation time, seconds since the unix epoch (as a string).
    #[serde(default)]
    pub time_stamp: String,
    /// Free-form caller data, carried through untouched.
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    /// Whether the backbone consumes single-channel input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<bool>,
    /// Backbone input resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<u32>,
    /// Pose-estimator settings, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_settings: Option<serde_json::Value>,
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}

impl Metadata {
    /// Create metadata for the given ordered label names, defaults filled.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            framework_version: String::new(),
            package_name: String::new(),
            package_version: String::new(),
            model_name: String::new(),
            time_stamp: String::new(),
            user_metadata: serde_json::Value::Null,
            grayscale: None,
            image_size: None,
            pose_settings: None,
        }
        .filled()
    }

    /// Fill any missing optional fields with defaults.
    fn filled(mut self) -> Self {
        if self.package_name.is_empty() {
            self.package_name = env!("CARGO_PKG_NAME").to_string();
        }
        if self.package_version.is_empty() {
            self.package_version = env!("CARGO_PKG_VERSION").to_string();
        }
        if self.model_name.is_empty() {
            self.model_name = DEFAULT_MODEL_NAME.to_string();
        }
        if self.time_stamp.is_empty() {
            self.time_stamp = unix_timestamp();
        }
        if self.user_metadata.is_null() {
            self.user_metadata = serde_json::json!({});
        }
        if self.image_size.is_none() {
            self.image_size = Some(DEFAULT_IMAGE_SIZE);
        }
        self
    }

    /// Parse metadata from an in-memory JSON value.
    ///
    /// Validation is minimal: `labels` must be present and an array.
    pub fn from_json(value: serde_json::Value) -> Result<Self, TeachableError> {
        match value.get("labels") {
            Some(labels) if labels.is_array() => {}
            _ => {
                return Err(TeachableError::InvalidMetadata(
                    "labels must be an array of strings".to_string(),
                ))
            }
        }
        let metadata: Metadata = serde_json::from_value(value)
            .map_err(|e| TeachableError::InvalidMetadata(e.to_string()))?;
        Ok(metadata.filled())
    }

    /// Load metadata from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, TeachableError> {
        let contents = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| TeachableError::InvalidMetadata(e.to_string()))?;
        Self::from_json(value)
    }

    /// Write metadata as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), TeachableError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TeachableError::InvalidMetadata(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Rename one class label.
    pub fn set_label(&mut self, index: usize, label: String) -> Result<(), TeachableError> {
        let num_classes = self.labels.len();
        *self
            .labels
            .get_mut(index)
            .ok_or(TeachableError::ClassOutOfRange { index, num_classes })? = label;
        Ok(())
    }

    /// Replace the full ordered label set.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
    }

    pub fn set_name(&mut self, name: String) {
        self.model_name = name;
    }

    pub fn name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_defaults() {
        let metadata = Metadata::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(metadata.num_classes(), 2);
        assert_eq!(metadata.model_name, "untitled");
        assert_eq!(metadata.image_size, Some(224));
        assert!(!metadata.package_name.is_empty());
        assert!(!metadata.time_stamp.is_empty());
    }

    #[test]
    fn test_from_json_requires_labels_array() {
        let err = Metadata::from_json(serde_json::json!({ "modelName": "x" })).unwrap_err();
        assert!(matches!(err, TeachableError::InvalidMetadata(_)));

        let err = Metadata::from_json(serde_json::json!({ "labels": "nope" })).unwrap_err();
        assert!(matches!(err, TeachableError::InvalidMetadata(_)));
    }

    #[test]
    fn test_from_json_fills_missing_optionals() {
        let metadata =
            Metadata::from_json(serde_json::json!({ "labels": ["cat", "dog"] })).unwrap();
        assert_eq!(metadata.labels, vec!["cat", "dog"]);
        assert_eq!(metadata.model_name, "untitled");
        assert_eq!(metadata.image_size, Some(224));
    }

    #[test]
    fn test_set_label_bounds_checked() {
        let mut metadata = Metadata::new(vec!["a".to_string()]);
        metadata.set_label(0, "renamed".to_string()).unwrap();
        assert_eq!(metadata.labels[0], "renamed");

        let err = metadata.set_label(5, "x".to_string()).unwrap_err();
        assert!(matches!(err, TeachableError::ClassOutOfRange { index: 5, .. }));
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let metadata = Metadata::new(vec!["a".to_string()]);
        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("modelName").is_some());
        assert!(json.get("packageVersion").is_some());

        let restored = Metadata::from_json(json).unwrap();
        assert_eq!(restored, metadata);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");

        let mut metadata = Metadata::new(vec!["up".to_string(), "down".to_string()]);
        metadata.set_name("gestures".to_string());
        metadata.save(&path).unwrap();

        let restored = Metadata::from_path(&path).unwrap();
        assert_eq!(restored, metadata);
    }
}
