//! Configuration structures for the scanning pipeline.
//!
//! Credentials and transport settings for collaborators live here and are
//! handed to each collaborator when it is constructed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CardscanError, Result};

/// Environment variable consulted when `mail.api_key` is unset.
pub const MAIL_API_KEY_ENV: &str = "SENDGRID_API_KEY";

/// Main configuration for cardscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// Upload storage configuration.
    pub storage: StorageConfig,

    /// Follow-up mail configuration.
    pub mail: MailConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Drop recognized tokens below this confidence (0.0 - 1.0).
    pub recognition_threshold: f32,

    /// Keep `[UNK]` markers emitted by the recognizer.
    pub keep_unk: bool,

    /// Grayscale and binarize the image before recognition.
    pub preprocess: bool,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,

    /// Vertical band height in pixels used to group tokens into rows.
    pub row_height: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            recognition_threshold: 0.0, // CTC confidence scores are inherently low
            keep_unk: false,
            preprocess: false,
            max_image_size: 2048,
            row_height: 20.0,
        }
    }
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Paths of (detection, recognition, dictionary) under `dir`.
    pub fn paths_in(&self, dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
        (
            dir.join(&self.detection_model),
            dir.join(&self.recognition_model),
            dir.join(&self.dictionary),
        )
    }

    /// Check that every model file exists under `dir`.
    pub fn missing_in(&self, dir: &Path) -> Vec<PathBuf> {
        let (det, rec, dict) = self.paths_in(dir);
        [det, rec, dict].into_iter().filter(|p| !p.exists()).collect()
    }
}

/// Upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploads are written to.
    pub upload_dir: PathBuf,

    /// Base URL under which stored uploads are served.
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            public_base_url: "http://127.0.0.1:5000/uploads".to_string(),
        }
    }
}

/// Follow-up mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Mail provider send endpoint.
    pub api_url: String,

    /// Verified sender address.
    pub from_email: String,

    /// Name used in the message sign-off.
    pub sender_name: String,

    /// Provider API key. Falls back to `SENDGRID_API_KEY` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Extra PEM root certificate trusted by the mail client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.sendgrid.com/v3/mail/send".to_string(),
            from_email: String::new(),
            sender_name: "The Card-to-Connect team".to_string(),
            api_key: None,
            ca_bundle: None,
            timeout_secs: 30,
        }
    }
}

impl MailConfig {
    /// API key from configuration, or from the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(MAIL_API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl CardscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CardscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
