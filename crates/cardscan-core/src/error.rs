//! Error types for the cardscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Contact extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Upload storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Outbound mail error.
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the OCR collaborator.
///
/// These are never folded into an empty extraction, so callers can tell
/// "no card detected" apart from "the engine failed".
#[derive(Error, Debug)]
pub enum OcrError {
    /// Model files absent from the model directory.
    #[error("OCR models not found at {}. Missing: {}", dir.display(), missing.join(", "))]
    ModelsMissing { dir: PathBuf, missing: Vec<String> },

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to contact field extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The token stream contained no non-blank line.
    #[error("no text found in token stream")]
    NoText,
}

/// Errors related to upload persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The upload name is empty or would escape the storage root.
    #[error("invalid upload name: {0:?}")]
    InvalidName(String),

    /// Failed to write the upload.
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to follow-up mail composition and delivery.
#[derive(Error, Debug)]
pub enum MailError {
    /// No receiver address was supplied.
    #[error("missing receiver email")]
    MissingRecipient,

    /// No sender address is configured.
    #[error("missing sender email")]
    MissingSender,

    /// No API key in configuration or environment.
    #[error("missing mail API key")]
    MissingApiKey,

    /// The mail provider could not be reached.
    #[error("mail transport failed: {0}")]
    Transport(String),

    /// The mail provider rejected the message.
    #[error("mail provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardscanError>;
