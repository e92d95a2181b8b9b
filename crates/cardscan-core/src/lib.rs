//! Core library for business card scanning.
//!
//! This crate provides:
//! - OCR token model and a pure Rust recognition engine (PaddleOCR models)
//! - Heuristic contact field extraction (name, email, phone, company) with
//!   per-field bounding boxes
//! - Upload persistence and follow-up message composition

pub mod contact;
pub mod error;
pub mod mail;
pub mod models;
pub mod ocr;
pub mod storage;

pub use contact::{ContactExtractor, HeuristicContactExtractor};
pub use error::{CardscanError, Result};
pub use mail::FollowUpMessage;
pub use models::config::CardscanConfig;
pub use models::contact::{
    BoundingBox, ContactExtraction, ContactField, ContactRecord, FieldBoxes, ScanResponse,
};
pub use ocr::{ImagePreprocessor, OcrResult, Token, TokenSource};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use storage::{LocalUploadStore, StoredUpload, UploadStore};
