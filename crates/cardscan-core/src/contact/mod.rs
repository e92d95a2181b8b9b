//! Contact field extraction from OCR token streams.

mod boxes;
mod extractor;
pub mod rules;

pub use boxes::assign_boxes;
pub use extractor::HeuristicContactExtractor;

use crate::error::ExtractionError;
use crate::models::contact::ContactExtraction;
use crate::ocr::{OcrResult, Token};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for contact field extractors.
pub trait ContactExtractor {
    /// Extract contact fields from a token stream.
    ///
    /// Pattern misses are not errors; an empty stream yields an empty record.
    fn extract(&self, tokens: &[Token]) -> ContactExtraction;

    /// Extract contact fields, failing when the stream has no readable line.
    fn extract_strict(&self, tokens: &[Token]) -> Result<ContactExtraction> {
        let extraction = self.extract(tokens);
        if extraction.is_blank() {
            return Err(ExtractionError::NoText);
        }
        Ok(extraction)
    }

    /// Extract contact fields from an OCR result.
    fn extract_from_ocr(&self, ocr_result: &OcrResult) -> ContactExtraction {
        self.extract(&ocr_result.tokens)
    }
}
