//! Rule-based field extractors for business cards.

pub mod name;
pub mod patterns;

pub use name::{extract_name, NameHeuristic};
pub use patterns::{extract_company, extract_email, extract_phone, PatternExtractor};

use crate::models::contact::ContactField;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A field value found in the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Field the value belongs to.
    pub field: ContactField,
    /// Extracted value.
    pub value: String,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
}

impl ExtractionMatch {
    pub fn new(field: ContactField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
