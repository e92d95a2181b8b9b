//! Heuristic contact extractor combining the name rule and field patterns.

use tracing::{debug, info};

use crate::models::contact::{ContactExtraction, ContactField, ContactRecord};
use crate::ocr::{full_text, Token};

use super::boxes::assign_boxes;
use super::rules::{FieldExtractor, NameHeuristic, PatternExtractor};
use super::ContactExtractor;

/// Rule-based extractor for business cards.
///
/// Stateless: every call derives its output from the given tokens only, so
/// one instance can be shared across threads.
pub struct HeuristicContactExtractor {
    name: NameHeuristic,
    patterns: [PatternExtractor; 3],
}

impl HeuristicContactExtractor {
    /// Create an extractor with the standard email, phone, and company patterns.
    pub fn new() -> Self {
        Self {
            name: NameHeuristic::new(),
            patterns: [
                PatternExtractor::email(),
                PatternExtractor::phone(),
                PatternExtractor::company(),
            ],
        }
    }

    fn extract_record(&self, text: &str) -> ContactRecord {
        let mut record = ContactRecord::default();

        if let Some(name) = self.name.extract(text) {
            record.set(ContactField::Name, name);
        }

        for pattern in &self.patterns {
            if let Some(m) = pattern.extract(text) {
                record.set(m.field, m.value);
            }
        }

        record
    }
}

impl Default for HeuristicContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for HeuristicContactExtractor {
    fn extract(&self, tokens: &[Token]) -> ContactExtraction {
        let raw_text = full_text(tokens);

        info!(
            "Extracting contact fields from {} tokens ({} characters)",
            tokens.len(),
            raw_text.len()
        );
        debug!("Full OCR text:\n{}", raw_text);

        let record = self.extract_record(&raw_text);
        let boxes = assign_boxes(tokens, &record);

        let warnings = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        ContactExtraction {
            record,
            boxes,
            raw_text,
            warnings,
        }
    }
}
