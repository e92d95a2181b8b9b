//! Regex patterns for email, phone, and company detection.
//!
//! These patterns define the extraction contract. They are deliberately
//! loose: the company pattern in particular matches most capitalized
//! phrases, and both phone and company may run across line breaks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::contact::ContactField;

use super::{ExtractionMatch, FieldExtractor};

lazy_static! {
    // local@domain.tld
    pub static ref EMAIL: Regex = Regex::new(
        r"[\w.-]+@[\w.-]+\.\w+"
    ).unwrap();

    // Optional country code, optional (area code), two groups of 3-4 digits
    pub static ref PHONE: Regex = Regex::new(
        r"\+?\d{1,3}[\s\-]?\(?\d{2,4}\)?[\s\-]?\d{3,4}[\s\-]?\d{3,4}"
    ).unwrap();

    // Capitalized phrase with an optional corporate suffix
    pub static ref COMPANY: Regex = Regex::new(
        r"(?i)\b[A-Z][A-Za-z&\s]+(?:Inc|Ltd|Technologies|Solutions|Systems|Corp|Company|Enterprises|Labs|Studios)?\b"
    ).unwrap();
}

/// Extractor that takes the leftmost match of a fixed pattern.
pub struct PatternExtractor {
    field: ContactField,
    pattern: &'static Regex,
}

impl PatternExtractor {
    /// Email address extractor.
    pub fn email() -> Self {
        Self {
            field: ContactField::Email,
            pattern: &EMAIL,
        }
    }

    /// Phone number extractor.
    pub fn phone() -> Self {
        Self {
            field: ContactField::Phone,
            pattern: &PHONE,
        }
    }

    /// Company name extractor.
    pub fn company() -> Self {
        Self {
            field: ContactField::Company,
            pattern: &COMPANY,
        }
    }

    /// Field this extractor produces.
    pub fn field(&self) -> ContactField {
        self.field
    }
}

impl FieldExtractor for PatternExtractor {
    type Output = ExtractionMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern.find(text).map(|m| {
            ExtractionMatch::new(self.field, m.as_str()).with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(self.field, m.as_str()).with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the first email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    PatternExtractor::email().extract(text).map(|m| m.value)
}

/// Extract the first phone number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    PatternExtractor::phone().extract(text).map(|m| m.value)
}

/// Extract the first company-like phrase from text.
pub fn extract_company(text: &str) -> Option<String> {
    PatternExtractor::company().extract(text).map(|m| m.value)
}
