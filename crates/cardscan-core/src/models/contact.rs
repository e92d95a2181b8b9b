//! Contact record, per-field bounding boxes, and the scan response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the four fields extracted from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Company,
}

impl ContactField {
    /// All fields in box-assignment precedence order.
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Company,
    ];

    /// Key used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Company => "company",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Structured contact data. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

impl ContactRecord {
    /// Get the value of a field.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Company => &self.company,
        }
    }

    /// Set the value of a field.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Company => &mut self.company,
        };
        *slot = value.into();
    }

    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Fields that hold no value.
    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }
}

/// Bounding box evidence for each field. Absent boxes serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBoxes {
    pub name: Option<BoundingBox>,
    pub email: Option<BoundingBox>,
    pub phone: Option<BoundingBox>,
    pub company: Option<BoundingBox>,
}

impl FieldBoxes {
    /// Get the box for a field.
    pub fn get(&self, field: ContactField) -> Option<&BoundingBox> {
        match field {
            ContactField::Name => self.name.as_ref(),
            ContactField::Email => self.email.as_ref(),
            ContactField::Phone => self.phone.as_ref(),
            ContactField::Company => self.company.as_ref(),
        }
    }

    /// Set the box for a field.
    pub fn set(&mut self, field: ContactField, bbox: BoundingBox) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Company => &mut self.company,
        };
        *slot = Some(bbox);
    }

    /// True once every field has a box.
    pub fn is_complete(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_some())
    }
}

/// Output of one extractor run over a token stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactExtraction {
    /// Extracted contact fields.
    #[serde(rename = "extracted_data")]
    pub record: ContactRecord,

    /// Bounding box of the token that evidenced each field.
    pub boxes: FieldBoxes,

    /// Newline-joined token texts, the corpus the patterns ran over.
    pub raw_text: String,

    /// Fields that could not be extracted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ContactExtraction {
    /// True when the token stream held no readable line at all.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }

    /// Split into `(record, boxes, raw_text)`.
    pub fn into_parts(self) -> (ContactRecord, FieldBoxes, String) {
        (self.record, self.boxes, self.raw_text)
    }
}

/// Response envelope returned to clients after scanning a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub status: String,
    pub message: String,

    /// Location of the stored upload, when one was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,

    pub extracted_data: ContactRecord,
    pub boxes: FieldBoxes,
    pub raw_text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    pub scanned_at: DateTime<Utc>,
}

impl ScanResponse {
    /// Build a success response from an extraction.
    pub fn success(extraction: ContactExtraction, file_url: Option<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Card processed successfully".to_string(),
            file_url,
            extracted_data: extraction.record,
            boxes: extraction.boxes,
            raw_text: extraction.raw_text,
            warnings: extraction.warnings,
            scanned_at: Utc::now(),
        }
    }
}
