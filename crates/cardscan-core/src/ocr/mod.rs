//! OCR collaborator: recognized tokens and the engines that produce them.

mod preprocessing;
#[cfg(feature = "native")]
mod pure_engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::models::contact::BoundingBox;

/// One recognized word or text region with its pixel-space position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Recognized text. May be blank.
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,

    /// Recognition confidence reported by the engine, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Token {
    /// Create a token without a confidence score.
    pub fn new(text: impl Into<String>, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
            confidence: None,
        }
    }

    /// Attach a confidence score.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whitespace-only or empty tokens carry no evidence.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Bounding box of the token.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}

/// Join token texts with newlines in stream order.
pub fn full_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized tokens in scan order.
    pub tokens: Vec<Token>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Full text (token texts joined with newlines).
    pub fn text(&self) -> String {
        full_text(&self.tokens)
    }

    /// True when no non-blank token was recognized.
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(Token::is_blank)
    }

    /// Sort tokens by reading order (row bands top-to-bottom, then left-to-right).
    pub fn sort_by_reading_order(&mut self, row_height: f32) {
        sort_by_reading_order(&mut self.tokens, row_height);
    }
}

pub(crate) fn sort_by_reading_order(tokens: &mut [Token], row_height: f32) {
    let band = row_height.max(1.0);
    tokens.sort_by(|a, b| {
        let row_a = (a.top as f32 / band) as i32;
        let row_b = (b.top as f32 / band) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            a.left.cmp(&b.left)
        }
    });
}

/// Anything that can turn an image into a token stream.
pub trait TokenSource {
    /// Recognize tokens in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_text_keeps_blank_tokens() {
        let tokens = vec![
            Token::new("Jane", 0, 0, 40, 12),
            Token::new(" ", 45, 0, 4, 12),
            Token::new("Doe", 50, 0, 30, 12),
        ];
        assert_eq!(full_text(&tokens), "Jane\n \nDoe");
        assert_eq!(full_text(&[]), "");
    }

    #[test]
    fn test_blank_token() {
        assert!(Token::new("   ", 0, 0, 1, 1).is_blank());
        assert!(Token::new("", 0, 0, 1, 1).is_blank());
        assert!(!Token::new("x", 0, 0, 1, 1).is_blank());
    }

    #[test]
    fn test_token_json_without_confidence() {
        let token: Token = serde_json::from_str(
            r#"{"text": "Acme", "left": 1, "top": 2, "width": 3, "height": 4}"#,
        )
        .unwrap();
        assert_eq!(token, Token::new("Acme", 1, 2, 3, 4));
        assert_eq!(token.bounding_box(), BoundingBox::new(1, 2, 3, 4));
    }

    #[test]
    fn test_reading_order() {
        let mut result = OcrResult {
            tokens: vec![
                Token::new("555-1234", 10, 80, 90, 14),
                Token::new("Smith", 70, 12, 50, 16),
                Token::new("John", 10, 5, 50, 16),
            ],
            processing_time_ms: 0,
            image_size: (300, 200),
        };
        result.sort_by_reading_order(20.0);
        assert_eq!(result.text(), "John\nSmith\n555-1234");
    }
}
