//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{sort_by_reading_order, ImagePreprocessor, OcrResult, Token, TokenSource};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
///
/// Produces one token per detected text region.
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    preprocessor: ImagePreprocessor,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(
        model_dir: &Path,
        models: &ModelConfig,
        config: OcrConfig,
    ) -> Result<Self, OcrError> {
        let missing = models.missing_in(model_dir);
        if !missing.is_empty() {
            return Err(OcrError::ModelsMissing {
                dir: model_dir.to_path_buf(),
                missing: missing.iter().map(|p| p.display().to_string()).collect(),
            });
        }

        let (det_path, rec_path, dict_path) = models.paths_in(model_dir);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            preprocessor: ImagePreprocessor::from_config(&config),
            config,
        })
    }

    /// Process an image and return recognized tokens in reading order.
    pub fn process(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let (prepared, scale) = self.preprocessor.prepare(image)?;

        let results = self
            .engine
            .run_from_image(&prepared)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut tokens: Vec<Token> = results
            .iter()
            .filter(|r| r.confidence >= self.config.recognition_threshold)
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                let (left, top, w, h) = polygon_to_rect(&r.bounding_box, scale);
                Token::new(text, left, top, w, h).with_confidence(r.confidence)
            })
            .collect();

        sort_by_reading_order(&mut tokens, self.config.row_height);

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} tokens in {}ms",
            tokens.len(),
            processing_time_ms
        );

        Ok(OcrResult {
            tokens,
            processing_time_ms,
            image_size: (width, height),
        })
    }
}

impl TokenSource for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        self.process(image)
    }
}

/// Convert a detection polygon to an axis-aligned `(left, top, width, height)`
/// rectangle in original image coordinates.
fn polygon_to_rect(polygon: &pure_onnx_ocr::Polygon<f64>, scale: f32) -> (i32, i32, i32, i32) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for coord in polygon.exterior().coords() {
        min_x = min_x.min(coord.x);
        min_y = min_y.min(coord.y);
        max_x = max_x.max(coord.x);
        max_y = max_y.max(coord.y);
    }

    if !min_x.is_finite() || !min_y.is_finite() {
        return (0, 0, 0, 0);
    }

    let unscale = if scale > 0.0 { 1.0 / scale as f64 } else { 1.0 };
    let left = (min_x * unscale).round() as i32;
    let top = (min_y * unscale).round() as i32;
    let width = ((max_x - min_x) * unscale).round() as i32;
    let height = ((max_y - min_y) * unscale).round() as i32;

    (left.max(0), top.max(0), width.max(0), height.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir_reports_missing_models() {
        let dir = tempfile::tempdir().unwrap();
        let models = ModelConfig::default();
        std::fs::write(dir.path().join(&models.recognition_model), b"").unwrap();

        let err = PureOcrEngine::from_dir(dir.path(), &models, OcrConfig::default())
            .err()
            .unwrap();

        match err {
            OcrError::ModelsMissing { dir: reported, missing } => {
                assert_eq!(reported, dir.path());
                assert_eq!(missing.len(), 2);
                assert!(!missing.iter().any(|m| m.ends_with(&models.recognition_model)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
