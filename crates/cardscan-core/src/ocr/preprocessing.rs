//! Image preprocessing for OCR.

use image::{DynamicImage, GenericImageView};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Image preprocessor run before recognition.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
    /// Grayscale and Otsu-binarize the image.
    binarize: bool,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self {
            max_size: 2048,
            binarize: false,
        }
    }

    /// Create a preprocessor from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new()
            .with_max_size(config.max_image_size)
            .with_binarize(config.preprocess)
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Enable or disable binarization.
    pub fn with_binarize(mut self, binarize: bool) -> Self {
        self.binarize = binarize;
        self
    }

    /// Prepare an image for recognition.
    ///
    /// Returns the prepared image and the scale factor applied to it, so
    /// token coordinates can be mapped back to the original image.
    pub fn prepare(&self, image: &DynamicImage) -> Result<(DynamicImage, f32), OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!(
                "image has zero dimension: {}x{}",
                width, height
            )));
        }

        let (new_width, new_height) = self.calculate_resize_dimensions(width, height);
        let scale = new_width as f32 / width as f32;

        let mut prepared = if (new_width, new_height) != (width, height) {
            debug!(
                "Resizing image from {}x{} to {}x{}",
                width, height, new_width, new_height
            );
            image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
        } else {
            image.clone()
        };

        if self.binarize {
            let gray = prepared.to_luma8();
            let level = otsu_level(&gray);
            debug!("Binarizing with Otsu threshold {}", level);
            prepared = DynamicImage::ImageLuma8(threshold(&gray, level, ThresholdType::Binary));
        }

        Ok((prepared, scale))
    }

    fn calculate_resize_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = width.max(height);

        if self.max_size == 0 || max_dim <= self.max_size {
            return (width, height);
        }

        let scale = self.max_size as f32 / max_dim as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        (new_width.max(1), new_height.max(1))
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_resize_dimensions() {
        let preprocessor = ImagePreprocessor::new().with_max_size(960);

        // Image smaller than target
        let (w, h) = preprocessor.calculate_resize_dimensions(500, 300);
        assert_eq!((w, h), (500, 300));

        // Image larger than target
        let (w, h) = preprocessor.calculate_resize_dimensions(1920, 1080);
        assert_eq!(w, 960);
        assert!(h < 960);
    }

    #[test]
    fn test_binarize_splits_bimodal_image() {
        let mut image = GrayImage::new(10, 2);
        for x in 0..10 {
            image.put_pixel(x, 0, Luma([20]));
            image.put_pixel(x, 1, Luma([220]));
        }

        let preprocessor = ImagePreprocessor::new().with_binarize(true);
        let (prepared, _) = preprocessor
            .prepare(&DynamicImage::ImageLuma8(image))
            .unwrap();

        let binary = prepared.to_luma8();
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
        assert_eq!(binary.get_pixel(0, 1)[0], 255);
    }

    #[test]
    fn test_prepare_binarizes_and_scales() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(400, 200, Luma([200])));
        let preprocessor = ImagePreprocessor::new()
            .with_max_size(200)
            .with_binarize(true);

        let (prepared, scale) = preprocessor.prepare(&image).unwrap();
        assert_eq!(prepared.dimensions(), (200, 100));
        assert!((scale - 0.5).abs() < f32::EPSILON);
        assert!(matches!(prepared, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_prepare_rejects_empty_image() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        let err = ImagePreprocessor::new().prepare(&image).unwrap_err();
        assert!(matches!(err, OcrError::InvalidImage(_)));
    }
}
