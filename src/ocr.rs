//! Character recognition interface and the tesseract-backed implementation

use std::collections::HashMap;

use anyhow::bail;
use image::RgbaImage;

/// Sentinel stored in a region's detected text when recognition fails.
/// Translation is never attempted on this value.
pub const RECOGNITION_FAILED: &str = "[OCR FAILED]";

/// A character-recognition engine taking a region's pixel crop
pub trait Recognizer: Send + Sync {
    fn recognize(&self, img: &RgbaImage) -> anyhow::Result<String>;
}

/// Recognizer backed by the system tesseract installation
#[derive(Clone, Debug)]
pub struct TesseractRecognizer {
    /// Tesseract language code, e.g. "eng" or "jpn"
    pub lang: String,
}

impl TesseractRecognizer {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, img: &RgbaImage) -> anyhow::Result<String> {
        use rusty_tesseract::{Args, Image};

        log::info!(
            "running OCR with rusty-tesseract on {}x{} crop",
            img.width(),
            img.height()
        );

        let dynamic_img = image::DynamicImage::ImageRgba8(img.clone());

        // Tesseract wants text at least 10-12 pixels tall; upscale small crops
        let min_dimension = img.width().min(img.height());
        let processed_img = if min_dimension < 100 {
            let (w, h) = (img.width() * 4, img.height() * 4);
            log::info!("upscaling small crop 4x to {}x{}", w, h);
            dynamic_img.resize(w, h, image::imageops::FilterType::Lanczos3)
        } else if min_dimension < 200 {
            let (w, h) = (img.width() * 2, img.height() * 2);
            log::info!("upscaling small crop 2x to {}x{}", w, h);
            dynamic_img.resize(w, h, image::imageops::FilterType::Lanczos3)
        } else {
            dynamic_img
        };

        let tess_img = match Image::from_dynamic_image(&processed_img) {
            Ok(img) => img,
            Err(e) => bail!("failed to create tesseract image: {e}"),
        };

        let dpi = if min_dimension < 200 { 300 } else { 150 };
        let args = Args {
            lang: self.lang.clone(),
            config_variables: HashMap::new(),
            dpi: Some(dpi),
            psm: Some(11), // Fully automatic page segmentation
            oem: Some(3),  // Default OCR Engine Mode
        };

        let text = match rusty_tesseract::image_to_string(&tess_img, &args) {
            Ok(text) => text.trim().to_string(),
            Err(e) => bail!("tesseract OCR failed: {e}"),
        };
        if text.is_empty() {
            bail!("no text detected in region");
        }
        Ok(text)
    }
}
