use std::collections::HashMap;

use image::{GrayImage, ImageFormat};
use loupe_config::ocr::OcrConfig;
use loupe_core::text::collapse_lines;
use rusty_tesseract::{Args, Image};

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("no text found")]
    NoText,

    #[error("OCR engine failed: {0}")]
    Engine(String),
}

/// Turns a preprocessed image into a single line of text
pub trait TextExtractor: Send + Sync {
    fn extract(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// Collapse raw engine output to one line; blank output is [`OcrError::NoText`].
pub fn finish_extraction(raw: &str) -> Result<String, OcrError> {
    let text = collapse_lines(raw);
    if text.is_empty() {
        return Err(OcrError::NoText);
    }
    Ok(text)
}

/// Tesseract through its command-line interface
pub struct TesseractExtractor {
    args: Args,
}

impl TesseractExtractor {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            args: Args {
                lang: config.language.clone(),
                config_variables: HashMap::new(),
                dpi: config.dpi,
                psm: Some(config.page_seg_mode),
                oem: Some(config.engine_mode),
            },
        }
    }

    /// Tesseract version string, or an error when the binary is missing
    pub fn version() -> Result<String, OcrError> {
        rusty_tesseract::get_tesseract_version().map_err(|e| OcrError::Engine(e.to_string()))
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract(&self, image: &GrayImage) -> Result<String, OcrError> {
        let file = tempfile::Builder::new()
            .prefix("loupe-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Engine(format!("temp file: {e}")))?;

        image
            .save_with_format(file.path(), ImageFormat::Png)
            .map_err(|e| OcrError::Engine(format!("encode: {e}")))?;

        let input = Image::from_path(file.path()).map_err(|e| OcrError::Engine(e.to_string()))?;
        let raw = rusty_tesseract::image_to_string(&input, &self.args)
            .map_err(|e| OcrError::Engine(e.to_string()))?;

        tracing::debug!("tesseract returned {} bytes", raw.len());
        finish_extraction(&raw)
    }
}
