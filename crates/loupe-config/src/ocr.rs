use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "eng".to_string()
}

fn default_page_seg_mode() -> i32 {
    6
}

fn default_engine_mode() -> i32 {
    3
}

fn default_upscale() -> u32 {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language pack
    #[serde(default = "default_language")]
    pub language: String,
    /// Tesseract `--psm`; 6 assumes a single uniform block of text
    #[serde(default = "default_page_seg_mode")]
    pub page_seg_mode: i32,
    /// Tesseract `--oem`
    #[serde(default = "default_engine_mode")]
    pub engine_mode: i32,
    #[serde(default = "default_upscale")]
    pub upscale: u32,
    pub dpi: Option<i32>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            page_seg_mode: default_page_seg_mode(),
            engine_mode: default_engine_mode(),
            upscale: default_upscale(),
            dpi: None,
        }
    }
}
