mod capture;
mod input;
mod ocr;
mod preprocess;

pub use capture::{CaptureError, ScreenGrabber, XcapGrabber, primary_screen};
pub use input::{InputTracker, spawn_listener};
pub use ocr::{OcrError, TesseractExtractor, TextExtractor, finish_extraction};
pub use preprocess::{prepare_for_ocr, stretch_contrast, upscale};
