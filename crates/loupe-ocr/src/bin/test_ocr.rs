//! Manual capture + OCR probe - run with:
//! cargo run -p loupe-ocr --bin test_ocr -- <left> <top> <width> <height>

use anyhow::{Context, Result};
use loupe_config::ocr::OcrConfig;
use loupe_ocr::{ScreenGrabber, TesseractExtractor, TextExtractor, XcapGrabber, prepare_for_ocr};
use loupe_types::Rect;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let args: Vec<i32> = std::env::args()
        .skip(1)
        .map(|a| a.parse().context("arguments must be integers"))
        .collect::<Result<_>>()?;
    let &[left, top, width, height] = args.as_slice() else {
        anyhow::bail!("usage: test_ocr <left> <top> <width> <height>");
    };
    let rect = Rect {
        left,
        top,
        right: left + width,
        bottom: top + height,
    };

    tracing::info!("tesseract: {}", TesseractExtractor::version()?);

    let start = std::time::Instant::now();
    let captured = XcapGrabber.grab(rect)?;
    tracing::info!("captured {:?} in {:?}", captured.dimensions(), start.elapsed());

    let config = OcrConfig::default();
    let prepared = prepare_for_ocr(&captured, config.upscale);
    prepared
        .save("test_capture.png")
        .context("failed to save test_capture.png")?;
    tracing::info!("preprocessed image saved to test_capture.png");

    let start = std::time::Instant::now();
    let text = TesseractExtractor::new(&config).extract(&prepared)?;
    tracing::info!("OCR took {:?}: {}", start.elapsed(), text);
    Ok(())
}
