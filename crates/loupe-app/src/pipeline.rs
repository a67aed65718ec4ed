use std::time::Instant;

use loupe_ocr::{CaptureError, OcrError, finish_extraction, prepare_for_ocr};
use loupe_translator::TranslateError;
use loupe_types::{AppEvent, CaptureRequest, TranslationResult};
use tokio::task::JoinHandle;

use crate::context::PipelineContext;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("worker failed: {0}")]
    Worker(String),
}

impl PipelineError {
    /// Short text for the error panel
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Capture(e) => format!("Screen capture failed: {e}"),
            PipelineError::Ocr(OcrError::NoText) => "No text found in the selected region".into(),
            PipelineError::Ocr(e) => format!("Text recognition failed: {e}"),
            PipelineError::Translate(TranslateError::Timeout) => "Translation timed out".into(),
            PipelineError::Translate(e) => format!("Translation failed: {e}"),
            PipelineError::Worker(e) => format!("Internal error: {e}"),
        }
    }
}

/// Fans capture requests out to one detached worker each
pub struct PipelineOrchestrator {
    ctx: PipelineContext,
}

impl PipelineOrchestrator {
    pub fn new(ctx: PipelineContext) -> Self {
        Self { ctx }
    }

    /// Start a worker for `request` and return immediately.
    ///
    /// The worker always reports back with either `ShowResult` or `ShowError`
    /// tagged with the request's sequence. Earlier workers are left running.
    pub fn dispatch(&self, request: CaptureRequest) -> JoinHandle<()> {
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            let sequence = request.sequence;
            let event = match run_pipeline(&ctx, request).await {
                Ok(result) => AppEvent::ShowResult(result),
                Err(e) => {
                    tracing::warn!("[PIPELINE] #{} failed: {}", sequence, e);
                    AppEvent::ShowError {
                        sequence,
                        message: e.user_message(),
                    }
                }
            };

            if ctx.event_tx.send(event).await.is_err() {
                tracing::debug!("[PIPELINE] UI gone, dropping outcome of #{}", sequence);
            }
        })
    }
}

/// Capture, preprocess, recognize and translate one region.
pub async fn run_pipeline(
    ctx: &PipelineContext,
    request: CaptureRequest,
) -> Result<TranslationResult, PipelineError> {
    let started = Instant::now();
    let grabber = ctx.grabber.clone();
    let extractor = ctx.extractor.clone();
    let factor = ctx.upscale;

    // Capture and tesseract block; keep them off the async workers
    let source_text = tokio::task::spawn_blocking(move || -> Result<String, PipelineError> {
        let image = grabber.grab(request.rect)?;
        tracing::debug!(
            "[PIPELINE] #{} captured {}x{}",
            request.sequence,
            image.width(),
            image.height()
        );
        let prepared = prepare_for_ocr(&image, factor);
        let raw = extractor.extract(&prepared)?;
        Ok(finish_extraction(&raw)?)
    })
    .await
    .map_err(|e| PipelineError::Worker(e.to_string()))??;

    tracing::debug!(
        "[PIPELINE] #{} recognized {} chars in {:?}",
        request.sequence,
        source_text.len(),
        started.elapsed()
    );

    let translated_text = ctx.translator.translate(&source_text).await?;

    tracing::info!(
        "[PIPELINE] #{} done in {:?}",
        request.sequence,
        started.elapsed()
    );

    Ok(TranslationResult {
        sequence: request.sequence,
        source_text,
        translated_text,
        from_lang: ctx.translator.from_lang().to_string(),
        to_lang: ctx.translator.to_lang().to_string(),
    })
}
