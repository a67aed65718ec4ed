use std::sync::Arc;

use anyhow::{Context, bail};
use kanal::AsyncSender;
use loupe_ocr::{ScreenGrabber, TesseractExtractor, TextExtractor, XcapGrabber};
use loupe_translator::{CachedTranslator, MyMemoryTranslator, Translator};
use loupe_types::AppEvent;

use crate::state::AppState;

/// Everything one pipeline worker needs, bundled so a worker takes a single
/// cheap clone instead of a handful of arguments.
#[derive(Clone)]
pub struct PipelineContext {
    pub grabber: Arc<dyn ScreenGrabber>,
    pub extractor: Arc<dyn TextExtractor>,
    pub translator: Arc<CachedTranslator>,
    /// Integer factor applied before OCR
    pub upscale: u32,
    pub event_tx: AsyncSender<AppEvent>,
}

impl PipelineContext {
    pub fn new(
        grabber: Arc<dyn ScreenGrabber>,
        extractor: Arc<dyn TextExtractor>,
        translator: Arc<CachedTranslator>,
        upscale: u32,
        event_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            grabber,
            extractor,
            translator,
            upscale,
            event_tx,
        }
    }

    /// Production adapters configured from `state`
    pub fn from_state(state: &AppState, event_tx: AsyncSender<AppEvent>) -> anyhow::Result<Self> {
        let config = &state.config;

        let backend: Arc<dyn Translator> = match config.translator.provider.as_str() {
            "mymemory" => Arc::new(
                MyMemoryTranslator::new(&config.translator)
                    .context("failed to build MyMemory client")?,
            ),
            other => bail!("unknown translation provider {other:?}"),
        };
        let translator = CachedTranslator::new(
            backend,
            state.cache.clone(),
            config.translator.from_lang.clone(),
            config.translator.to_lang.clone(),
        );

        let provider = translator.provider();
        tracing::info!(
            "Translating {} -> {} via {} (api key required: {}, free tier: {})",
            translator.from_lang(),
            translator.to_lang(),
            provider.name,
            provider.requires_api_key,
            provider.free_tier_available
        );

        Ok(Self::new(
            Arc::new(XcapGrabber),
            Arc::new(TesseractExtractor::new(&config.ocr)),
            Arc::new(translator),
            config.ocr.upscale,
            event_tx,
        ))
    }
}
