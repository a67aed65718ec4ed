use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image::{GrayImage, Rgb, RgbImage};
use loupe_config::gesture::GestureConfig;
use loupe_core::cache::TranslationCache;
use loupe_core::overlay::{Overlay, ResultPanel};
use loupe_ocr::{CaptureError, OcrError, ScreenGrabber, TextExtractor};
use loupe_translator::{CachedTranslator, ProviderMetadata, TranslateError, Translation, Translator};
use loupe_types::{AppEvent, InputEvent, Key, MouseButton, Point, Rect};

use crate::context::PipelineContext;
use crate::input::InputRouter;

pub enum FakeGrabber {
    /// Light text-ish noise the size of the requested region
    Screen,
    Fail,
    Panic,
}

impl ScreenGrabber for FakeGrabber {
    fn grab(&self, rect: Rect) -> Result<RgbImage, CaptureError> {
        match self {
            FakeGrabber::Screen => Ok(RgbImage::from_fn(rect.width(), rect.height(), |x, _| {
                if x % 7 == 0 { Rgb([20, 20, 20]) } else { Rgb([230, 230, 230]) }
            })),
            FakeGrabber::Fail => Err(CaptureError::NoMonitor),
            FakeGrabber::Panic => panic!("display server went away"),
        }
    }
}

/// Returns `wide` for images wider than `split`, `narrow` otherwise, and
/// records every image size it was given.
pub struct FakeExtractor {
    wide: String,
    narrow: String,
    split: u32,
    pub sizes: Mutex<Vec<(u32, u32)>>,
}

impl FakeExtractor {
    pub fn text(text: &str) -> Self {
        Self::by_width(text, text, 0)
    }

    pub fn by_width(wide: &str, narrow: &str, split: u32) -> Self {
        Self {
            wide: wide.to_string(),
            narrow: narrow.to_string(),
            split,
            sizes: Mutex::new(Vec::new()),
        }
    }
}

impl TextExtractor for FakeExtractor {
    fn extract(&self, image: &GrayImage) -> Result<String, OcrError> {
        self.sizes.lock().unwrap().push(image.dimensions());
        if image.width() > self.split {
            Ok(self.wide.clone())
        } else {
            Ok(self.narrow.clone())
        }
    }
}

/// Dictionary translator; `SLOW` takes a while to answer
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, _from: &str, _to: &str) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = match text {
            "HELLO WORLD" => "BONJOUR LE MONDE",
            "GOOD MORNING" => "BONJOUR",
            "SLOW" => {
                tokio::time::sleep(Duration::from_millis(300)).await;
                "LENT"
            }
            "FAST" => "RAPIDE",
            _ => return Err(TranslateError::ApiError(format!("no entry for {text:?}"))),
        };
        Ok(Translation {
            text: reply.to_string(),
            provider: "fake".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<String>,
}

impl Overlay for Recorder {
    fn show(&mut self, panel: &ResultPanel) {
        self.calls.push(format!("show:{}", panel.visible_text()));
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(format!("error:{message}"));
    }

    fn hide(&mut self) {
        self.calls.push("hide".into());
    }

    fn show_selection(&mut self, rect: Rect) {
        self.calls
            .push(format!("band:{}x{}", rect.width(), rect.height()));
    }

    fn hide_selection(&mut self) {
        self.calls.push("band-off".into());
    }
}

/// Channels, fakes and a router wired the way the controller wires them.
/// The test plays the UI thread: it reads `ui_rx` and forwards cleared
/// regions through `app_tx`.
pub struct Harness {
    pub router: InputRouter,
    pub ui_rx: kanal::AsyncReceiver<AppEvent>,
    pub app_tx: kanal::Sender<AppEvent>,
    pub app_rx: kanal::AsyncReceiver<AppEvent>,
    pub ctx: PipelineContext,
    pub extractor: Arc<FakeExtractor>,
    pub translator: Arc<FakeTranslator>,
    pub cache: Arc<TranslationCache>,
}

impl Harness {
    pub fn new(grabber: FakeGrabber, extractor: FakeExtractor) -> Self {
        let (app_tx, app_rx) = kanal::unbounded();
        let (ui_tx, ui_rx) = kanal::unbounded_async();

        let extractor = Arc::new(extractor);
        let translator = Arc::new(FakeTranslator::default());
        let cache = Arc::new(TranslationCache::new(std::num::NonZeroUsize::new(16).unwrap()));
        let cached = CachedTranslator::new(translator.clone(), cache.clone(), "en", "fr");

        let ctx = PipelineContext::new(
            Arc::new(grabber),
            extractor.clone(),
            Arc::new(cached),
            2,
            ui_tx.clone(),
        );
        let router = InputRouter::new(&GestureConfig::default(), ui_tx.clone_sync());

        Self {
            router,
            ui_rx,
            app_tx,
            app_rx: app_rx.to_async(),
            ctx,
            extractor,
            translator,
            cache,
        }
    }

    pub fn translator_calls(&self) -> usize {
        self.translator.calls.load(Ordering::SeqCst)
    }

    /// Ctrl+Alt held, left button dragged from `from` to `to`
    pub fn drag(&mut self, from: (i32, i32), to: (i32, i32)) {
        let from = Point::new(from.0, from.1);
        let to = Point::new(to.0, to.1);
        for event in [
            InputEvent::KeyDown(Key::Ctrl),
            InputEvent::KeyDown(Key::Alt),
            InputEvent::PointerMoved(from),
            InputEvent::ButtonDown {
                button: MouseButton::Left,
                at: from,
            },
            InputEvent::PointerMoved(to),
            InputEvent::ButtonUp {
                button: MouseButton::Left,
                at: to,
            },
            InputEvent::KeyUp(Key::Alt),
            InputEvent::KeyUp(Key::Ctrl),
        ] {
            self.router.route(event);
        }
    }
}
