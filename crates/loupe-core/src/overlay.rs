use loupe_types::{AppEvent, CaptureRequest, Rect, TranslationResult, UiEvent};

/// Contents of the result panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub sequence: u64,
    pub source_text: String,
    pub translated_text: String,
    pub from_lang: String,
    pub to_lang: String,
    /// Showing the recognized text instead of its translation
    pub showing_source: bool,
}

impl ResultPanel {
    pub fn visible_text(&self) -> &str {
        if self.showing_source {
            &self.source_text
        } else {
            &self.translated_text
        }
    }

    pub fn title(&self) -> String {
        if self.showing_source {
            format!("Original ({})", self.from_lang.to_uppercase())
        } else {
            format!("Translation ({})", self.to_lang.to_uppercase())
        }
    }

    /// Label of the language toggle, e.g. `EN / FR`
    pub fn toggle_label(&self) -> String {
        format!(
            "{} / {}",
            self.from_lang.to_uppercase(),
            self.to_lang.to_uppercase()
        )
    }
}

impl From<TranslationResult> for ResultPanel {
    fn from(result: TranslationResult) -> Self {
        Self {
            sequence: result.sequence,
            source_text: result.source_text,
            translated_text: result.translated_text,
            from_lang: result.from_lang,
            to_lang: result.to_lang,
            showing_source: false,
        }
    }
}

/// Window-system side of the overlay. Only ever called on the interactive
/// thread.
pub trait Overlay {
    /// Display `panel`, updating the visible panel in place if there is one
    fn show(&mut self, panel: &ResultPanel);

    fn show_error(&mut self, message: &str);

    /// Destroy the visible panel, if any
    fn hide(&mut self);

    fn show_selection(&mut self, rect: Rect);

    fn hide_selection(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Result(ResultPanel),
    Error,
}

/// What the caller still has to do after [`OverlaySlot::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    None,
    /// Put this text on the clipboard
    Copy(String),
    /// The selection band is gone; the region may now be captured
    Dispatch(CaptureRequest),
    Quit,
}

/// Single-slot owner of the visible result panel.
///
/// A new result always tears the previous panel down before showing itself.
/// With `discard_stale` set, results from gestures older than the one already
/// presented are dropped, so a slow worker cannot overwrite a newer answer.
pub struct OverlaySlot<O> {
    overlay: O,
    slot: Slot,
    last_sequence: u64,
    discard_stale: bool,
}

impl<O: Overlay> OverlaySlot<O> {
    pub fn new(overlay: O, discard_stale: bool) -> Self {
        Self {
            overlay,
            slot: Slot::Empty,
            last_sequence: 0,
            discard_stale,
        }
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn current(&self) -> Option<&ResultPanel> {
        match &self.slot {
            Slot::Result(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.slot, Slot::Empty)
    }

    pub fn handle(&mut self, event: AppEvent) -> SlotAction {
        match event {
            AppEvent::SelectionStarted(rect) | AppEvent::SelectionChanged(rect) => {
                self.overlay.show_selection(rect);
            }
            AppEvent::SelectionEnded => self.overlay.hide_selection(),
            AppEvent::ShowResult(result) => self.present(result),
            AppEvent::ShowError { sequence, message } => self.present_error(sequence, &message),
            AppEvent::UiEvent(UiEvent::ClosePanel) => self.close(),
            AppEvent::UiEvent(UiEvent::ToggleLanguage) => self.toggle(),
            AppEvent::UiEvent(UiEvent::CopyText) => {
                if let Some(panel) = self.current() {
                    return SlotAction::Copy(panel.visible_text().to_string());
                }
            }
            AppEvent::UiEvent(UiEvent::Quit) => {
                self.close();
                self.overlay.hide_selection();
                return SlotAction::Quit;
            }
            AppEvent::RegionSelected(request) => {
                self.overlay.hide_selection();
                return SlotAction::Dispatch(request);
            }
        }
        SlotAction::None
    }

    fn accepts(&self, sequence: u64) -> bool {
        if self.discard_stale && sequence < self.last_sequence {
            tracing::debug!(
                "dropping stale result #{} (showing #{})",
                sequence,
                self.last_sequence
            );
            return false;
        }
        true
    }

    fn present(&mut self, result: TranslationResult) {
        if !self.accepts(result.sequence) {
            return;
        }
        self.last_sequence = self.last_sequence.max(result.sequence);

        let panel = ResultPanel::from(result);
        if self.is_visible() {
            self.overlay.hide();
        }
        self.overlay.show(&panel);
        self.slot = Slot::Result(panel);
    }

    fn present_error(&mut self, sequence: u64, message: &str) {
        if !self.accepts(sequence) {
            return;
        }
        self.last_sequence = self.last_sequence.max(sequence);

        if self.is_visible() {
            self.overlay.hide();
        }
        self.overlay.show_error(message);
        self.slot = Slot::Error;
    }

    fn close(&mut self) {
        if self.is_visible() {
            self.overlay.hide();
            self.slot = Slot::Empty;
        }
    }

    fn toggle(&mut self) {
        if let Slot::Result(panel) = &mut self.slot {
            panel.showing_source = !panel.showing_source;
            self.overlay.show(panel);
        }
    }
}
