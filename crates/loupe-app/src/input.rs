use kanal::Sender;
use loupe_config::gesture::GestureConfig;
use loupe_core::gesture::{GestureOutput, GestureRecognizer};
use loupe_types::{AppEvent, InputEvent, UiEvent};

/// Owns the gesture recognizer on the listener thread and forwards what it
/// produces to the UI thread.
///
/// Capture requests go to the UI as well: it hides the selection band and
/// only then hands the region to the app, so the band never ends up in the
/// captured pixels. The sender is unbounded so the listener never waits.
pub struct InputRouter {
    recognizer: GestureRecognizer,
    ui_tx: Sender<AppEvent>,
}

impl InputRouter {
    pub fn new(config: &GestureConfig, ui_tx: Sender<AppEvent>) -> Self {
        Self {
            recognizer: GestureRecognizer::new(config),
            ui_tx,
        }
    }

    pub fn route(&mut self, event: InputEvent) {
        let Some(output) = self.recognizer.handle(event) else {
            return;
        };

        match output {
            GestureOutput::SelectionShown(rect) => self.to_ui(AppEvent::SelectionStarted(rect)),
            GestureOutput::SelectionMoved(rect) => self.to_ui(AppEvent::SelectionChanged(rect)),
            GestureOutput::DragFinished { request: None } => self.to_ui(AppEvent::SelectionEnded),
            GestureOutput::DragFinished {
                request: Some(request),
            } => {
                tracing::debug!(
                    "[INPUT] region #{} {}x{}",
                    request.sequence,
                    request.rect.width(),
                    request.rect.height()
                );
                self.to_ui(AppEvent::RegionSelected(request));
            }
            GestureOutput::ClosePanel => self.to_ui(AppEvent::UiEvent(UiEvent::ClosePanel)),
            GestureOutput::Quit => {
                tracing::info!("[INPUT] quit key pressed");
                self.to_ui(AppEvent::UiEvent(UiEvent::Quit));
            }
        }
    }

    fn to_ui(&self, event: AppEvent) {
        if self.ui_tx.send(event).is_err() {
            tracing::debug!("[INPUT] UI gone");
        }
    }
}
