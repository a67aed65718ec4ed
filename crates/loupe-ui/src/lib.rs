use std::rc::Rc;

use kanal::{AsyncReceiver, Sender};
use loupe_config::ui::UiConfig;
use loupe_core::overlay::OverlaySlot;
use loupe_types::{AppEvent, Rect, UiEvent};
use slint::ComponentHandle;

mod clipboard;
mod events;
mod overlay;

use events::UiHandler;

pub use overlay::{SlintOverlay, panel_position};

slint::include_modules!();

const FALLBACK_SCREEN: Rect = Rect {
    left: 0,
    top: 0,
    right: 1920,
    bottom: 1080,
};

/// Run the overlay on the calling thread until a quit request arrives or
/// every sender of `app_to_ui_rx` is gone.
///
/// Selected regions come in through `app_to_ui_rx` and leave through
/// `ui_to_app_tx` once the selection band is off the screen.
pub fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: Sender<AppEvent>,
    config: &UiConfig,
) -> anyhow::Result<()> {
    let panel = PanelWindow::new()?;
    let selection = SelectionWindow::new()?;

    let screen = loupe_ocr::primary_screen().unwrap_or_else(|e| {
        tracing::warn!("could not read screen bounds ({e}), assuming 1920x1080");
        FALLBACK_SCREEN
    });
    tracing::debug!(
        "[SLINT] primary screen {}x{}",
        screen.width(),
        screen.height()
    );

    let overlay = SlintOverlay::new(panel.as_weak(), selection.as_weak(), screen, config.clone());
    let handler = Rc::new(UiHandler::new(
        OverlaySlot::new(overlay, config.discard_stale_results),
        ui_to_app_tx,
    ));

    // Panel buttons feed the same slot as backend events
    {
        let handler = handler.clone();
        panel.on_close(move || {
            handler.handle(AppEvent::UiEvent(UiEvent::ClosePanel));
        });
    }
    {
        let handler = handler.clone();
        panel.on_toggle_language(move || {
            handler.handle(AppEvent::UiEvent(UiEvent::ToggleLanguage));
        });
    }
    {
        let handler = handler.clone();
        panel.on_copy_text(move || {
            handler.handle(AppEvent::UiEvent(UiEvent::CopyText));
        });
    }

    slint::spawn_local(async move {
        while let Ok(event) = app_to_ui_rx.recv().await {
            if !handler.handle(event) {
                return;
            }
        }
        tracing::info!("[SLINT] backend channel closed");
        slint::quit_event_loop().ok();
    })?;

    // Both windows start hidden, so the loop must not stop when none is visible
    slint::run_event_loop_until_quit()?;

    panel.hide().ok();
    selection.hide().ok();
    Ok(())
}
