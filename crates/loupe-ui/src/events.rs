use std::cell::RefCell;

use kanal::Sender;
use loupe_core::overlay::{Overlay, OverlaySlot, SlotAction};
use loupe_types::AppEvent;

use crate::clipboard::ClipboardWriter;

/// UI-thread state shared by the backend drain loop and the panel callbacks
pub struct UiHandler<O> {
    slot: RefCell<OverlaySlot<O>>,
    clipboard: RefCell<ClipboardWriter>,
    ui_to_app_tx: Sender<AppEvent>,
}

impl<O: Overlay> UiHandler<O> {
    pub fn new(slot: OverlaySlot<O>, ui_to_app_tx: Sender<AppEvent>) -> Self {
        Self {
            slot: RefCell::new(slot),
            clipboard: RefCell::new(ClipboardWriter::default()),
            ui_to_app_tx,
        }
    }

    /// Feed one event to the overlay slot and carry out what it asks for.
    ///
    /// Returns `false` once the event loop has been told to quit.
    pub fn handle(&self, event: AppEvent) -> bool {
        let action = self.slot.borrow_mut().handle(event);
        match action {
            SlotAction::None => true,
            SlotAction::Copy(text) => {
                match self.clipboard.borrow_mut().copy_text(&text) {
                    Ok(()) => tracing::debug!("[SLINT] copied {} chars", text.len()),
                    Err(e) => tracing::warn!("clipboard write failed: {e}"),
                }
                true
            }
            SlotAction::Dispatch(request) => {
                // Only now, with the band hidden, may the worker read the screen
                if self
                    .ui_to_app_tx
                    .send(AppEvent::RegionSelected(request))
                    .is_err()
                {
                    tracing::warn!("[SLINT] app loop gone, dropping region #{}", request.sequence);
                }
                true
            }
            SlotAction::Quit => {
                tracing::info!("[SLINT] quit requested");
                slint::quit_event_loop().ok();
                false
            }
        }
    }
}
