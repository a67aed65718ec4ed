use loupe_config::ui::UiConfig;
use loupe_core::overlay::{Overlay, ResultPanel};
use loupe_types::Rect;
use slint::{ComponentHandle, PhysicalPosition, PhysicalSize, Weak};

use crate::{PanelWindow, SelectionWindow};

/// Top-left corner of the result panel: pinned to the top-right of `screen`,
/// never pushed past its left edge.
pub fn panel_position(screen: Rect, config: &UiConfig) -> (i32, i32) {
    let width = i32::try_from(config.panel_width).unwrap_or(i32::MAX);
    let x = screen
        .right
        .saturating_sub(config.margin_right)
        .saturating_sub(width)
        .max(screen.left);
    let y = screen.top.saturating_add(config.margin_top);
    (x, y)
}

/// [`Overlay`] backed by the two Slint windows. Lives on the UI thread.
pub struct SlintOverlay {
    panel: Weak<PanelWindow>,
    selection: Weak<SelectionWindow>,
    screen: Rect,
    config: UiConfig,
}

impl SlintOverlay {
    pub fn new(
        panel: Weak<PanelWindow>,
        selection: Weak<SelectionWindow>,
        screen: Rect,
        config: UiConfig,
    ) -> Self {
        Self {
            panel,
            selection,
            screen,
            config,
        }
    }

    fn present(&self, heading: String, body: &str, toggle_label: String, is_error: bool) {
        let Some(window) = self.panel.upgrade() else {
            return;
        };
        window.set_heading(heading.into());
        window.set_body(body.into());
        window.set_toggle_label(toggle_label.into());
        window.set_is_error(is_error);

        let (x, y) = panel_position(self.screen, &self.config);
        window
            .window()
            .set_size(PhysicalSize::new(self.config.panel_width, self.config.panel_height));
        window.window().set_position(PhysicalPosition::new(x, y));
        if let Err(e) = window.show() {
            tracing::warn!("failed to show result panel: {e}");
        }
    }
}

impl Overlay for SlintOverlay {
    fn show(&mut self, panel: &ResultPanel) {
        tracing::debug!("[SLINT] showing result #{}", panel.sequence);
        self.present(
            panel.title(),
            panel.visible_text(),
            panel.toggle_label(),
            false,
        );
    }

    fn show_error(&mut self, message: &str) {
        tracing::debug!("[SLINT] showing error: {message}");
        self.present("Error".to_string(), message, String::new(), true);
    }

    fn hide(&mut self) {
        if let Some(window) = self.panel.upgrade() {
            window.hide().ok();
        }
    }

    fn show_selection(&mut self, rect: Rect) {
        let Some(window) = self.selection.upgrade() else {
            return;
        };
        window
            .window()
            .set_position(PhysicalPosition::new(rect.left, rect.top));
        window
            .window()
            .set_size(PhysicalSize::new(rect.width().max(1), rect.height().max(1)));
        if let Err(e) = window.show() {
            tracing::warn!("failed to show selection band: {e}");
        }
    }

    fn hide_selection(&mut self) {
        if let Some(window) = self.selection.upgrade() {
            window.hide().ok();
        }
    }
}
