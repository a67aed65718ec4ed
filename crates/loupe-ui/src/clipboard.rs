use arboard::Clipboard;

/// Lazily opened system clipboard.
///
/// The handle is kept for the life of the UI: on X11 and Wayland the copied
/// text is only served while its owner is alive.
#[derive(Default)]
pub struct ClipboardWriter {
    clipboard: Option<Clipboard>,
}

impl ClipboardWriter {
    pub fn copy_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match &mut self.clipboard {
            Some(clipboard) => clipboard,
            slot => slot.insert(Clipboard::new()?),
        };
        clipboard.set_text(text)
    }
}
