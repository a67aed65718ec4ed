use serde::{Deserialize, Serialize};

/// Screen position in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|` between two points
    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Screen rectangle in device pixels.
///
/// Built through `loupe_core::geometry::normalize`, which guarantees
/// `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> u32 {
        span(self.left, self.right)
    }

    pub fn height(&self) -> u32 {
        span(self.top, self.bottom)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

// Exact over the whole i32 range; inverted bounds count as empty
fn span(low: i32, high: i32) -> u32 {
    if high > low { high.abs_diff(low) } else { 0 }
}

/// One completed gesture, handed to exactly one pipeline worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    pub rect: Rect,
    /// Strictly increasing per process
    pub sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Ctrl,
    Alt,
    Shift,
    Meta,
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    /// Anything the recognizer does not care about
    Other,
}

impl Key {
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Ctrl | Key::Alt | Key::Shift | Key::Meta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Raw input as delivered by the platform listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown { button: MouseButton, at: Point },
    ButtonUp { button: MouseButton, at: Point },
    PointerMoved(Point),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub sequence: u64,
    pub source_text: String,
    pub translated_text: String,
    pub from_lang: String,
    pub to_lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Live selection band became visible
    SelectionStarted(Rect),
    SelectionChanged(Rect),
    SelectionEnded,
    /// Listener to UI, then UI to app once the band is hidden
    RegionSelected(CaptureRequest),
    ShowResult(TranslationResult),
    ShowError {
        sequence: u64,
        message: String,
    },
    UiEvent(UiEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ClosePanel,
    ToggleLanguage,
    CopyText,
    Quit,
}
