use loupe_config::gesture::GestureConfig;
use loupe_types::{CaptureRequest, InputEvent, Key, MouseButton, Point, Rect};

use crate::geometry::{is_capturable, normalize};

/// Observable phase of the selection gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// Every configured modifier is held, no button down
    Armed,
    /// Button down, pointer still within the move threshold
    PressedNoMove,
    /// Live selection band is visible
    Dragging,
}

/// What the recognizer asks the rest of the app to do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutput {
    SelectionShown(Rect),
    SelectionMoved(Rect),
    /// The band must be hidden. `request` is `None` when the region was too
    /// small to be worth capturing.
    DragFinished { request: Option<CaptureRequest> },
    ClosePanel,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Pressed { start: Point },
    Dragging { start: Point },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ModifierSet(u8);

impl ModifierSet {
    fn bit(key: Key) -> u8 {
        match key {
            Key::Ctrl => 1,
            Key::Alt => 1 << 1,
            Key::Shift => 1 << 2,
            Key::Meta => 1 << 3,
            _ => 0,
        }
    }

    fn from_keys(keys: &[Key]) -> Self {
        Self(keys.iter().fold(0, |acc, &k| acc | Self::bit(k)))
    }

    fn insert(&mut self, key: Key) {
        self.0 |= Self::bit(key);
    }

    fn remove(&mut self, key: Key) {
        self.0 &= !Self::bit(key);
    }

    fn contains_all(self, other: ModifierSet) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Turns raw key/mouse events into selected screen regions.
///
/// Every transition is constant time so listener callbacks never stall.
/// Once a drag has started, only the button governs its lifecycle: letting go
/// of the modifiers mid-drag does not abort it.
pub struct GestureRecognizer {
    required: ModifierSet,
    held: ModifierSet,
    phase: Phase,
    move_threshold: u32,
    min_region_size: u32,
    quit_key: Key,
    close_key: Key,
    last_sequence: u64,
}

impl GestureRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            required: ModifierSet::from_keys(&config.modifiers),
            held: ModifierSet::default(),
            phase: Phase::Idle,
            move_threshold: config.move_threshold,
            min_region_size: config.min_region_size,
            quit_key: config.quit_key,
            close_key: config.close_key,
            last_sequence: 0,
        }
    }

    pub fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle if self.is_armed() => GestureState::Armed,
            Phase::Idle => GestureState::Idle,
            Phase::Pressed { .. } => GestureState::PressedNoMove,
            Phase::Dragging { .. } => GestureState::Dragging,
        }
    }

    /// Sequence number of the most recent capture request, 0 if none yet
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    fn is_armed(&self) -> bool {
        self.held.contains_all(self.required)
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<GestureOutput> {
        match event {
            InputEvent::KeyDown(key) if key == self.quit_key => Some(GestureOutput::Quit),
            InputEvent::KeyDown(key) if key == self.close_key => Some(GestureOutput::ClosePanel),
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
                None
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(key);
                None
            }
            InputEvent::ButtonDown {
                button: MouseButton::Left,
                at,
            } => {
                if matches!(self.phase, Phase::Idle) && self.is_armed() {
                    tracing::debug!("selection pressed at {:?}", at);
                    self.phase = Phase::Pressed { start: at };
                }
                None
            }
            InputEvent::PointerMoved(at) => self.on_move(at),
            InputEvent::ButtonUp {
                button: MouseButton::Left,
                at,
            } => self.on_release(at),
            InputEvent::ButtonDown { .. } | InputEvent::ButtonUp { .. } => None,
        }
    }

    fn on_move(&mut self, at: Point) -> Option<GestureOutput> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { start } => {
                if start.manhattan_distance(at) > self.move_threshold {
                    self.phase = Phase::Dragging { start };
                    Some(GestureOutput::SelectionShown(normalize(start, at)))
                } else {
                    None
                }
            }
            Phase::Dragging { start } => Some(GestureOutput::SelectionMoved(normalize(start, at))),
        }
    }

    fn on_release(&mut self, at: Point) -> Option<GestureOutput> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Idle => None,
            Phase::Pressed { .. } => {
                tracing::debug!("click without drag, ignored");
                None
            }
            Phase::Dragging { start } => {
                let rect = normalize(start, at);
                if !is_capturable(&rect, self.min_region_size) {
                    tracing::debug!(
                        "selection {}x{} below {}px, dropped",
                        rect.width(),
                        rect.height(),
                        self.min_region_size
                    );
                    return Some(GestureOutput::DragFinished { request: None });
                }

                self.last_sequence += 1;
                Some(GestureOutput::DragFinished {
                    request: Some(CaptureRequest {
                        rect,
                        sequence: self.last_sequence,
                    }),
                })
            }
        }
    }
}
