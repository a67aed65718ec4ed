use std::collections::BTreeSet;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use device_query::{DeviceQuery, DeviceState, Keycode};
use loupe_types::{InputEvent, Key, MouseButton, Point};
use tokio_util::sync::CancellationToken;

fn map_keycode(code: &Keycode) -> Key {
    match code {
        Keycode::LControl | Keycode::RControl => Key::Ctrl,
        Keycode::LAlt | Keycode::RAlt => Key::Alt,
        Keycode::LShift | Keycode::RShift => Key::Shift,
        Keycode::LMeta | Keycode::RMeta => Key::Meta,
        Keycode::Escape => Key::Escape,
        Keycode::F1 => Key::F1,
        Keycode::F2 => Key::F2,
        Keycode::F3 => Key::F3,
        Keycode::F4 => Key::F4,
        Keycode::F5 => Key::F5,
        Keycode::F6 => Key::F6,
        Keycode::F7 => Key::F7,
        Keycode::F8 => Key::F8,
        Keycode::F9 => Key::F9,
        Keycode::F10 => Key::F10,
        Keycode::F11 => Key::F11,
        Keycode::F12 => Key::F12,
        _ => Key::Other,
    }
}

// device_query numbers buttons from 1; slot 0 is unused
fn map_button(index: usize) -> MouseButton {
    match index {
        1 => MouseButton::Left,
        2 => MouseButton::Right,
        3 => MouseButton::Middle,
        n => MouseButton::Other(n.min(u8::MAX as usize) as u8),
    }
}

/// Turns successive snapshots of keyboard and mouse state into discrete
/// press, release and move events.
#[derive(Debug, Default)]
pub struct InputTracker {
    keys: BTreeSet<Key>,
    buttons: Vec<bool>,
    pointer: Option<Point>,
}

impl InputTracker {
    /// Compare one snapshot with the previous one and append the differences
    /// to `out`: key changes first, then pointer motion, then buttons.
    pub fn update<I>(&mut self, keys: I, pointer: Point, buttons: &[bool], out: &mut Vec<InputEvent>)
    where
        I: IntoIterator<Item = Key>,
    {
        let keys: BTreeSet<Key> = keys.into_iter().filter(|k| *k != Key::Other).collect();
        out.extend(self.keys.difference(&keys).map(|&k| InputEvent::KeyUp(k)));
        out.extend(keys.difference(&self.keys).map(|&k| InputEvent::KeyDown(k)));
        self.keys = keys;

        if self.pointer != Some(pointer) {
            self.pointer = Some(pointer);
            out.push(InputEvent::PointerMoved(pointer));
        }

        let count = buttons.len().max(self.buttons.len());
        for index in 1..count {
            let was = self.buttons.get(index).copied().unwrap_or(false);
            let is = buttons.get(index).copied().unwrap_or(false);
            if was != is {
                let button = map_button(index);
                out.push(if is {
                    InputEvent::ButtonDown { button, at: pointer }
                } else {
                    InputEvent::ButtonUp { button, at: pointer }
                });
            }
        }
        self.buttons.clear();
        self.buttons.extend_from_slice(buttons);
    }
}

/// Poll the global keyboard and mouse state on a dedicated thread until
/// `cancel` fires. `on_event` runs on that thread and must not block.
pub fn spawn_listener<F>(
    poll_interval: Duration,
    cancel: CancellationToken,
    mut on_event: F,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnMut(InputEvent) + Send + 'static,
{
    thread::Builder::new()
        .name("input-listener".into())
        .spawn(move || {
            let device = DeviceState::new();
            let mut tracker = InputTracker::default();
            let mut events = Vec::new();
            tracing::info!("Input listener started ({:?} poll)", poll_interval);

            while !cancel.is_cancelled() {
                let keys = device.get_keys();
                let mouse = device.get_mouse();
                tracker.update(
                    keys.iter().map(map_keycode),
                    Point::new(mouse.coords.0, mouse.coords.1),
                    &mouse.button_pressed,
                    &mut events,
                );
                for event in events.drain(..) {
                    on_event(event);
                }
                thread::sleep(poll_interval);
            }

            tracing::info!("Input listener stopping");
        })
}
