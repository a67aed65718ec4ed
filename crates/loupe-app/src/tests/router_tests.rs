use loupe_core::overlay::{OverlaySlot, SlotAction};
use loupe_types::{AppEvent, CaptureRequest, InputEvent, Key, MouseButton, Point, Rect, UiEvent};

use super::fakes::{FakeExtractor, FakeGrabber, Harness, Recorder};

fn harness() -> Harness {
    Harness::new(FakeGrabber::Screen, FakeExtractor::text("HELLO WORLD"))
}

fn drain(rx: &kanal::AsyncReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn regions(events: Vec<AppEvent>) -> Vec<CaptureRequest> {
    events
        .into_iter()
        .filter_map(|event| match event {
            AppEvent::RegionSelected(request) => Some(request),
            _ => None,
        })
        .collect()
}

#[test]
fn test_drag_emits_band_then_request_to_ui_only() {
    let mut h = harness();
    h.drag((300, 200), (100, 100));

    let expected = Rect {
        left: 100,
        top: 100,
        right: 300,
        bottom: 200,
    };
    assert_eq!(
        drain(&h.ui_rx),
        vec![
            AppEvent::SelectionStarted(expected),
            AppEvent::RegionSelected(CaptureRequest {
                rect: expected,
                sequence: 1,
            })
        ]
    );
    // The app only hears about the region once the UI has hidden the band
    assert!(drain(&h.app_rx).is_empty());
}

#[test]
fn test_ui_releases_region_after_hiding_band() {
    let mut h = harness();
    let mut slot = OverlaySlot::new(Recorder::default(), true);
    h.drag((0, 0), (200, 100));

    for event in drain(&h.ui_rx) {
        if let SlotAction::Dispatch(request) = slot.handle(event) {
            assert_eq!(slot.overlay().calls.last().map(String::as_str), Some("band-off"));
            h.app_tx.send(AppEvent::RegionSelected(request)).unwrap();
        }
    }

    assert_eq!(slot.overlay().calls, vec!["band:200x100", "band-off"]);
    assert_eq!(regions(drain(&h.app_rx)).len(), 1);
}

#[test]
fn test_click_without_drag_is_silent() {
    let mut h = harness();
    h.drag((50, 50), (50, 50));
    h.drag((50, 50), (53, 53));

    assert!(drain(&h.ui_rx).is_empty());
}

#[test]
fn test_small_region_hides_band_without_request() {
    let mut h = harness();
    h.drag((0, 0), (40, 10));

    assert_eq!(
        drain(&h.ui_rx),
        vec![
            AppEvent::SelectionStarted(Rect {
                left: 0,
                top: 0,
                right: 40,
                bottom: 10,
            }),
            AppEvent::SelectionEnded
        ]
    );
}

#[test]
fn test_unarmed_drag_is_ignored() {
    let mut h = harness();
    let from = Point::new(0, 0);
    let to = Point::new(200, 200);
    for event in [
        InputEvent::KeyDown(Key::Ctrl),
        InputEvent::ButtonDown {
            button: MouseButton::Left,
            at: from,
        },
        InputEvent::PointerMoved(to),
        InputEvent::ButtonUp {
            button: MouseButton::Left,
            at: to,
        },
    ] {
        h.router.route(event);
    }

    assert!(drain(&h.ui_rx).is_empty());
}

#[test]
fn test_close_and_quit_keys_go_to_ui() {
    let mut h = harness();
    h.router.route(InputEvent::KeyDown(Key::Escape));
    h.router.route(InputEvent::KeyUp(Key::Escape));
    h.router.route(InputEvent::KeyDown(Key::F8));

    assert_eq!(
        drain(&h.ui_rx),
        vec![
            AppEvent::UiEvent(UiEvent::ClosePanel),
            AppEvent::UiEvent(UiEvent::Quit)
        ]
    );
}

#[test]
fn test_sequences_increase_per_request() {
    let mut h = harness();
    h.drag((0, 0), (100, 50));
    h.drag((0, 0), (5, 5));
    h.drag((10, 10), (200, 90));

    let sequences: Vec<u64> = regions(drain(&h.ui_rx))
        .into_iter()
        .map(|request| request.sequence)
        .collect();
    assert_eq!(sequences, vec![1, 2]);
}
