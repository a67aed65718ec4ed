use std::time::Duration;

use loupe_core::overlay::{OverlaySlot, SlotAction};
use loupe_types::{AppEvent, CaptureRequest, Rect};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::fakes::{FakeExtractor, FakeGrabber, Harness, Recorder};
use crate::events::event_loop;
use crate::pipeline::{PipelineError, PipelineOrchestrator, run_pipeline};

/// Act as the UI thread: feed events into `slot`, release cleared regions
/// to the app, and stop at the first worker outcome
async fn next_outcome(h: &Harness, slot: &mut OverlaySlot<Recorder>) -> AppEvent {
    loop {
        let event = timeout(Duration::from_secs(5), h.ui_rx.recv())
            .await
            .expect("no outcome within 5s")
            .expect("ui channel closed");
        let outcome = matches!(event, AppEvent::ShowResult(_) | AppEvent::ShowError { .. });
        if let SlotAction::Dispatch(request) = slot.handle(event.clone()) {
            h.app_tx.send(AppEvent::RegionSelected(request)).unwrap();
        }
        if outcome {
            return event;
        }
    }
}

fn request(sequence: u64, width: i32, height: i32) -> CaptureRequest {
    CaptureRequest {
        rect: Rect {
            left: 10,
            top: 10,
            right: 10 + width,
            bottom: 10 + height,
        },
        sequence,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_drag_translates_and_repeat_hits_cache() {
    let mut h = Harness::new(FakeGrabber::Screen, FakeExtractor::text("HELLO\n\nWORLD\n\x0c"));
    let cancel = CancellationToken::new();
    let app = tokio::spawn(event_loop(
        h.app_rx.clone(),
        PipelineOrchestrator::new(h.ctx.clone()),
        cancel.clone(),
    ));
    let mut slot = OverlaySlot::new(Recorder::default(), true);

    h.drag((100, 100), (300, 200));
    match next_outcome(&h, &mut slot).await {
        AppEvent::ShowResult(result) => {
            assert_eq!(result.sequence, 1);
            assert_eq!(result.source_text, "HELLO WORLD");
            assert_eq!(result.translated_text, "BONJOUR LE MONDE");
            assert_eq!(result.from_lang, "en");
            assert_eq!(result.to_lang, "fr");
        }
        other => panic!("expected a result, got {other:?}"),
    }
    assert_eq!(h.translator_calls(), 1);

    h.drag((100, 100), (300, 200));
    match next_outcome(&h, &mut slot).await {
        AppEvent::ShowResult(result) => {
            assert_eq!(result.sequence, 2);
            assert_eq!(result.translated_text, "BONJOUR LE MONDE");
        }
        other => panic!("expected a result, got {other:?}"),
    }
    assert_eq!(h.translator_calls(), 1);
    assert!(h.cache.contains("HELLO WORLD"));

    // 200x100 region upscaled twice before OCR
    assert_eq!(*h.extractor.sizes.lock().unwrap(), vec![(400, 200), (400, 200)]);
    assert_eq!(
        slot.overlay().calls,
        vec![
            "band:200x100",
            "band-off",
            "show:BONJOUR LE MONDE",
            "band:200x100",
            "band-off",
            "hide",
            "show:BONJOUR LE MONDE",
        ]
    );

    cancel.cancel();
    app.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_capture_failure_reaches_overlay() {
    let h = Harness::new(FakeGrabber::Fail, FakeExtractor::text("HELLO WORLD"));
    let mut slot = OverlaySlot::new(Recorder::default(), true);

    PipelineOrchestrator::new(h.ctx.clone())
        .dispatch(request(1, 200, 100))
        .await
        .unwrap();

    match next_outcome(&h, &mut slot).await {
        AppEvent::ShowError { sequence, message } => {
            assert_eq!(sequence, 1);
            assert!(message.starts_with("Screen capture failed"), "{message}");
        }
        other => panic!("expected an error, got {other:?}"),
    }
    assert!(slot.is_visible());
    assert!(slot.current().is_none());
    assert_eq!(h.translator_calls(), 0);
}

#[tokio::test]
async fn test_blank_ocr_is_no_text() {
    let h = Harness::new(FakeGrabber::Screen, FakeExtractor::text(" \n \x0c"));

    let err = run_pipeline(&h.ctx, request(1, 60, 40)).await.unwrap_err();
    assert!(matches!(err, PipelineError::Ocr(loupe_ocr::OcrError::NoText)));
    assert_eq!(err.user_message(), "No text found in the selected region");
    assert_eq!(h.translator_calls(), 0);
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_translation_failure_is_reported_and_not_cached() {
    let h = Harness::new(FakeGrabber::Screen, FakeExtractor::text("UNKNOWN WORDS"));

    let err = run_pipeline(&h.ctx, request(3, 60, 40)).await.unwrap_err();
    assert!(matches!(err, PipelineError::Translate(_)));
    assert!(err.user_message().starts_with("Translation failed"));
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_panicking_capture_becomes_worker_error() {
    let h = Harness::new(FakeGrabber::Panic, FakeExtractor::text("HELLO WORLD"));

    let err = run_pipeline(&h.ctx, request(1, 60, 40)).await.unwrap_err();
    assert!(matches!(err, PipelineError::Worker(_)));
    assert!(err.user_message().starts_with("Internal error"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_late_result_does_not_replace_newer_one() {
    // wide regions read as SLOW, narrow ones as FAST
    let h = Harness::new(FakeGrabber::Screen, FakeExtractor::by_width("SLOW", "FAST", 300));
    let orchestrator = PipelineOrchestrator::new(h.ctx.clone());
    let mut slot = OverlaySlot::new(Recorder::default(), true);

    let slow = orchestrator.dispatch(request(1, 400, 50));
    let fast = orchestrator.dispatch(request(2, 60, 40));

    let first = next_outcome(&h, &mut slot).await;
    let second = next_outcome(&h, &mut slot).await;
    slow.await.unwrap();
    fast.await.unwrap();

    assert!(matches!(first, AppEvent::ShowResult(ref r) if r.sequence == 2));
    assert!(matches!(second, AppEvent::ShowResult(ref r) if r.sequence == 1));
    assert_eq!(slot.current().unwrap().translated_text, "RAPIDE");
    assert_eq!(slot.overlay().calls, vec!["show:RAPIDE"]);
}
