use kanal::{AsyncReceiver, AsyncSender};
use loupe_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::pipeline::PipelineOrchestrator;

/// App's main loop: turns selected regions into pipeline workers
pub async fn event_loop(
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    orchestrator: PipelineOrchestrator,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] waiting for regions");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        match event {
            AppEvent::RegionSelected(request) => {
                tracing::info!("[EVENT_LOOP] capture request #{}", request.sequence);
                orchestrator.dispatch(request);
            }
            other => {
                tracing::debug!(
                    "[EVENT_LOOP] ignoring {:?}",
                    std::mem::discriminant(&other)
                );
            }
        }
    }

    tracing::info!("[EVENT_LOOP] stopping");
    Ok(())
}

/// Ask the UI to quit on Ctrl+C
pub async fn watch_ctrl_c(
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tokio::select! {
        _ = cancel.cancelled() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Ctrl+C received, shutting down");
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Quit)).await?;
        }
    }
    Ok(())
}
