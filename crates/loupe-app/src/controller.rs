use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context;
use kanal::{AsyncReceiver, AsyncSender, Sender};
use loupe_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::PipelineContext;
use crate::events::{event_loop, watch_ctrl_c};
use crate::input::InputRouter;
use crate::pipeline::PipelineOrchestrator;
use crate::state::AppState;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Centralized channel management
pub struct ChannelSet {
    /// UI thread to the app loop: regions cleared for capture
    pub ui_to_app: (Sender<AppEvent>, AsyncReceiver<AppEvent>),
    /// Listener and workers to the UI thread
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded();
        Self {
            ui_to_app: (ui_to_app_tx, ui_to_app_rx.to_async()),
            app_to_ui: kanal::unbounded_async(),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Must be called inside a tokio runtime context
    pub fn spawn_tasks(&self) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let ctx = PipelineContext::from_state(&self.state, self.channels.app_to_ui.0.clone())?;
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.channels.ui_to_app.1.clone(),
            PipelineOrchestrator::new(ctx),
            self.cancel_token.child_token(),
        ));

        // Ctrl+C
        tasks.spawn(watch_ctrl_c(
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        Ok(tasks)
    }

    pub fn spawn_listener(&self) -> anyhow::Result<JoinHandle<()>> {
        let mut router = InputRouter::new(
            &self.state.config.gesture,
            self.channels.app_to_ui.0.clone_sync(),
        );
        loupe_ocr::spawn_listener(
            INPUT_POLL_INTERVAL,
            self.cancel_token.child_token(),
            move |event| router.route(event),
        )
        .context("failed to start input listener")
    }

    /// Both ends the UI thread needs
    pub fn ui_channels(&self) -> (AsyncReceiver<AppEvent>, Sender<AppEvent>) {
        (
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
        )
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
