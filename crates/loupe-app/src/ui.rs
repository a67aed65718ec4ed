use kanal::{AsyncReceiver, Sender};
use loupe_config::ui::UiConfig;
use loupe_types::AppEvent;

/// Blocks the calling thread, which must be the main thread
pub fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: Sender<AppEvent>,
    config: &UiConfig,
) -> anyhow::Result<()> {
    loupe_ui::ui_loop(app_to_ui_rx, ui_to_app_tx, config)
}
