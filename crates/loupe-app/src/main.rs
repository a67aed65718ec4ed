use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use loupe_config::Config;
use loupe_ocr::TesseractExtractor;
use tracing_subscriber::EnvFilter;

mod context;
mod controller;
mod events;
mod input;
mod pipeline;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Hold the modifiers and drag over text to translate it
#[derive(Debug, Parser)]
#[command(name = "loupe", version, about)]
struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json || !atty::is(atty::Stream::Stderr) {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.log_json);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    match TesseractExtractor::version() {
        Ok(version) => tracing::info!("Using tesseract {}", version.trim()),
        Err(e) => tracing::warn!("tesseract unavailable, captures will fail: {}", e),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("loupe-worker")
        .build()
        .context("failed to build tokio runtime")?;

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state.clone());

    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks()?
    };
    let listener = controller.spawn_listener()?;

    let gesture = &state.config.gesture;
    tracing::info!(
        "Ready: hold {:?} and drag to translate {} -> {}, {:?} closes, {:?} quits",
        gesture.modifiers,
        state.config.translator.from_lang,
        state.config.translator.to_lang,
        gesture.close_key,
        gesture.quit_key
    );

    // Slint must own the main thread
    let (app_to_ui_rx, ui_to_app_tx) = controller.ui_channels();
    let ui_result = ui::ui_loop(app_to_ui_rx, ui_to_app_tx, &state.config.ui);

    controller.shutdown();
    runtime.block_on(async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("task exited with error: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    });
    if listener.join().is_err() {
        tracing::error!("input listener panicked");
    }
    runtime.shutdown_timeout(Duration::from_secs(2));

    tracing::info!("Bye");
    ui_result
}
