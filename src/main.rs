// src/main.rs
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use vedit::config::Config;
use vedit::editor::Editor;
use vedit::logging;
use vedit::terminal::{clock, CrosstermTerminal, EventSource, Screen};

#[derive(Parser, Debug)]
#[command(name = "vedit", version, about = "Modal terminal text editor")]
struct Args {
    /// File to edit; defaults to $VEDIT_FILE or example.txt
    path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(path) = args.path {
        config.file = path;
    }

    let log_dir = config.log_dir();
    let _log_guard = logging::init(&log_dir, &config.log_filter)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    tracing::info!(file = %config.file.display(), "starting");

    let mut terminal = CrosstermTerminal::new().context("entering raw mode")?;
    let size = terminal.size()?;
    let mut editor = Editor::open(&config.file, size);
    let timeout = Duration::from_millis(config.poll_timeout_ms);

    editor.render(&mut terminal)?;
    while !editor.should_quit() {
        let Some(event) = terminal.next_event(timeout)? else {
            continue;
        };
        let started = clock();
        editor.handle_event(event);
        editor.render(&mut terminal)?;
        tracing::trace!(elapsed_ms = (clock() - started) * 1000.0, "frame");
    }
    drop(terminal);

    match editor.snapshot().to_json() {
        Ok(json) => tracing::debug!(snapshot = %json, "exit"),
        Err(err) => tracing::warn!("could not serialize final state: {}", err),
    }
    tracing::info!("bye");
    Ok(())
}
