//! File watching for hot config reloading.
//!
//! Watches the directory containing `duskr.toml` and feeds
//! `SignalMessage::Reload` into the daemon's trigger channel when the file
//! changes, so edits apply without a manual `duskr reload`.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::constants::CONFIG_DEBOUNCE_MS;
use crate::signals::SignalMessage;

use super::loading;

/// Start watching the configuration file for changes.
///
/// Spawns a background thread that owns the watcher and forwards debounced
/// reload requests to the main loop.
pub fn start_config_watcher(signal_sender: Sender<SignalMessage>, debug_enabled: bool) -> Result<()> {
    let config_path = loading::get_config_path()?;
    let watch_dir = config_path
        .parent()
        .context("Config path has no parent directory")?
        .to_path_buf();

    let (tx, rx) = std::sync::mpsc::channel();

    // Watch the directory rather than the file: editors replace files by
    // rename, which would silently detach a file-level watch.
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                        let _ = tx.send(event);
                    }
                    _ => {}
                }
            }
        },
        NotifyConfig::default(),
    )
    .context("Failed to create file watcher")?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    if debug_enabled {
        log_pipe!();
        log_debug!("Watching {} for config changes", config_path.display());
    }

    thread::spawn(move || {
        // Keep the watcher alive for the lifetime of the thread
        let _watcher = watcher;

        loop {
            match rx.recv() {
                Ok(event) => {
                    if !event.paths.iter().any(|p| p == &config_path) {
                        continue;
                    }

                    // Coalesce the burst of events an editor save produces
                    thread::sleep(Duration::from_millis(CONFIG_DEBOUNCE_MS));
                    while rx.try_recv().is_ok() {}

                    log_pipe!();
                    log_info!("Configuration file changed, reloading");
                    if signal_sender.send(SignalMessage::Reload).is_err() {
                        // Main loop is gone
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    Ok(())
}
