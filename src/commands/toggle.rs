//! Implementation of the toggle command.
//!
//! One-shot manual flip of the current mode, independent of the schedule.
//! A running daemon will pull the mode back onto schedule at its next
//! boundary firing; toggle is for quick manual overrides in between.

use anyhow::Result;

use crate::config::Config;
use crate::notification;
use crate::store;

/// Handle the toggle command: flip the mode once.
pub fn handle_toggle_command(_debug_enabled: bool) -> Result<()> {
    log_version!();

    let mut store = store::detect_store()?;
    let current = store.current_mode();
    log_block_start!("Current: {}", current);

    match store.toggle() {
        Some(new_mode) => {
            log_decorated!("Switched to {}", new_mode);

            // Respect the notifications setting when a config exists;
            // toggling should feel the same as a scheduled switch.
            let notifications = Config::load()
                .map(|c| c.notifications_enabled())
                .unwrap_or(true);
            notification::create_notifier(notifications).notify(new_mode);
        }
        None => {
            log_pipe!();
            log_error!("Mode store rejected the switch");
        }
    }

    log_end!();
    Ok(())
}
