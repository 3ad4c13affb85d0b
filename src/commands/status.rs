//! Implementation of the status command.
//!
//! Prints the current mode, the configured schedule, which mode the
//! schedule says should be active right now, and when the next switch
//! lands. Also reports whether a daemon instance is running.

use anyhow::Result;
use chrono::Local;

use crate::config::Config;
use crate::core::boundary;
use crate::store;

/// Handle the status command.
pub fn handle_status_command(_debug_enabled: bool) -> Result<()> {
    log_version!();

    let config = Config::load()?;
    let schedule = config.schedule();

    let mut store = store::detect_store()?;
    let current = store.current_mode();
    let now = Local::now();
    let desired = boundary::desired_mode(now.time(), schedule.dark_time, schedule.light_time);

    log_block_start!("Current: {} {} ({} store)", current.symbol(), current, store.name());
    log_indented!("Scheduled for now: {}", desired);
    if current != desired {
        log_indented!("Out of sync - the daemon will correct this at its next trigger");
    }

    log_block_start!("Schedule");
    log_indented!(
        "Automatic switching: {}",
        if schedule.auto_switch { "enabled" } else { "disabled" }
    );
    log_indented!("Dark from: {}", schedule.dark_time.format("%H:%M:%S"));
    log_indented!("Light from: {}", schedule.light_time.format("%H:%M:%S"));

    if schedule.auto_switch {
        let wait = boundary::until_next_boundary(
            now.naive_local(),
            schedule.dark_time,
            schedule.light_time,
            schedule.settle_buffer,
        );
        let next = now + chrono::Duration::from_std(wait).unwrap_or_else(|_| chrono::Duration::zero());
        log_indented!("Next switch check: {}", next.format("%H:%M:%S"));
    }

    match crate::lock::get_running_pid() {
        Ok(pid) => log_block_start!("Daemon running (PID: {pid})"),
        Err(_) => {
            log_block_start!("Daemon not running");
            log_indented!("Start it with: duskr");
        }
    }

    log_end!();
    Ok(())
}
