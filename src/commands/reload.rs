//! Implementation of the reload command.
//!
//! Signals an existing duskr daemon (found via the lock file) to re-read its
//! configuration. The daemon also hot-reloads on file changes, so this is
//! mainly useful from scripts.

use anyhow::Result;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

/// Handle the reload command: send SIGUSR2 to the running instance.
pub fn handle_reload_command(_debug_enabled: bool) -> Result<()> {
    log_version!();

    match crate::lock::get_running_pid() {
        Ok(pid) => {
            log_block_start!("Signaling running duskr to reload...");
            match kill(Pid::from_raw(pid as i32), Signal::SIGUSR2) {
                Ok(_) => {
                    log_decorated!("Sent reload signal to duskr (PID: {pid})");
                    log_indented!("The daemon will re-read its configuration");
                }
                Err(e) => {
                    log_error!("Failed to signal process {pid}: {e}");
                }
            }
        }
        Err(e) => {
            log_pipe!();
            log_warning!("{e}");
            log_indented!("Start the daemon first: duskr");
        }
    }

    log_end!();
    Ok(())
}
