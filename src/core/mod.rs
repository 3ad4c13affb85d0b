//! Core daemon loop driving the scheduler.
//!
//! The daemon serializes every trigger onto one thread: timer expiry is the
//! `recv_timeout` deadline on the signal channel, and config reloads,
//! clock-change notices, and sleep/resume events all arrive as
//! `SignalMessage` values on the same channel. Reload-plan executions can
//! therefore never interleave, and the pending deadline is cancelled simply
//! by the scheduler replacing it before the loop sleeps again.

pub mod boundary;
pub mod scheduler;

use anyhow::Result;
use std::sync::atomic::Ordering;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::config::Config;
use crate::constants::IDLE_POLL_SECS;
use crate::core::scheduler::{Scheduler, SchedulerState};
use crate::notification;
use crate::signals::{SignalMessage, SignalState};

/// Owns the scheduler and the signal channel for the lifetime of the run.
pub struct Daemon {
    scheduler: Scheduler,
    signal_state: SignalState,
    debug_enabled: bool,
}

impl Daemon {
    pub fn new(scheduler: Scheduler, signal_state: SignalState, debug_enabled: bool) -> Self {
        Self {
            scheduler,
            signal_state,
            debug_enabled,
        }
    }

    /// Run until a shutdown signal arrives.
    pub fn execute(mut self) -> Result<()> {
        self.scheduler.start();

        while self.signal_state.running.load(Ordering::SeqCst) {
            let wait = self
                .scheduler
                .wait_until_deadline()
                .unwrap_or(Duration::from_secs(IDLE_POLL_SECS));

            match self.signal_state.signal_receiver.recv_timeout(wait) {
                Ok(SignalMessage::Reload) => self.handle_reload(),
                Ok(SignalMessage::TimeChange) => {
                    log_block_start!("Re-aligning schedule after clock change");
                    self.scheduler.on_clock_changed();
                }
                Ok(SignalMessage::Sleep { resuming }) => {
                    if resuming {
                        log_block_start!("Re-aligning schedule after resume");
                        self.scheduler.on_clock_changed();
                    }
                    // Nothing to do when going to sleep; the deadline is
                    // recomputed on resume anyway.
                }
                Ok(SignalMessage::Shutdown) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if self.scheduler.state() == SchedulerState::Armed {
                        self.scheduler.on_deadline_fired();
                    }
                    // Otherwise this was just the idle poll while disabled.
                }
                Err(RecvTimeoutError::Disconnected) => {
                    if self.signal_state.running.load(Ordering::SeqCst) {
                        log_pipe!();
                        log_error!("Signal handler disconnected unexpectedly");
                        log_indented!("Shutting down");
                    }
                    break;
                }
            }
        }

        log_block_start!("Shutting down duskr...");
        self.scheduler.stop();
        log_end!();
        Ok(())
    }

    /// Re-read the configuration and hand a fresh snapshot to the scheduler.
    /// A broken config file is logged and ignored; the previous snapshot
    /// stays in effect.
    fn handle_reload(&mut self) {
        match Config::load() {
            Ok(config) => {
                config.log_config();
                self.scheduler
                    .set_notifier(notification::create_notifier(config.notifications_enabled()));
                self.scheduler.reload_config(config.schedule());
            }
            Err(e) => {
                log_pipe!();
                log_error!("Failed to reload config: {e}");
                log_indented!("Continuing with previous configuration");
                if self.debug_enabled {
                    log_indented!("Fix the file and save again to retry");
                }
            }
        }
    }
}
