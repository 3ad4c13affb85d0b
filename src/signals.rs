//! Signal handling for the duskr daemon.
//!
//! A dedicated thread turns POSIX signals into `SignalMessage` values on the
//! daemon's single event channel: SIGUSR2 requests a configuration reload
//! (sent by `duskr reload` and the config file watcher machinery), while
//! SIGTERM/SIGINT/SIGHUP request shutdown. The same channel also carries
//! clock-change and sleep/resume notices from the D-Bus monitors, so the
//! main loop sees one serialized stream of triggers.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// Unified message type for every trigger the daemon loop reacts to.
#[derive(Debug, Clone)]
pub enum SignalMessage {
    /// Configuration reload request (SIGUSR2 or config file change).
    Reload,
    /// Out-of-band wall clock adjustment detected.
    TimeChange,
    /// Sleep/resume event from systemd-logind.
    Sleep { resuming: bool },
    /// Shutdown request (SIGTERM, SIGINT, SIGHUP).
    Shutdown,
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Atomic flag indicating if the daemon should keep running.
    pub running: Arc<AtomicBool>,
    /// Receiver side of the unified trigger channel (owned by the daemon loop).
    pub signal_receiver: std::sync::mpsc::Receiver<SignalMessage>,
    /// Sender side, cloned into the monitor threads.
    pub signal_sender: std::sync::mpsc::Sender<SignalMessage>,
}

/// Set up signal handling for the daemon.
///
/// Spawns a background thread that watches for signals and forwards the
/// corresponding messages on the trigger channel.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = std::sync::mpsc::channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = running.clone();
    let sender_clone = signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            match sig {
                SIGUSR2 => {
                    log_pipe!();
                    log_info!("Received configuration reload signal");
                    if sender_clone.send(SignalMessage::Reload).is_err() {
                        // Main loop is gone; nothing left to notify.
                        break;
                    }
                }
                SIGINT | SIGTERM | SIGHUP => {
                    log_pipe!();
                    let label = match sig {
                        SIGINT => {
                            if debug_enabled {
                                "Received SIGINT (Ctrl+C), initiating graceful shutdown..."
                            } else {
                                "Received interrupt signal, initiating graceful shutdown..."
                            }
                        }
                        SIGTERM => "Received termination request, initiating graceful shutdown...",
                        _ => "Received hangup signal, initiating graceful shutdown...",
                    };
                    log_info!("{}", label);

                    if let Err(e) = sender_clone.send(SignalMessage::Shutdown) {
                        log_warning!("Failed to send shutdown message: {e}");
                    }
                    running_clone.store(false, Ordering::SeqCst);
                    break;
                }
                _ => {}
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
        signal_sender,
    })
}
