//! D-Bus and system event monitoring.
//!
//! This module provides detection for:
//! - Sleep/resume events via systemd-logind PrepareForSleep signal (D-Bus)
//! - Wall clock changes via timerfd with TFD_TIMER_CANCEL_ON_SET
//!
//! Each detection mechanism runs in its own thread and feeds the daemon's
//! trigger channel, so a clock jump or a resume from suspend re-aligns the
//! schedule immediately instead of waiting for a stale deadline to fire.

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::sys::time::TimeSpec;
use nix::sys::timerfd::{ClockId, Expiration, TimerFd, TimerFlags, TimerSetTimeFlags};
use std::sync::mpsc::Sender;
use std::thread;
use zbus::blocking::Connection;

use crate::signals::SignalMessage;

/// D-Bus proxy trait for the systemd-logind Manager interface.
#[zbus::proxy(
    interface = "org.freedesktop.login1.Manager",
    default_service = "org.freedesktop.login1",
    default_path = "/org/freedesktop/login1"
)]
trait LogindManager {
    /// PrepareForSleep signal emitted by systemd-logind.
    ///
    /// `start` is `true` when the system is about to suspend and `false`
    /// when it is resuming.
    #[zbus(signal)]
    fn prepare_for_sleep(&self, start: bool) -> zbus::Result<()>;
}

/// Start system event monitoring in dedicated threads.
///
/// Degrades gracefully: if D-Bus or timerfd are unavailable the daemon keeps
/// running without that detection capability, relying on the one-shot
/// deadline recomputation to self-correct eventually.
pub fn start_event_monitors(signal_sender: Sender<SignalMessage>, debug_enabled: bool) {
    let sender_for_time = signal_sender.clone();

    thread::spawn(move || {
        if let Err(e) = monitor_sleep_signals(signal_sender, debug_enabled) {
            log_pipe!();
            log_warning!("Sleep monitor error: {}", e);
            log_indented!("Sleep/resume detection will not be available");
        }
    });

    thread::spawn(move || {
        if let Err(e) = monitor_time_changes(sender_for_time, debug_enabled) {
            log_pipe!();
            log_warning!("Time change monitor error: {}", e);
            log_indented!("System time change detection will not be available");
            log_indented!("duskr will still self-correct at each boundary firing");
        }
    });
}

/// Monitor PrepareForSleep signals using D-Bus in a dedicated thread.
fn monitor_sleep_signals(signal_sender: Sender<SignalMessage>, debug_enabled: bool) -> Result<()> {
    let connection = Connection::system().context("Failed to connect to system D-Bus")?;

    let logind_proxy =
        LogindManagerProxyBlocking::new(&connection).context("Failed to create logind proxy")?;

    let mut sleep_signals = logind_proxy
        .receive_prepare_for_sleep()
        .context("Failed to subscribe to PrepareForSleep signals")?;

    if debug_enabled {
        log_pipe!();
        log_debug!("Subscribed to systemd-logind PrepareForSleep signals");
    }

    loop {
        match sleep_signals.next() {
            Some(signal) => match signal.args() {
                Ok(args) => {
                    let going_to_sleep: bool = args.start;
                    if going_to_sleep {
                        log_pipe!();
                        log_info!("System entering sleep/suspend mode");
                    } else {
                        log_pipe!();
                        log_info!("System resuming from sleep/suspend");
                    }

                    let message = SignalMessage::Sleep {
                        resuming: !going_to_sleep,
                    };
                    if signal_sender.send(message).is_err() {
                        // Channel disconnected - main thread is exiting
                        return Ok(());
                    }
                }
                Err(e) => {
                    log_pipe!();
                    log_warning!("Failed to parse PrepareForSleep signal args: {}", e);
                    log_indented!("Continuing to monitor for future signals...");
                }
            },
            None => {
                return Err(anyhow::anyhow!(
                    "D-Bus connection lost - PrepareForSleep signal stream ended"
                ));
            }
        }
    }
}

/// Wall clock change detector built on timerfd.
///
/// An absolute CLOCK_REALTIME timer armed with TFD_TIMER_CANCEL_ON_SET is
/// cancelled by the kernel (ECANCELED) whenever the clock undergoes a
/// discontinuous change, which is exactly the event we want to observe.
struct TimeChangeDetector {
    timer: TimerFd,
}

impl TimeChangeDetector {
    fn new() -> nix::Result<Self> {
        let timer = TimerFd::new(ClockId::CLOCK_REALTIME, TimerFlags::empty())?;
        let mut detector = TimeChangeDetector { timer };
        detector.arm_timer()?;
        Ok(detector)
    }

    fn arm_timer(&mut self) -> nix::Result<()> {
        let flags =
            TimerSetTimeFlags::TFD_TIMER_ABSTIME | TimerSetTimeFlags::TFD_TIMER_CANCEL_ON_SET;

        // Expire far in the future so only cancellation ever wakes us.
        let far_future = TimeSpec::new(i64::MAX / 1000, 0);
        self.timer.set(Expiration::OneShot(far_future), flags)?;
        Ok(())
    }

    /// Block until the clock changes. Returns `true` for an actual time
    /// change, `false` for a spurious wakeup.
    fn wait_for_time_change(&mut self) -> Result<bool> {
        match self.timer.wait() {
            Ok(_) => {
                // Timer expired normally (unexpected with a far-future
                // expiry); re-arm and keep waiting.
                self.arm_timer()
                    .context("Failed to re-arm timer after expiration")?;
                Ok(false)
            }
            Err(Errno::ECANCELED) => {
                // System time changed. Re-arm for continued monitoring.
                self.arm_timer()
                    .context("Failed to re-arm timer after time change")?;
                Ok(true)
            }
            Err(Errno::EINTR) => Ok(false),
            Err(e) => Err(e).context("timerfd wait failed"),
        }
    }
}

/// Monitor system time changes in a dedicated thread.
fn monitor_time_changes(signal_sender: Sender<SignalMessage>, debug_enabled: bool) -> Result<()> {
    let mut detector = TimeChangeDetector::new().context("Failed to create timerfd detector")?;

    if debug_enabled {
        log_pipe!();
        log_debug!("Watching for system clock changes via timerfd");
    }

    loop {
        if detector.wait_for_time_change()? {
            log_pipe!();
            log_info!("System clock change detected");
            if signal_sender.send(SignalMessage::TimeChange).is_err() {
                // Main loop is gone
                return Ok(());
            }
        }
    }
}
