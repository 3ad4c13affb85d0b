//! The scheduler owning the single re-armable switch deadline.
//!
//! Every trigger (startup, config reload, out-of-band clock change, deadline
//! expiry) funnels into `reload_plan`, which corrects the current mode
//! against the store and arms exactly one fresh deadline. The scheduler
//! deliberately uses one-shot deadlines recomputed from the wall clock
//! rather than a repeating interval: periodic ticks accumulate skew across
//! sleep/resume cycles, while recomputing on every firing is self-correcting.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ScheduleConfig;
use crate::constants::MIN_REARM_DELAY_MS;
use crate::core::boundary;
use crate::mode::Mode;
use crate::notification::ModeChangeNotifier;
use crate::store::ModeStore;
use crate::time_source::TimeSource;

/// Observable scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No deadline pending; nothing will fire until a trigger arrives.
    Stopped,
    /// Exactly one deadline is pending.
    Armed,
}

/// Owns the schedule snapshot, the mode store capability, and at most one
/// pending deadline. All entry points are serialized by the caller (the
/// daemon loop runs them on a single thread), so a reload-plan never
/// interleaves with another.
pub struct Scheduler {
    config: ScheduleConfig,
    store: Box<dyn ModeStore>,
    notifier: Box<dyn ModeChangeNotifier>,
    clock: Arc<dyn TimeSource>,
    deadline: Option<DateTime<Local>>,
}

impl Scheduler {
    pub fn new(
        config: ScheduleConfig,
        store: Box<dyn ModeStore>,
        notifier: Box<dyn ModeChangeNotifier>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            store,
            notifier,
            clock,
            deadline: None,
        }
    }

    /// Start scheduling: correct the mode immediately and arm the first
    /// deadline. Stays Stopped when automatic switching is disabled.
    pub fn start(&mut self) {
        self.reload_plan();
    }

    /// Cancel any pending deadline. Idempotent.
    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            log_block_start!("Cancelled pending switch deadline");
        }
    }

    /// Replace the schedule snapshot wholesale and recompute the plan.
    pub fn reload_config(&mut self, config: ScheduleConfig) {
        self.config = config;
        self.reload_plan();
    }

    /// Swap the change notifier (the notifications setting is hot-reloadable).
    pub fn set_notifier(&mut self, notifier: Box<dyn ModeChangeNotifier>) {
        self.notifier = notifier;
    }

    /// The host clock was adjusted out of band (manual change, NTP resync,
    /// resume from suspend). The pending deadline was computed against the
    /// old clock and may be arbitrarily stale, so recompute everything.
    pub fn on_clock_changed(&mut self) {
        self.reload_plan();
    }

    /// The pending deadline was reached. Fires at most once per armed
    /// deadline; each firing computes a brand-new one-shot deadline.
    pub fn on_deadline_fired(&mut self) {
        self.deadline = None;
        self.reload_plan();
    }

    pub fn state(&self) -> SchedulerState {
        if self.deadline.is_some() {
            SchedulerState::Armed
        } else {
            SchedulerState::Stopped
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Local>> {
        self.deadline
    }

    /// Remaining wait until the pending deadline, if armed. Returns zero
    /// when the deadline is already past.
    pub fn wait_until_deadline(&self) -> Option<Duration> {
        let deadline = self.deadline?;
        let remaining = deadline - self.clock.now();
        Some(remaining.to_std().unwrap_or(Duration::ZERO))
    }

    /// The one operation every trigger funnels into: correct the current
    /// mode idempotently, then arm a fresh deadline replacing any prior one.
    /// Never propagates an error; a failed store write is retried at the
    /// next natural trigger.
    fn reload_plan(&mut self) {
        if !self.config.auto_switch {
            if self.deadline.take().is_some() {
                log_block_start!("Automatic switching disabled, cancelling pending deadline");
            }
            return;
        }

        let now = self.clock.now();
        self.correct_mode(now.time());

        let wait = boundary::until_next_boundary(
            now.naive_local(),
            self.config.dark_time,
            self.config.light_time,
            self.config.settle_buffer,
        );
        let wait_chrono = ChronoDuration::from_std(wait)
            .unwrap_or_else(|_| ChronoDuration::milliseconds(MIN_REARM_DELAY_MS as i64));
        let deadline = now + wait_chrono;
        self.deadline = Some(deadline);

        log_block_start!(
            "Next boundary check at {} ({} from now)",
            deadline.format("%H:%M:%S"),
            format_wait(wait)
        );
    }

    /// Compare the desired mode against a fresh store reading and mutate
    /// only on an actual difference. The store is re-read on every call so
    /// changes made outside this process are tolerated; redundant switches
    /// are never issued and the notification fires only on real transitions.
    fn correct_mode(&mut self, now: chrono::NaiveTime) {
        let desired = boundary::desired_mode(now, self.config.dark_time, self.config.light_time);
        let current = Mode::from_is_light(self.store.is_light());
        if current == desired {
            return;
        }

        if self.store.set_mode(desired.is_dark()) {
            log_block_start!("Switched to {}", desired);
            self.notifier.notify(desired);
        } else {
            log_pipe!();
            log_warning!("Mode store rejected switch to {desired}");
            log_indented!("Will retry at the next trigger");
        }
    }
}

/// Render a wait duration for the scheduling log line.
fn format_wait(wait: Duration) -> String {
    let secs = wait.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
