//! Pure boundary evaluation for the two daily switching times.
//!
//! This is the algorithmic heart of duskr: given the wall clock and the two
//! boundary times it decides which mode should currently be active and how
//! long to wait until the next boundary crossing. Both functions are total
//! and stateless; the scheduler layers deadline ownership on top.
//!
//! The dark window commonly wraps past midnight (e.g. dark at 18:00, light
//! at 07:00), so the evaluator has two cases depending on boundary ordering.
//! Boundary instants belong to the mode being entered: comparisons are `>=`
//! on the entering boundary and `<` on the exiting one.

use chrono::{Duration as ChronoDuration, NaiveDateTime, NaiveTime};
use std::time::Duration;

use crate::constants::MIN_REARM_DELAY_MS;
use crate::mode::Mode;

/// Which mode should be active at `now` given the two daily boundaries.
///
/// When `dark_time <= light_time` the dark window is a sub-interval of the
/// day; otherwise it wraps past midnight. Equal boundaries yield an empty
/// dark window, so the answer is always Light in that case.
pub fn desired_mode(now: NaiveTime, dark_time: NaiveTime, light_time: NaiveTime) -> Mode {
    let in_dark_window = if dark_time > light_time {
        now >= dark_time || now < light_time
    } else {
        now >= dark_time && now < light_time
    };

    if in_dark_window { Mode::Dark } else { Mode::Light }
}

/// Wait until the next boundary crossing strictly after `now`.
///
/// Each boundary's next occurrence is advanced to tomorrow when today's is
/// already past-or-equal, so the result never lands on `now` itself (that
/// would re-fire in a zero-delay loop at the exact boundary instant). The
/// `settle` buffer absorbs propagation latency in the mode store's backing
/// mechanism; the whole result is clamped to a minimum positive delay.
pub fn until_next_boundary(
    now: NaiveDateTime,
    dark_time: NaiveTime,
    light_time: NaiveTime,
    settle: Duration,
) -> Duration {
    let next_dark = next_occurrence(now, dark_time);
    let next_light = next_occurrence(now, light_time);
    let next_event = next_dark.min(next_light);

    // Positive by construction, but the conversion guards degenerate inputs.
    let raw = (next_event - now).to_std().unwrap_or(Duration::ZERO);
    let wait = raw.saturating_add(settle);

    let min_delay = Duration::from_millis(MIN_REARM_DELAY_MS);
    if wait < min_delay { min_delay } else { wait }
}

/// Next absolute occurrence of `boundary` strictly after `now`.
fn next_occurrence(now: NaiveDateTime, boundary: NaiveTime) -> NaiveDateTime {
    let mut at = now.date().and_time(boundary);
    if at <= now {
        at += ChronoDuration::days(1);
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn non_wrapping_dark_window() {
        // dark=10:00, light=16:00: dark is a sub-interval of the day
        let (dark, light) = (t(10, 0), t(16, 0));
        assert_eq!(desired_mode(t(9, 0), dark, light), Mode::Light);
        assert_eq!(desired_mode(t(10, 0), dark, light), Mode::Dark);
        assert_eq!(desired_mode(t(15, 59), dark, light), Mode::Dark);
        assert_eq!(desired_mode(t(16, 0), dark, light), Mode::Light);
    }

    #[test]
    fn wrapping_dark_window() {
        // dark=18:00, light=07:00: the common overnight case
        let (dark, light) = (t(18, 0), t(7, 0));
        assert_eq!(desired_mode(t(23, 0), dark, light), Mode::Dark);
        assert_eq!(desired_mode(t(6, 59), dark, light), Mode::Dark);
        assert_eq!(desired_mode(t(7, 0), dark, light), Mode::Light);
        assert_eq!(desired_mode(t(12, 0), dark, light), Mode::Light);
        assert_eq!(desired_mode(t(18, 0), dark, light), Mode::Dark);
    }

    #[test]
    fn equal_boundaries_mean_empty_dark_window() {
        let b = t(9, 30);
        assert_eq!(desired_mode(t(9, 29), b, b), Mode::Light);
        assert_eq!(desired_mode(t(9, 30), b, b), Mode::Light);
        assert_eq!(desired_mode(t(9, 31), b, b), Mode::Light);
    }

    #[test]
    fn wait_targets_the_nearer_boundary() {
        let settle = Duration::from_millis(2000);
        // 12:00 with dark=18:00, light=07:00: next event is 18:00 today
        let wait = until_next_boundary(at(12, 0, 0), t(18, 0), t(7, 0), settle);
        assert_eq!(wait, Duration::from_secs(6 * 3600) + settle);

        // 23:00: next event is 07:00 tomorrow
        let wait = until_next_boundary(at(23, 0, 0), t(18, 0), t(7, 0), settle);
        assert_eq!(wait, Duration::from_secs(8 * 3600) + settle);
    }

    #[test]
    fn exact_boundary_advances_to_tomorrow() {
        let settle = Duration::from_millis(2000);
        // Sitting exactly on the 18:00 boundary the next dark occurrence is
        // tomorrow's; the nearer event becomes 07:00 tomorrow.
        let wait = until_next_boundary(at(18, 0, 0), t(18, 0), t(7, 0), settle);
        assert_eq!(wait, Duration::from_secs(13 * 3600) + settle);

        // With a single effective boundary the wait is a full day.
        let wait = until_next_boundary(at(18, 0, 0), t(18, 0), t(18, 0), settle);
        assert_eq!(wait, Duration::from_secs(24 * 3600) + settle);
    }

    #[test]
    fn wait_is_always_positive() {
        let wait = until_next_boundary(at(17, 59, 59), t(18, 0), t(7, 0), Duration::ZERO);
        assert!(wait >= Duration::from_millis(MIN_REARM_DELAY_MS));
    }

    #[test]
    fn degenerate_wait_clamps_to_minimum() {
        // Sub-second gap to the boundary with no settle buffer would re-fire
        // almost immediately; the clamp keeps the delay at least 1s.
        let now = at(17, 59, 59) + ChronoDuration::milliseconds(900);
        let wait = until_next_boundary(now, t(18, 0), t(7, 0), Duration::ZERO);
        assert_eq!(wait, Duration::from_millis(MIN_REARM_DELAY_MS));
    }
}
