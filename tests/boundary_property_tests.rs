//! Property tests for the boundary evaluator.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use std::time::Duration;

use duskr::constants::MIN_REARM_DELAY_MS;
use duskr::core::boundary::{desired_mode, until_next_boundary};
use duskr::mode::Mode;

fn time_of_day() -> impl Strategy<Value = NaiveTime> {
    (0u32..86_400)
        .prop_map(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap())
}

fn at(time: NaiveTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_time(time)
}

proptest! {
    #[test]
    fn desired_mode_matches_the_window_rule(
        now in time_of_day(),
        dark in time_of_day(),
        light in time_of_day(),
    ) {
        let in_dark_window = if dark > light {
            now >= dark || now < light
        } else {
            now >= dark && now < light
        };
        let expected = if in_dark_window { Mode::Dark } else { Mode::Light };
        prop_assert_eq!(desired_mode(now, dark, light), expected);
    }

    #[test]
    fn entering_a_boundary_selects_its_mode(
        dark in time_of_day(),
        light in time_of_day(),
    ) {
        prop_assume!(dark != light);
        prop_assert_eq!(desired_mode(dark, dark, light), Mode::Dark);
        prop_assert_eq!(desired_mode(light, dark, light), Mode::Light);
    }

    #[test]
    fn wait_is_positive_and_bounded(
        now in time_of_day(),
        dark in time_of_day(),
        light in time_of_day(),
        settle_ms in 0u64..10_000,
    ) {
        let settle = Duration::from_millis(settle_ms);
        let wait = until_next_boundary(at(now), dark, light, settle);

        prop_assert!(wait >= Duration::from_millis(MIN_REARM_DELAY_MS));
        // A boundary recurs daily; never wait past tomorrow's occurrence.
        prop_assert!(wait <= Duration::from_secs(86_400) + settle);
    }

    #[test]
    fn standing_on_a_boundary_waits_for_a_future_one(
        boundary in time_of_day(),
        other in time_of_day(),
    ) {
        // The just-fired boundary must not be re-selected at zero distance.
        let wait = until_next_boundary(at(boundary), boundary, other, Duration::ZERO);
        prop_assert!(wait >= Duration::from_millis(MIN_REARM_DELAY_MS));
    }

    #[test]
    fn coincident_boundaries_wait_a_full_day(boundary in time_of_day()) {
        let wait = until_next_boundary(at(boundary), boundary, boundary, Duration::ZERO);
        prop_assert_eq!(wait, Duration::from_secs(86_400));
    }
}
