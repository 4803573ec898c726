// Countdown engine: test-mode window, one-shot reached transition, timezone
// switches, and the wall-clock calendar math.

use midnight_core::{
    days_in_year, is_leap_year, ms_until_new_year, CountdownEngine, CountdownPhase, LocalTime,
    TimeParseError, WallClock, TEST_MODE,
};
use std::cell::Cell;

const MS_PER_DAY: f64 = 86_400_000.0;

struct FakeClock {
    utc_ms: Cell<f64>,
    local: Cell<Option<LocalTime>>,
}

impl FakeClock {
    fn at(utc_ms: f64) -> Self {
        Self {
            utc_ms: Cell::new(utc_ms),
            local: Cell::new(None),
        }
    }

    fn with_local(local: LocalTime) -> Self {
        Self {
            utc_ms: Cell::new(0.0),
            local: Cell::new(Some(local)),
        }
    }
}

impl WallClock for FakeClock {
    fn utc_now_ms(&self) -> f64 {
        self.utc_ms.get()
    }

    fn local_now(&self, _timezone: &str) -> Option<LocalTime> {
        self.local.get()
    }
}

fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> LocalTime {
    LocalTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

#[test]
fn test_mode_starts_at_ten_seconds_and_zero_progress() {
    let clock = FakeClock::at(1_000.0);
    let mut engine = CountdownEngine::new(TEST_MODE);
    let tick = engine.tick(&clock);
    assert!(!tick.reached);
    assert_eq!(tick.display.hours, 0);
    assert_eq!(tick.display.minutes, 0);
    assert_eq!(tick.display.seconds, 10);
    assert_eq!(tick.display.progress, 0.0);
}

#[test]
fn test_mode_progress_is_linear() {
    let clock = FakeClock::at(0.0);
    let mut engine = CountdownEngine::new(TEST_MODE);
    engine.tick(&clock);
    clock.utc_ms.set(5_000.0);
    let tick = engine.tick(&clock);
    assert_eq!(tick.display.seconds, 5);
    assert!((tick.display.progress - 50.0).abs() < 1e-3);
}

#[test]
fn reached_fires_exactly_once() {
    let clock = FakeClock::at(0.0);
    let mut engine = CountdownEngine::new(TEST_MODE);
    engine.tick(&clock);
    clock.utc_ms.set(10_000.0);
    let tick = engine.tick(&clock);
    assert!(tick.reached, "crossing zero must fire the midnight event");
    assert_eq!(engine.phase(), CountdownPhase::Reached);
    assert_eq!(tick.display.hours, 0);
    assert_eq!(tick.display.minutes, 0);
    assert_eq!(tick.display.seconds, 0);
    assert_eq!(tick.display.progress, 100.0);

    // Later ticks observe remaining <= 0 again but must not re-fire.
    clock.utc_ms.set(20_000.0);
    let tick = engine.tick(&clock);
    assert!(!tick.reached);
    assert_eq!(tick.display.progress, 100.0);
}

#[test]
fn timezone_switch_resets_test_anchor() {
    let clock = FakeClock::at(0.0);
    let mut engine = CountdownEngine::new(TEST_MODE);
    engine.tick(&clock);
    clock.utc_ms.set(7_000.0);
    engine.tick(&clock);

    engine.set_timezone(TEST_MODE);
    let tick = engine.tick(&clock);
    assert_eq!(
        tick.display.seconds, 10,
        "fresh anchor: remaining must be the full window, not inherited"
    );
}

#[test]
fn timezone_switch_after_reached_restarts_the_engine() {
    let clock = FakeClock::at(0.0);
    let mut engine = CountdownEngine::new(TEST_MODE);
    engine.tick(&clock);
    clock.utc_ms.set(10_000.0);
    assert!(engine.tick(&clock).reached);

    engine.set_timezone(TEST_MODE);
    assert_eq!(engine.phase(), CountdownPhase::Running);
    clock.utc_ms.set(10_000.0);
    engine.tick(&clock);
    clock.utc_ms.set(20_000.0);
    assert!(engine.tick(&clock).reached, "a restarted run fires again");
}

#[test]
fn normal_mode_computes_remaining_from_wall_clock() {
    let clock = FakeClock::with_local(local(2026, 12, 31, 23, 59, 0));
    let mut engine = CountdownEngine::new("Asia/Jakarta");
    let tick = engine.tick(&clock);
    assert_eq!(tick.display.hours, 0);
    assert_eq!(tick.display.minutes, 1);
    assert_eq!(tick.display.seconds, 0);
}

#[test]
fn normal_mode_progress_is_a_per_minute_sawtooth() {
    let clock = FakeClock::with_local(local(2026, 6, 15, 12, 0, 30));
    let mut engine = CountdownEngine::new("Europe/London");
    let tick = engine.tick(&clock);
    assert!((tick.display.progress - 50.0).abs() < 1e-3);
}

#[test]
fn missing_wall_clock_keeps_running() {
    let clock = FakeClock::at(0.0); // local_now -> None
    let mut engine = CountdownEngine::new("Not/AZone");
    let tick = engine.tick(&clock);
    assert!(!tick.reached);
    assert_eq!(engine.phase(), CountdownPhase::Running);
}

#[test]
fn leap_year_calendar_math() {
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(2023));
    assert!(!is_leap_year(2100));
    assert!(is_leap_year(2000));
    assert_eq!(days_in_year(2024), 366);
    assert_eq!(days_in_year(2025), 365);

    // Before February 29, a leap year has one extra day left.
    let jan31_leap = ms_until_new_year(&local(2024, 1, 31, 0, 0, 0));
    let jan31_common = ms_until_new_year(&local(2023, 1, 31, 0, 0, 0));
    assert_eq!(jan31_leap - jan31_common, MS_PER_DAY);

    // After it, both years have the same number of days left.
    let mar1_leap = ms_until_new_year(&local(2024, 3, 1, 0, 0, 0));
    let mar1_common = ms_until_new_year(&local(2023, 3, 1, 0, 0, 0));
    assert_eq!(mar1_leap, mar1_common);
}

#[test]
fn celebration_year_tracks_the_rollover() {
    use midnight_core::celebration_year;
    // Counting down in December: the celebrated year is the next one.
    assert_eq!(celebration_year(&local(2026, 12, 31, 23, 59, 59)), 2027);
    // A reading taken just after the tick crosses zero is already January 1
    // of the new year; the displayed year must not advance twice.
    assert_eq!(celebration_year(&local(2027, 1, 1, 0, 0, 0)), 2027);
}

#[test]
fn last_second_of_the_year() {
    let remaining = ms_until_new_year(&local(2026, 12, 31, 23, 59, 59));
    assert_eq!(remaining, 1_000.0);
}

#[test]
fn parse_en_us_wall_clock_string() {
    let t = LocalTime::parse_en_us("12/31/2025, 23:59:58").expect("valid");
    assert_eq!(t, local(2025, 12, 31, 23, 59, 58));
}

#[test]
fn parse_wraps_hour_24_to_midnight() {
    let t = LocalTime::parse_en_us("1/1/2026, 24:00:00").expect("valid");
    assert_eq!(t.hour, 0);
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!(
        LocalTime::parse_en_us("not a date"),
        Err(TimeParseError::Malformed(_))
    ));
    assert!(matches!(
        LocalTime::parse_en_us("13/1/2026, 00:00:00"),
        Err(TimeParseError::OutOfRange(_))
    ));
}
