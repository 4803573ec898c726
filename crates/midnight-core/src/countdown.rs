use crate::constants::TEST_WINDOW_MS;
use thiserror::Error;

/// Sentinel timezone value that runs the countdown over a fixed 10-second
/// test window instead of waiting for the real new year.
pub const TEST_MODE: &str = "TEST_MODE";

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("malformed wall-clock string: {0:?}")]
    Malformed(String),
    #[error("field out of range in wall-clock string: {0:?}")]
    OutOfRange(String),
}

/// A wall-clock reading local to some timezone. Produced on the web side by
/// round-tripping through a locale-formatted string, so millisecond precision
/// is lost (always 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalTime {
    /// Parse the `en-US` 24-hour locale form, e.g. `"12/31/2025, 23:59:58"`.
    /// Some engines emit hour 24 for midnight; it wraps to 0.
    pub fn parse_en_us(s: &str) -> Result<Self, TimeParseError> {
        let malformed = || TimeParseError::Malformed(s.to_string());
        let (date, time) = s.trim().split_once(", ").ok_or_else(malformed)?;

        let mut date_parts = date.split('/');
        let month: u32 = next_field(&mut date_parts, s)?;
        let day: u32 = next_field(&mut date_parts, s)?;
        let year: i32 = next_field(&mut date_parts, s)?;

        let mut time_parts = time.split(':');
        let hour: u32 = next_field(&mut time_parts, s)?;
        let minute: u32 = next_field(&mut time_parts, s)?;
        let second: u32 = next_field(&mut time_parts, s)?;

        let hour = if hour == 24 { 0 } else { hour };
        let t = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        if !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(TimeParseError::OutOfRange(s.to_string()));
        }
        Ok(t)
    }

    pub fn ms_into_day(&self) -> f64 {
        self.hour as f64 * MS_PER_HOUR
            + self.minute as f64 * MS_PER_MINUTE
            + self.second as f64 * MS_PER_SECOND
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> u32 {
        const CUMULATIVE: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
        let mut doy = CUMULATIVE[(self.month - 1) as usize] + self.day;
        if self.month > 2 && is_leap_year(self.year) {
            doy += 1;
        }
        doy
    }
}

fn next_field<'a, T: std::str::FromStr>(
    parts: &mut impl Iterator<Item = &'a str>,
    src: &str,
) -> Result<T, TimeParseError> {
    parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(|| TimeParseError::Malformed(src.to_string()))
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Milliseconds from a local wall-clock reading until the first moment of
/// January 1 of the following year, in the same wall-clock frame.
pub fn ms_until_new_year(t: &LocalTime) -> f64 {
    let full_days_left = (days_in_year(t.year) - t.day_of_year()) as f64;
    full_days_left * MS_PER_DAY + (MS_PER_DAY - t.ms_into_day())
}

/// The year a midnight celebration rings in, given a wall-clock reading taken
/// around the rollover. December readings precede midnight so the new year is
/// the next one; a reading already inside January is past it.
pub fn celebration_year(t: &LocalTime) -> i32 {
    if t.month == 12 {
        t.year + 1
    } else {
        t.year
    }
}

/// Timezone-aware wall-clock reader, implemented over `js_sys::Date` on the
/// web and by fakes in tests.
pub trait WallClock {
    fn utc_now_ms(&self) -> f64;
    fn local_now(&self, timezone: &str) -> Option<LocalTime>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPhase {
    Running,
    /// Terminal: the midnight event has fired and ticking is over.
    Reached,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CountdownDisplay {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub hundredths: u32,
    /// Progress-ring value in [0, 100]. Test mode sweeps linearly over the
    /// window; normal mode is a cosmetic per-minute sawtooth.
    pub progress: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct CountdownTick {
    pub display: CountdownDisplay,
    /// True exactly once, on the tick that crosses zero.
    pub reached: bool,
}

/// `Running -> Reached` state machine ticked on a short external interval.
pub struct CountdownEngine {
    timezone: String,
    phase: CountdownPhase,
    test_anchor_ms: Option<f64>,
}

impl CountdownEngine {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
            phase: CountdownPhase::Running,
            test_anchor_ms: None,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn is_test_mode(&self) -> bool {
        self.timezone == TEST_MODE
    }

    /// Switching timezone logically restarts the engine: the test-mode anchor
    /// is dropped and the phase returns to `Running`. No remaining time is
    /// carried over.
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
        self.test_anchor_ms = None;
        self.phase = CountdownPhase::Running;
    }

    pub fn tick(&mut self, clock: &impl WallClock) -> CountdownTick {
        if self.phase == CountdownPhase::Reached {
            return CountdownTick {
                display: reached_display(),
                reached: false,
            };
        }

        let remaining = if self.is_test_mode() {
            let now = clock.utc_now_ms();
            let anchor = *self.test_anchor_ms.get_or_insert(now);
            TEST_WINDOW_MS - (now - anchor)
        } else {
            match clock.local_now(&self.timezone) {
                Some(t) => ms_until_new_year(&t),
                None => {
                    log::warn!("wall clock unavailable for {}", self.timezone);
                    return CountdownTick {
                        display: CountdownDisplay::default(),
                        reached: false,
                    };
                }
            }
        };

        if remaining <= 0.0 {
            self.phase = CountdownPhase::Reached;
            return CountdownTick {
                display: reached_display(),
                reached: true,
            };
        }

        let hours = (remaining / MS_PER_HOUR).floor() as u32;
        let minutes = ((remaining % MS_PER_HOUR) / MS_PER_MINUTE).floor() as u32;
        let seconds = ((remaining % MS_PER_MINUTE) / MS_PER_SECOND).floor() as u32;
        let hundredths = ((remaining % MS_PER_SECOND) / 10.0).floor() as u32;
        let progress = if self.is_test_mode() {
            ((TEST_WINDOW_MS - remaining) / TEST_WINDOW_MS * 100.0) as f32
        } else {
            seconds as f32 / 60.0 * 100.0
        };

        CountdownTick {
            display: CountdownDisplay {
                hours,
                minutes,
                seconds,
                hundredths,
                progress,
            },
            reached: false,
        }
    }
}

fn reached_display() -> CountdownDisplay {
    CountdownDisplay {
        progress: 100.0,
        ..Default::default()
    }
}
