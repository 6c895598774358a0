//! Wall-clock state of the face.
//!
//! This module provides:
//! - `Tick`, the once-per-minute payload coming from the RTC
//! - `ClockTime`, the 12-hour time the face displays
//! - `hours_to_minutes` for placing the hour hand on a 60 step dial
//! - `MinuteTicker`, which turns periodic RTC reads into minute ticks

use core::fmt::{self, Write};

use heapless::String;

/// `HH:MM`
pub type TimeText = String<5>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::HourOutOfRange(h) => write!(f, "hour {} out of range", h),
            TimeError::MinuteOutOfRange(m) => write!(f, "minute {} out of range", m),
        }
    }
}

/// 24-hour wall-clock time delivered once per minute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub hour: u8,
    pub minute: u8,
}

impl Tick {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// Time as shown on the face: hours 0..=11, minutes 0..=59.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hours: 0, minutes: 0 };

    /// Build from 12-hour values.
    pub fn new(hours: u8, minutes: u8) -> Result<Self, TimeError> {
        if hours > 11 {
            return Err(TimeError::HourOutOfRange(hours));
        }
        if minutes > 59 {
            return Err(TimeError::MinuteOutOfRange(minutes));
        }
        Ok(Self { hours, minutes })
    }

    /// Build from a 24-hour reading, folding the hour into 0..=11.
    pub fn from_24h(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        Self::new(hour % 12, minute)
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Hour as printed on the face; 0 reads as 12.
    pub fn display_hour(&self) -> u8 {
        if self.hours == 0 { 12 } else { self.hours }
    }

    /// Zero padded `HH:MM`, no AM/PM marker.
    pub fn to_text(&self) -> TimeText {
        let mut text = TimeText::new();
        // 5 bytes always fit
        let _ = write!(text, "{:02}:{:02}", self.display_hour(), self.minutes);
        text
    }
}

impl TryFrom<Tick> for ClockTime {
    type Error = TimeError;

    fn try_from(tick: Tick) -> Result<Self, Self::Error> {
        ClockTime::from_24h(tick.hour, tick.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.display_hour(), self.minutes)
    }
}

/// Hours out of 12 expressed on a 60 step dial, rounded.
pub fn hours_to_minutes(hours_out_of_12: i32) -> i32 {
    libm::roundf(hours_out_of_12 as f32 / 12.0 * 60.0) as i32
}

/// Detects minute boundaries in a stream of RTC readings.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<(u8, u8)>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns a tick for the first reading and for every reading whose
    /// hour/minute differs from the previous one.
    pub fn observe(&mut self, hour: u8, minute: u8) -> Option<Tick> {
        if self.last == Some((hour, minute)) {
            return None;
        }
        self.last = Some((hour, minute));
        Some(Tick::new(hour, minute))
    }
}
