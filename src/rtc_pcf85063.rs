// PCF85063 real-time clock, the wall-clock source for the minute ticks.
// Registers from 0x04 hold seconds through years in BCD.

use core::fmt;

use embedded_hal::i2c::I2c;

use crate::clock::Tick;

pub const ADDRESS: u8 = 0x51;
const REG_SECONDS: u8 = 0x04;

// Oscillator stopped since the time was last set
const VL_FLAG: u8 = 0x80;
const CENTURY_FLAG: u8 = 0x80;

const SECS_PER_DAY: u32 = 86_400;
// 0000-03-01 to 1970-01-01
const EPOCH_SHIFT_DAYS: i32 = 719_468;
const DAYS_PER_ERA: i32 = 146_097;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RtcError<E> {
    Bus(E),
    /// The oscillator stopped; the stored time can't be trusted.
    ClockIntegrity,
    /// Registers decoded to a date outside 2020..=2099 or a bad field.
    InvalidTime,
}

impl<E> From<E> for RtcError<E> {
    fn from(e: E) -> Self {
        RtcError::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::Bus(e) => write!(f, "i2c error: {:?}", e),
            RtcError::ClockIntegrity => f.write_str("clock integrity lost"),
            RtcError::InvalidTime => f.write_str("invalid time in registers"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub fn is_valid(&self) -> bool {
        (2020..=2099).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Hour and minute as the face's 24 hour tick.
    pub fn tick(&self) -> Tick {
        Tick::new(self.hour, self.minute)
    }
}

impl From<&DateTime> for Tick {
    fn from(dt: &DateTime) -> Self {
        dt.tick()
    }
}

pub struct Pcf85063<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Pcf85063<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Registers as read, including the VL flag.
    pub fn read_raw(&mut self) -> Result<(DateTime, bool), RtcError<I2C::Error>> {
        let mut regs = [0u8; 7];
        self.i2c.write_read(ADDRESS, &[REG_SECONDS], &mut regs)?;

        let stopped = regs[0] & VL_FLAG != 0;
        let month_reg = regs[5];
        let century = if month_reg & CENTURY_FLAG != 0 { 1900 } else { 2000 };

        let dt = DateTime {
            second: from_bcd(regs[0] & 0x7f),
            minute: from_bcd(regs[1] & 0x7f),
            hour: from_bcd(regs[2] & 0x3f),
            day: from_bcd(regs[3] & 0x3f),
            // regs[4] is the weekday
            month: from_bcd(month_reg & 0x1f),
            year: century + from_bcd(regs[6]) as u16,
        };
        Ok((dt, stopped))
    }

    /// Current date and time; fails when the clock lost power or decoded
    /// to nonsense.
    pub fn read_datetime(&mut self) -> Result<DateTime, RtcError<I2C::Error>> {
        let (dt, stopped) = self.read_raw()?;
        if stopped {
            return Err(RtcError::ClockIntegrity);
        }
        if !dt.is_valid() {
            return Err(RtcError::InvalidTime);
        }
        Ok(dt)
    }

    /// Write a new time. Clears the VL flag; the weekday is written as 0.
    pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), RtcError<I2C::Error>> {
        if !dt.is_valid() {
            return Err(RtcError::InvalidTime);
        }
        let frame = [
            REG_SECONDS,
            to_bcd(dt.second),
            to_bcd(dt.minute),
            to_bcd(dt.hour),
            to_bcd(dt.day),
            0,
            to_bcd(dt.month),
            to_bcd((dt.year % 100) as u8),
        ];
        self.i2c.write(ADDRESS, &frame)?;
        Ok(())
    }
}

fn from_bcd(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0f)
}

fn to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

// Civil-from-days on a March based year, valid for the RTC's range
fn days_from_civil(year: u16, month: u8, day: u8) -> i32 {
    let (y, m) = if month <= 2 {
        (year as i32 - 1, month as i32 + 9)
    } else {
        (year as i32, month as i32 - 3)
    };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * m + 2) / 5 + day as i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT_DAYS
}

/// Seconds since 1970-01-01 00:00:00.
pub fn datetime_to_unix(dt: &DateTime) -> u32 {
    let days = days_from_civil(dt.year, dt.month, dt.day).max(0) as u64;
    let secs = days * SECS_PER_DAY as u64
        + dt.hour as u64 * 3600
        + dt.minute as u64 * 60
        + dt.second as u64;
    secs.min(u32::MAX as u64) as u32
}

pub fn unix_to_datetime(ts: u32) -> DateTime {
    let days = (ts / SECS_PER_DAY) as i32;
    let rem = ts % SECS_PER_DAY;

    let z = days + EPOCH_SHIFT_DAYS;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i32::from(month <= 2);

    DateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour: (rem / 3600) as u8,
        minute: (rem % 3600 / 60) as u8,
        second: (rem % 60) as u8,
    }
}
