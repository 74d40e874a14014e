//! MS-DOS packed date/time decoding.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A calendar timestamp decoded from a packed 32-bit DOS date/time.
///
/// DOS date/time format:
/// - Time: bits 0-4 = seconds/2, bits 5-10 = minutes, bits 11-15 = hours
/// - Date: bits 16-20 = day, bits 21-24 = month, bits 25-31 = year-1980
///
/// Fields are decoded as-is without range checks, so a corrupted value
/// may hold e.g. month 14. [`DosDateTime::to_system_time`] validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DosDateTime {
    /// Full year (1980-2107).
    pub year: u16,
    /// Zero-based month (January = 0). A zeroed DOS month field gives -1.
    pub month: i8,
    /// Day of the month, starting at 1.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Seconds, always even.
    pub second: u8,
}

impl DosDateTime {
    /// Decode a packed DOS date/time as stored in ZIP headers.
    pub fn from_raw(raw: u32) -> Self {
        let date = raw >> 16;
        let time = raw & 0xFFFF;

        Self {
            year: 1980 + ((date >> 9) & 0x7F) as u16,
            month: ((date >> 5) & 0x0F) as i8 - 1,
            day: (date & 0x1F) as u8,
            hour: ((time >> 11) & 0x1F) as u8,
            minute: ((time >> 5) & 0x3F) as u8,
            second: ((time & 0x1F) * 2) as u8,
        }
    }

    /// Convert to a SystemTime, interpreting the fields as UTC.
    ///
    /// Returns None if the fields do not form a valid calendar date.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if !(0..12).contains(&self.month) {
            return None;
        }
        let month = self.month as u32 + 1;
        let day = self.day as u32;

        if day < 1
            || day > days_in_month(self.year as i32, month)
            || self.hour > 23
            || self.minute > 59
            || self.second > 59
        {
            return None;
        }

        let mut days = 0i64;
        for y in 1970..self.year as i32 {
            days += if is_leap_year(y) { 366 } else { 365 };
        }
        for m in 1..month {
            days += days_in_month(self.year as i32, m) as i64;
        }
        days += (day - 1) as i64;

        let secs = days * 86400
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64;

        UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64))
    }
}

impl fmt::Display for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month + 1,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
