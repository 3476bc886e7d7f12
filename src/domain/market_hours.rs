//! Market-hours gating.
//!
//! Trading is permitted Monday through Friday, 09:35 up to and including
//! 15:55 exchange time. The first and last minutes of the regular session
//! fall outside the window.

use chrono::{Datelike, Timelike, Weekday};

/// True when `dt` (exchange local time) falls inside the trading window.
pub fn market_open<T: Datelike + Timelike>(dt: &T) -> bool {
    if matches!(dt.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    if dt.hour() < 9 || dt.hour() > 15 {
        return false;
    }
    if dt.hour() == 9 && dt.minute() < 35 {
        return false;
    }
    if dt.hour() == 15 && dt.minute() > 55 {
        return false;
    }
    true
}

/// True when `dt` is past the session close boundary on the same day.
pub fn after_close<T: Timelike>(dt: &T) -> bool {
    dt.hour() > 15 || (dt.hour() == 15 && dt.minute() > 55)
}
