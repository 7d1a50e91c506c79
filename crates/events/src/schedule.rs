//! Write-side date handling.
//!
//! The store keeps a plain calendar date, but write payloads carry a full
//! datetime. To keep the day a user picked from sliding across the store's
//! timezone handling, the write path shifts the submitted moment by the
//! local UTC offset. Reads parse the stored calendar date as-is; there is
//! no inverse correction on the way back.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};

/// Shift a write-side moment by the local UTC offset.
///
/// `utc_offset_minutes` follows the minutes-west-of-UTC convention:
/// positive when local time is behind UTC. A positive offset adds that many
/// minutes; anything else subtracts the absolute offset, which makes offset
/// 0 the identity.
pub fn adjust_for_timezone(moment: DateTime<Utc>, utc_offset_minutes: i32) -> DateTime<Utc> {
    if utc_offset_minutes > 0 {
        moment + Duration::minutes(i64::from(utc_offset_minutes))
    } else {
        moment - Duration::minutes(i64::from(utc_offset_minutes.unsigned_abs()))
    }
}

/// Local UTC offset in minutes west of UTC (positive when local time is
/// behind UTC).
pub fn local_utc_offset_minutes() -> i32 {
    -(Local::now().offset().local_minus_utc() / 60)
}

/// The moment submitted for a picked calendar day: midnight of that day,
/// adjusted for the given offset so the store records the intended date.
pub fn write_moment(date: NaiveDate, utc_offset_minutes: i32) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    adjust_for_timezone(midnight, utc_offset_minutes)
}
