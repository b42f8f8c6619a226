use crate::{TimeError, TimeResult};
use celestial_core::constants::{J2000_JD, MILLISECONDS_PER_DAY, UNIX_EPOCH_JD};
use chrono::{NaiveDate, TimeZone, Utc};
use std::fmt;

/// Two-part Julian Date.
///
/// `jd1` carries the large whole-day part and `jd2` the fraction so that
/// millisecond timestamps keep their precision through sidereal-time math.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn unix_epoch() -> Self {
        Self::new(UNIX_EPOCH_JD, 0.0)
    }

    /// Julian Date for a Unix timestamp in milliseconds (UTC, leap seconds ignored).
    ///
    /// ```
    /// use celestial_time::JulianDate;
    ///
    /// // 2000-01-01T12:00:00Z
    /// let jd = JulianDate::from_unix_millis(946_728_000_000);
    /// assert_eq!(jd.to_f64(), 2_451_545.0);
    /// ```
    pub fn from_unix_millis(millis: i64) -> Self {
        let whole_days = millis.div_euclid(86_400_000);
        let rem_millis = millis.rem_euclid(86_400_000);
        Self::new(
            UNIX_EPOCH_JD + whole_days as f64,
            rem_millis as f64 / MILLISECONDS_PER_DAY,
        )
    }

    /// Julian Date for a UTC calendar instant. `month` is 1-based.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> TimeResult<Self> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                TimeError::InvalidDate(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                ))
            })?;
        Ok(Self::from_unix_millis(
            Utc.from_utc_datetime(&naive).timestamp_millis(),
        ))
    }

    /// Days elapsed since J2000.0, keeping the fractional part precise.
    pub fn days_since_j2000(&self) -> f64 {
        (self.jd1 - J2000_JD) + self.jd2
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_unix_epoch() {
        assert_eq!(JulianDate::from_unix_millis(0), JulianDate::unix_epoch());
        assert_eq!(JulianDate::unix_epoch().to_f64(), 2_440_587.5);
    }

    #[test]
    fn test_j2000_from_millis() {
        let jd = JulianDate::from_unix_millis(946_728_000_000);
        assert_eq!(jd.to_f64(), J2000_JD);
        assert_eq!(jd.days_since_j2000(), 0.0);
    }

    #[test]
    fn test_midnight_and_quarter_day() {
        // 2000-01-01T00:00:00Z and 06:00:00Z
        let midnight = JulianDate::from_unix_millis(946_684_800_000);
        assert_abs_diff_eq!(midnight.to_f64(), 2_451_544.5, epsilon = 1e-9);
        let six_am = JulianDate::from_unix_millis(946_684_800_000 + 6 * 3_600_000);
        assert_abs_diff_eq!(six_am.to_f64(), 2_451_544.75, epsilon = 1e-9);
    }

    #[test]
    fn test_before_unix_epoch() {
        // 1969-12-31T18:00:00Z
        let jd = JulianDate::from_unix_millis(-6 * 3_600_000);
        assert_abs_diff_eq!(jd.to_f64(), 2_440_587.25, epsilon = 1e-12);
        assert!(jd.jd2 >= 0.0);
    }

    #[test]
    fn test_one_day_apart() {
        let a = JulianDate::from_unix_millis(1_700_000_000_000);
        let b = JulianDate::from_unix_millis(1_700_000_000_000 + 86_400_000);
        assert_abs_diff_eq!(b.to_f64() - a.to_f64(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.add_days(1.0).to_f64(), b.to_f64(), epsilon = 1e-9);
    }

    #[test]
    fn test_from_calendar() {
        let jd = JulianDate::from_calendar(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(jd, JulianDate::from_unix_millis(946_728_000_000));
        assert_eq!(jd.to_f64(), J2000_JD);

        let err = JulianDate::from_calendar(2001, 2, 29, 0, 0, 0).unwrap_err();
        assert!(matches!(err, TimeError::InvalidDate(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(JulianDate::j2000().to_string(), "JD 2451545.000000000");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = JulianDate::from_unix_millis(1_234_567_890_123);
        let json = serde_json::to_string(&original).unwrap();
        let back: JulianDate = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
