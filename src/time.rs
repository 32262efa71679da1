use hifitime::Epoch;

use crate::constants::{
    JulianDay, DAYS_PER_CENTURY, DAYS_PER_MILLENNIUM, J2000_JD, JDTOMJD, MAX_JULIAN_DAY,
    MIN_JULIAN_DAY, MJD,
};
use crate::orrery_errors::OrreryError;

/// Check that a Julian Day can be fed to the truncated series.
///
/// Argument
/// --------
/// * `jd`: the Julian Day to validate
///
/// Return
/// ------
/// * the same Julian Day, or [`OrreryError::InvalidJulianDay`] when it is not finite or
///   falls outside `[MIN_JULIAN_DAY, MAX_JULIAN_DAY]` (inclusive on both ends).
pub fn validate_julian_day(jd: JulianDay) -> Result<JulianDay, OrreryError> {
    if jd.is_finite() && (MIN_JULIAN_DAY..=MAX_JULIAN_DAY).contains(&jd) {
        Ok(jd)
    } else {
        Err(OrreryError::InvalidJulianDay(jd))
    }
}

/// Julian centuries of 36525 days elapsed since J2000.0.
pub fn julian_centuries(jd: JulianDay) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian millennia elapsed since J2000.0, the time argument τ of VSOP87.
pub fn julian_millennia(jd: JulianDay) -> f64 {
    (jd - J2000_JD) / DAYS_PER_MILLENNIUM
}

/// Transformation from a calendar date and UTC time of day to a Julian Day.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: Gregorian calendar date, assumed already validated
/// * `hour`, `minute`, `second`: UTC time of day
///
/// Return
/// ------
/// * the Julian Day (UTC) of that instant
pub fn calendar_to_julian_day(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> JulianDay {
    Epoch::from_gregorian_utc(year, month, day, hour, minute, second, 0).to_jde_utc_days()
}

/// Transformation from modified julian date (MJD) in julian date (JD)
pub fn mjd_to_jd(mjd: MJD) -> JulianDay {
    Epoch::from_mjd_utc(mjd).to_jde_utc_days()
}

/// Transformation from julian date (JD) in modified julian date (MJD)
pub fn jd_to_mjd(jd: JulianDay) -> MJD {
    jd - JDTOMJD
}

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days of a Gregorian month, `None` when the month is out of `1..=12`.
pub fn days_in_month(year: i32, month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Format an epoch as an ISO-8601 UTC timestamp with second resolution, e.g. `1985-01-04T01:00:00Z`.
pub fn format_iso_utc(epoch: &Epoch) -> String {
    let (y, mo, d, h, mi, s, _) = epoch.to_gregorian_utc();
    format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z")
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_julian_day_bounds() {
        assert_eq!(validate_julian_day(MIN_JULIAN_DAY), Ok(MIN_JULIAN_DAY));
        assert_eq!(validate_julian_day(MAX_JULIAN_DAY), Ok(MAX_JULIAN_DAY));
        assert_eq!(
            validate_julian_day(MIN_JULIAN_DAY - 0.5),
            Err(OrreryError::InvalidJulianDay(MIN_JULIAN_DAY - 0.5))
        );
        assert!(validate_julian_day(MAX_JULIAN_DAY + 1e-6).is_err());
        assert!(validate_julian_day(f64::NAN).is_err());
        assert!(validate_julian_day(f64::INFINITY).is_err());
    }

    #[test]
    fn test_time_arguments() {
        assert_eq!(julian_centuries(J2000_JD), 0.0);
        assert_relative_eq!(julian_centuries(J2000_JD + 36525.0), 1.0);
        assert_relative_eq!(julian_millennia(J2000_JD - 365250.0), -1.0);
    }

    #[test]
    fn test_calendar_to_julian_day() {
        assert_eq!(calendar_to_julian_day(2000, 1, 1, 12, 0, 0), J2000_JD);
        assert_eq!(calendar_to_julian_day(1900, 1, 1, 0, 0, 0), MIN_JULIAN_DAY);
        assert_eq!(calendar_to_julian_day(2100, 1, 1, 0, 0, 0), MAX_JULIAN_DAY - 1.0);
        assert_eq!(calendar_to_julian_day(2100, 1, 2, 0, 0, 0), MAX_JULIAN_DAY);
        assert_relative_eq!(
            calendar_to_julian_day(1985, 1, 4, 1, 0, 0),
            2446069.541_666_666_5,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_mjd_to_jd() {
        assert_eq!(mjd_to_jd(59215.0), 2459215.5);
        assert_eq!(jd_to_mjd(2459215.5), 59215.0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 13), None);
        assert_eq!(days_in_month(2023, 0), None);
    }

    #[test]
    fn test_format_iso_utc() {
        let epoch = Epoch::from_gregorian_utc(1985, 1, 4, 1, 0, 0, 0);
        assert_eq!(format_iso_utc(&epoch), "1985-01-04T01:00:00Z");
    }
}
