//! Parsing and validation of the civil date, time and location of a birth record.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::orrery_errors::OrreryError;
use crate::time::days_in_month;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2}))?$").unwrap());

/// Gregorian calendar date, no timezone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CivilDate {
    /// Parse a `YYYY-MM-DD` string and check that the day exists in that month.
    pub fn parse(input: &str) -> Result<Self, OrreryError> {
        let invalid = || OrreryError::InvalidDate(input.to_string());
        let caps = DATE_RE.captures(input.trim()).ok_or_else(invalid)?;

        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u8 = caps[2].parse().map_err(|_| invalid())?;
        let day: u8 = caps[3].parse().map_err(|_| invalid())?;

        match days_in_month(year, month) {
            Some(last) if (1..=last).contains(&day) => Ok(CivilDate { year, month, day }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Wall-clock time on a 24 h clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivilTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CivilTime {
    /// Parse `HH:MM` or `HH:MM:SS`.
    pub fn parse(input: &str) -> Result<Self, OrreryError> {
        let invalid = || OrreryError::InvalidTime(input.to_string());
        let caps = TIME_RE.captures(input.trim()).ok_or_else(invalid)?;

        let hour: u8 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u8 = caps[2].parse().map_err(|_| invalid())?;
        let second: u8 = match caps.get(3) {
            Some(s) => s.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };

        if hour > 23 || minute > 59 || second > 59 {
            return Err(invalid());
        }
        Ok(CivilTime {
            hour,
            minute,
            second,
        })
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Geographic location in degrees, east longitudes positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// Latitude in `[-90, 90]`, longitude in `[-180, 180]`, both finite.
    pub fn validate(&self) -> Result<(), OrreryError> {
        if (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude) {
            Ok(())
        } else {
            Err(OrreryError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[cfg(test)]
mod civil_test {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            CivilDate::parse("1985-01-04").unwrap(),
            CivilDate {
                year: 1985,
                month: 1,
                day: 4
            }
        );
        assert!(CivilDate::parse("2024-02-29").is_ok());
        assert_eq!(
            CivilDate::parse("2023-02-29"),
            Err(OrreryError::InvalidDate("2023-02-29".into()))
        );
        for bad in ["1985-1-4", "04/01/1985", "1985-13-01", "1985-00-10", "1985-04-31", ""] {
            assert!(CivilDate::parse(bad).is_err(), "{bad}");
        }
        assert_eq!(CivilDate::parse("1985-01-04").unwrap().to_string(), "1985-01-04");
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            CivilTime::parse("06:30").unwrap(),
            CivilTime {
                hour: 6,
                minute: 30,
                second: 0
            }
        );
        assert_eq!(CivilTime::parse("23:59:59").unwrap().second, 59);
        for bad in ["24:00", "12:60", "6:30", "12:30:60", "noon", "12:30pm"] {
            assert!(CivilTime::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location::new(25.4358, 81.8463).validate().is_ok());
        assert!(Location::new(-90.0, 180.0).validate().is_ok());
        assert!(Location::new(90.5, 0.0).validate().is_err());
        assert!(Location::new(0.0, -180.1).validate().is_err());
        assert!(Location::new(f64::NAN, 0.0).validate().is_err());
    }
}
