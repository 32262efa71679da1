//! Timezone lookup collaborators.
//!
//! [`TimezoneLookup`] is the seam to whatever service maps coordinates to a timezone.
//! The crate ships two implementations that never touch the network:
//!
//! * [`RegionTableLookup`] – a coarse table of coordinate boxes for the regions most
//!   charts come from. Anything outside the table is reported as unresolved, which makes
//!   the converter fall back to the longitude rule.
//! * [`SyncLookup`] – wraps any synchronous closure, handy for tests and for callers that
//!   already hold a resolved timezone.

use std::future::{ready, Future};
use std::sync::Arc;

use crate::orrery_errors::OrreryError;
use crate::timezone::civil::CivilDate;
use crate::timezone::{TimezoneInfo, TimezoneSource};

/// Resolves the timezone in force at a location.
///
/// Implementations report the **standard** (non-summer) offset in `offset_hours`; summer
/// time is decided by the converter's region heuristic.
pub trait TimezoneLookup: Send + Sync {
    fn get_timezone_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        date: &CivilDate,
    ) -> impl Future<Output = Result<TimezoneInfo, OrreryError>> + Send;
}

impl<T: TimezoneLookup> TimezoneLookup for Arc<T> {
    fn get_timezone_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        date: &CivilDate,
    ) -> impl Future<Output = Result<TimezoneInfo, OrreryError>> + Send {
        self.as_ref()
            .get_timezone_for_coordinates(latitude, longitude, date)
    }
}

/// Adapter turning a synchronous closure into a [`TimezoneLookup`].
#[derive(Debug, Clone)]
pub struct SyncLookup<F>(pub F);

impl<F> TimezoneLookup for SyncLookup<F>
where
    F: Fn(f64, f64, &CivilDate) -> Result<TimezoneInfo, OrreryError> + Send + Sync,
{
    fn get_timezone_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        date: &CivilDate,
    ) -> impl Future<Output = Result<TimezoneInfo, OrreryError>> + Send {
        ready((self.0)(latitude, longitude, date))
    }
}

/// A latitude/longitude box mapped to one timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBox {
    pub name: &'static str,
    pub offset_hours: f64,
    pub latitude: (f64, f64),
    pub longitude: (f64, f64),
}

impl RegionBox {
    fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.latitude.0..=self.latitude.1).contains(&latitude)
            && (self.longitude.0..=self.longitude.1).contains(&longitude)
    }
}

const fn region(
    name: &'static str,
    offset_hours: f64,
    latitude: (f64, f64),
    longitude: (f64, f64),
) -> RegionBox {
    RegionBox {
        name,
        offset_hours,
        latitude,
        longitude,
    }
}

/// Built-in regions, first match wins.
pub const DEFAULT_REGIONS: &[RegionBox] = &[
    region("Asia/Kolkata", 5.5, (6.0, 36.0), (68.0, 97.5)),
    region("Asia/Tokyo", 9.0, (24.0, 46.0), (123.0, 146.0)),
    region("Europe/London", 0.0, (49.5, 61.0), (-11.0, 2.0)),
    region("Europe/Paris", 1.0, (36.0, 55.0), (2.0, 16.0)),
    region("Australia/Sydney", 10.0, (-44.0, -10.0), (141.0, 154.0)),
    region("America/New_York", -5.0, (24.0, 49.0), (-87.5, -67.0)),
    region("America/Chicago", -6.0, (25.0, 49.0), (-102.0, -87.5)),
    region("America/Denver", -7.0, (31.0, 49.0), (-114.0, -102.0)),
    region("America/Los_Angeles", -8.0, (32.0, 49.0), (-125.0, -114.0)),
];

/// Offline lookup over a table of [`RegionBox`]es.
#[derive(Debug, Clone)]
pub struct RegionTableLookup {
    regions: Vec<RegionBox>,
}

impl Default for RegionTableLookup {
    fn default() -> Self {
        RegionTableLookup {
            regions: DEFAULT_REGIONS.to_vec(),
        }
    }
}

impl RegionTableLookup {
    pub fn new(regions: Vec<RegionBox>) -> Self {
        RegionTableLookup { regions }
    }

    pub fn resolve(&self, latitude: f64, longitude: f64) -> Result<TimezoneInfo, OrreryError> {
        self.regions
            .iter()
            .find(|r| r.contains(latitude, longitude))
            .map(|r| TimezoneInfo {
                name: r.name.to_string(),
                offset_hours: r.offset_hours,
                dst: false,
                source: TimezoneSource::Service,
            })
            .ok_or_else(|| {
                OrreryError::TimezoneResolution(format!(
                    "no region covers ({latitude}, {longitude})"
                ))
            })
    }
}

impl TimezoneLookup for RegionTableLookup {
    fn get_timezone_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        _date: &CivilDate,
    ) -> impl Future<Output = Result<TimezoneInfo, OrreryError>> + Send {
        ready(self.resolve(latitude, longitude))
    }
}

#[cfg(test)]
mod lookup_test {
    use super::*;

    #[test]
    fn test_region_table() {
        let lookup = RegionTableLookup::default();
        assert_eq!(lookup.resolve(25.4358, 81.8463).unwrap().name, "Asia/Kolkata");
        assert_eq!(lookup.resolve(48.8566, 2.3522).unwrap().offset_hours, 1.0);
        assert_eq!(lookup.resolve(51.5074, -0.1278).unwrap().name, "Europe/London");
        assert_eq!(
            lookup.resolve(40.7128, -74.0060).unwrap().name,
            "America/New_York"
        );
        assert_eq!(
            lookup.resolve(-33.8688, 151.2093).unwrap().name,
            "Australia/Sydney"
        );
        assert!(matches!(
            lookup.resolve(0.0, -30.0),
            Err(OrreryError::TimezoneResolution(_))
        ));
    }

    #[tokio::test]
    async fn test_sync_lookup_adapter() {
        let lookup = SyncLookup(|_lat: f64, lng: f64, _date: &CivilDate| {
            Ok(TimezoneInfo {
                name: "Test/Zone".into(),
                offset_hours: lng / 10.0,
                dst: false,
                source: TimezoneSource::Service,
            })
        });
        let date = CivilDate {
            year: 2000,
            month: 1,
            day: 1,
        };
        let info = lookup
            .get_timezone_for_coordinates(0.0, 30.0, &date)
            .await
            .unwrap();
        assert_eq!(info.offset_hours, 3.0);

        let shared = Arc::new(RegionTableLookup::default());
        let info = shared
            .get_timezone_for_coordinates(35.68, 139.69, &date)
            .await
            .unwrap();
        assert_eq!(info.name, "Asia/Tokyo");
    }
}
