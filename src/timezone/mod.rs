//! # Timezone-aware birth time conversion
//!
//! Converts a local civil birth date/time at a geographic location into a UTC instant.
//!
//! ## Pipeline
//!
//! 1. Validate the inputs: `YYYY-MM-DD`, `HH:MM[:SS]`, latitude and longitude ranges,
//!    and a real calendar date. These are the only errors returned to the caller.
//! 2. Resolve a [`TimezoneInfo`] through the injected [`TimezoneLookup`] under a
//!    timeout. A failure, a timeout or an implausible answer is replaced by the
//!    longitude rule `offset = round(lng / 15)` (source
//!    [`TimezoneSource::LongitudeFallback`], flagged low confidence, never DST).
//! 3. Read the literal digits as a neutral instant, with no host-locale reinterpretation.
//! 4. Add one hour when the region-name DST heuristic ([`dst`]) says summer time.
//! 5. `UTC = neutral − effective offset`.
//! 6. Sanity warning when `|offset| > 14 h`. The naive reading of the digits is the
//!    neutral instant itself, so its drift from UTC is the offset and needs no
//!    separate check.
//!
//! The conversion never reads the system clock, so it is idempotent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orrery::timezone::{Location, TimezoneAwareConverter};
//!
//! # async fn run() -> Result<(), orrery::orrery_errors::OrreryError> {
//! let converter = TimezoneAwareConverter::default();
//! let result = converter
//!     .convert_birth_time_to_utc("1985-01-04", "06:30", Location::new(25.4358, 81.8463))
//!     .await?;
//! assert_eq!(result.utc_iso, "1985-01-04T01:00:00Z");
//! # Ok(())
//! # }
//! ```

pub mod civil;
pub mod dst;
pub mod lookup;

use std::time::Duration;

use hifitime::{Epoch, Unit};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::JulianDay;
use crate::orrery_errors::OrreryError;
use crate::time::format_iso_utc;

pub use civil::{CivilDate, CivilTime, Location};
pub use lookup::{RegionTableLookup, SyncLookup, TimezoneLookup};

/// Default upper bound on one timezone lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Offsets beyond this magnitude, in hours, trigger a warning.
pub const MAX_PLAUSIBLE_OFFSET_HOURS: f64 = 14.0;

/// Where a [`TimezoneInfo`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimezoneSource {
    /// The injected lookup collaborator
    Service,
    /// The `round(lng / 15)` rule
    LongitudeFallback,
}

/// Timezone in force at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    /// IANA-style name (`Asia/Kolkata`) or `UTC±HH:MM` for the fallback
    pub name: String,
    /// Standard offset from UTC, hours east positive
    pub offset_hours: f64,
    /// Summer-time flag reported by the collaborator; informative only
    pub dst: bool,
    pub source: TimezoneSource,
}

impl TimezoneInfo {
    /// Timezone guessed from the longitude alone.
    ///
    /// The offset is `⌊lng/15 + 0.5⌋`, so exact half-hour boundaries round up
    /// (`-7.5°` gives `0`, `7.5°` gives `+1`).
    pub fn from_longitude(longitude: f64) -> Self {
        let offset = (longitude / 15.0 + 0.5).floor() + 0.0;
        let sign = if offset < 0.0 { '-' } else { '+' };
        TimezoneInfo {
            name: format!("UTC{sign}{:02}:00", offset.abs() as i64),
            offset_hours: offset,
            dst: false,
            source: TimezoneSource::LongitudeFallback,
        }
    }
}

/// Warnings produced while converting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionValidation {
    pub warnings: Vec<String>,
    /// True when the longitude fallback was used
    pub low_confidence: bool,
    /// Why the lookup result was not used
    pub fallback_reason: Option<String>,
}

/// Result of a local → UTC conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    #[serde(skip_serializing)]
    pub utc: Epoch,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub utc_iso: String,
    pub local_date: CivilDate,
    pub local_time: CivilTime,
    pub timezone: TimezoneInfo,
    /// Effective offset applied, DST included, hours
    pub offset_hours: f64,
    /// Whether the DST heuristic added one hour
    pub dst: bool,
    pub validation: ConversionValidation,
}

impl ConversionResult {
    /// Julian Day of the UTC instant.
    pub fn julian_day(&self) -> JulianDay {
        self.utc.to_jde_utc_days()
    }

    /// Julian Ephemeris Day (TT) of the instant, the time argument of the engine.
    pub fn julian_day_tt(&self) -> JulianDay {
        self.utc.to_jde_tt_days()
    }
}

/// Converts local birth times to UTC through a [`TimezoneLookup`].
#[derive(Debug, Clone)]
pub struct TimezoneAwareConverter<L = RegionTableLookup> {
    lookup: L,
    timeout: Duration,
}

impl Default for TimezoneAwareConverter<RegionTableLookup> {
    fn default() -> Self {
        TimezoneAwareConverter::new(RegionTableLookup::default())
    }
}

impl<L: TimezoneLookup> TimezoneAwareConverter<L> {
    pub fn new(lookup: L) -> Self {
        TimezoneAwareConverter {
            lookup,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Ask the collaborator for the timezone, falling back to the longitude rule.
    ///
    /// Return
    /// ------
    /// * The timezone and, when the fallback was used, the reason.
    pub async fn resolve_timezone(
        &self,
        date: &CivilDate,
        location: &Location,
    ) -> (TimezoneInfo, Option<String>) {
        let lookup = self.lookup.get_timezone_for_coordinates(
            location.latitude,
            location.longitude,
            date,
        );

        let failure = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(info)) if info.offset_hours.is_finite() && info.offset_hours.abs() <= 24.0 => {
                debug!(timezone = %info.name, offset = info.offset_hours, "timezone resolved");
                return (info, None);
            }
            Ok(Ok(info)) => OrreryError::TimezoneResolution(format!(
                "implausible offset {} for {}",
                info.offset_hours, info.name
            )),
            Ok(Err(err)) => err,
            Err(_) => OrreryError::TimezoneLookupTimeout(self.timeout.as_millis()),
        };

        let fallback = TimezoneInfo::from_longitude(location.longitude);
        warn!(
            latitude = location.latitude,
            longitude = location.longitude,
            fallback = %fallback.name,
            "timezone lookup failed, using longitude rule: {failure}"
        );
        (fallback, Some(failure.to_string()))
    }

    /// Convert a local birth date and time to UTC.
    ///
    /// Arguments
    /// ---------
    /// * `date`: `YYYY-MM-DD`
    /// * `time`: `HH:MM` or `HH:MM:SS`, 24 h clock
    /// * `location`: birth place
    ///
    /// Return
    /// ------
    /// * The [`ConversionResult`], or a validation error
    ///   ([`OrreryError::InvalidDate`], [`OrreryError::InvalidTime`],
    ///   [`OrreryError::InvalidCoordinates`]). Lookup failures are never returned.
    pub async fn convert_birth_time_to_utc(
        &self,
        date: &str,
        time: &str,
        location: Location,
    ) -> Result<ConversionResult, OrreryError> {
        let local_date = CivilDate::parse(date)?;
        let local_time = CivilTime::parse(time)?;
        location.validate()?;

        let (timezone, fallback_reason) = self.resolve_timezone(&local_date, &location).await;

        let neutral = Epoch::from_gregorian_utc(
            local_date.year,
            local_date.month,
            local_date.day,
            local_time.hour,
            local_time.minute,
            local_time.second,
            0,
        );

        let dst = timezone.source == TimezoneSource::Service
            && dst::is_dst_active(&timezone.name, local_date.month);
        let offset_hours = timezone.offset_hours + if dst { 1.0 } else { 0.0 };

        let offset_seconds = (offset_hours * 3600.0).round() as i64;
        let utc = neutral - Unit::Second * offset_seconds;

        let mut validation = ConversionValidation {
            low_confidence: fallback_reason.is_some(),
            fallback_reason,
            ..Default::default()
        };
        if validation.low_confidence {
            validation.warnings.push(format!(
                "low confidence: timezone estimated from longitude as {}",
                timezone.name
            ));
        }
        if offset_hours.abs() > MAX_PLAUSIBLE_OFFSET_HOURS {
            validation.warnings.push(format!(
                "offset {offset_hours:+} h exceeds ±{MAX_PLAUSIBLE_OFFSET_HOURS} h"
            ));
        }

        Ok(ConversionResult {
            utc,
            utc_iso: format_iso_utc(&utc),
            local_date,
            local_time,
            timezone,
            offset_hours,
            dst,
            validation,
        })
    }
}
