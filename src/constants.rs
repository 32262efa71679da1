//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors** and
//! **type aliases** shared by the ephemeris pipeline.
//!
//! ## Overview
//!
//! - Time axis constants (J2000.0, Julian century / millennium, supported Julian Day range)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ degrees, AU ↔ km)
//! - Constants used by the apparent-place corrections (aberration, light-time)
//! - Type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Days in a Julian millennium (VSOP87 time unit)
pub const DAYS_PER_MILLENNIUM: f64 = 365_250.0;

/// First Julian Day accepted by the truncated series (1900-01-01 00:00)
pub const MIN_JULIAN_DAY: f64 = 2_415_020.5;

/// Last Julian Day accepted by the truncated series (2100-01-01 00:00)
pub const MAX_JULIAN_DAY: f64 = 2_488_070.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Arcseconds in one degree
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Arcminutes in one degree
pub const ARCMIN_PER_DEGREE: f64 = 60.0;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Constant of annual aberration κ, in arcseconds
pub const ABERRATION_CONSTANT: ArcSec = 20.495_52;

/// Solar aberration numerator (−20.4898″ at 1 AU)
pub const SOLAR_ABERRATION: ArcSec = 20.4898;

/// Mean daily motion of the Moon in longitude, degrees per day
pub const MOON_MEAN_DAILY_MOTION: Degree = 13.176_358;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in arcminutes
pub type ArcMin = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Day (days)
pub type JulianDay = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
