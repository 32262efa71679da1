//! # Chart positions
//!
//! [`PlanetPosition`] is the value object returned by the engine for each body. Besides
//! the apparent coordinates it carries everything needed to audit how the value was
//! obtained: the [`Corrections`] that were applied (or bypassed), the
//! [`PositionQuality`] of the method used, and a [`FallbackInfo`] when the primary
//! theory could not be used.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::bodies::{Body, ZodiacSign};
use crate::constants::{ArcMin, AstronomicalUnit, Degree};
use crate::coordinates::{
    ApparentPosition, Corrections, APPARENT_COORDINATE_SYSTEM, APPARENT_REFERENCE_FRAME,
    GEOMETRIC_COORDINATE_SYSTEM, GEOMETRIC_REFERENCE_FRAME,
};
use crate::series::PrecisionLevel;

/// Degrees, arc-minutes and arc-seconds of a longitude within its zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    /// Split the position of `longitude` inside its 30° sign.
    ///
    /// Seconds are rounded to the nearest integer with carry into minutes and degrees.
    /// A value that would round up to the next sign is held at `29°59′59″` so the
    /// triple always agrees with [`ZodiacSign::from_longitude`].
    pub fn within_sign(longitude: Degree) -> Self {
        let in_sign = normalize_degrees(longitude) % 30.0;
        let total = ((in_sign * 3600.0).round() as u32).min(30 * 3600 - 1);
        Dms {
            degrees: (total / 3600) as u8,
            minutes: (total / 60 % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}′{:02}″", self.degrees, self.minutes, self.seconds)
    }
}

/// Theory used to produce a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// VSOP87 periodic series
    Vsop87,
    /// ELP2000 periodic series
    Elp2000,
    /// Mean elements with the Neptune resonance term
    KeplerianResonance,
    /// Legacy closed form: Keplerian mean elements
    LegacyKeplerian,
    /// Legacy closed form: low-accuracy solar theory
    LowPrecisionSolar,
    /// Legacy closed form: equation of the centre of the Moon
    SingleTermLunar,
}

impl CalculationMethod {
    /// Typical error of the method, arc-minutes.
    pub fn expected_accuracy(self, precision: PrecisionLevel) -> ArcMin {
        match (self, precision) {
            (CalculationMethod::Vsop87, PrecisionLevel::High) => 0.05,
            (CalculationMethod::Vsop87, PrecisionLevel::Medium) => 0.5,
            (CalculationMethod::Vsop87, PrecisionLevel::Low) => 3.0,
            (CalculationMethod::Vsop87, PrecisionLevel::Minimal) => 15.0,
            (CalculationMethod::Elp2000, PrecisionLevel::High) => 2.0,
            (CalculationMethod::Elp2000, PrecisionLevel::Medium) => 3.0,
            (CalculationMethod::Elp2000, PrecisionLevel::Low) => 6.0,
            (CalculationMethod::Elp2000, PrecisionLevel::Minimal) => 15.0,
            (CalculationMethod::KeplerianResonance, _) => 5.0,
            (CalculationMethod::LegacyKeplerian, _) => 30.0,
            (CalculationMethod::LowPrecisionSolar, _) => 1.0,
            (CalculationMethod::SingleTermLunar, _) => 30.0,
        }
    }

    pub fn is_legacy(self) -> bool {
        matches!(
            self,
            CalculationMethod::LegacyKeplerian
                | CalculationMethod::LowPrecisionSolar
                | CalculationMethod::SingleTermLunar
        )
    }
}

/// Which closed-form fallback replaced the primary theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FallbackTier {
    LegacyKeplerian,
    LowPrecisionSolar,
    SingleTermLunar,
}

impl FallbackTier {
    pub fn method(self) -> CalculationMethod {
        match self {
            FallbackTier::LegacyKeplerian => CalculationMethod::LegacyKeplerian,
            FallbackTier::LowPrecisionSolar => CalculationMethod::LowPrecisionSolar,
            FallbackTier::SingleTermLunar => CalculationMethod::SingleTermLunar,
        }
    }
}

/// Why and how a body was computed by a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackInfo {
    pub tier: FallbackTier,
    pub reason: String,
}

/// Quality metadata attached to each position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionQuality {
    pub method: CalculationMethod,
    pub precision: PrecisionLevel,
    pub terms_used: usize,
    /// Expected error of the method, arc-minutes
    pub expected_accuracy: ArcMin,
    /// True for any legacy fallback
    pub reduced_precision: bool,
    pub fallback: Option<FallbackInfo>,
}

impl PositionQuality {
    pub fn primary(method: CalculationMethod, precision: PrecisionLevel, terms_used: usize) -> Self {
        PositionQuality {
            method,
            precision,
            terms_used,
            expected_accuracy: method.expected_accuracy(precision),
            reduced_precision: method.is_legacy(),
            fallback: None,
        }
    }

    pub fn fallback(precision: PrecisionLevel, info: FallbackInfo) -> Self {
        let method = info.tier.method();
        PositionQuality {
            method,
            precision,
            terms_used: 0,
            expected_accuracy: method.expected_accuracy(precision),
            reduced_precision: true,
            fallback: Some(info),
        }
    }
}

/// Apparent geocentric position of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    /// Ecliptic longitude of date, degrees in `[0, 360)`
    pub longitude: Degree,
    /// Ecliptic latitude of date, degrees
    pub latitude: Degree,
    /// Geocentric distance, AU
    pub distance: AstronomicalUnit,
    pub sign: ZodiacSign,
    pub position_in_sign: Dms,
    /// Right ascension, degrees in `[0, 360)`
    pub right_ascension: Degree,
    /// Declination, degrees
    pub declination: Degree,
    pub corrections: Corrections,
    pub reference_frame: String,
    pub coordinate_system: String,
    pub quality: PositionQuality,
    pub warnings: Vec<String>,
}

impl PlanetPosition {
    /// Build a position from a fully transformed apparent place.
    pub fn from_apparent(body: Body, apparent: ApparentPosition, quality: PositionQuality) -> Self {
        let longitude = normalize_degrees(apparent.longitude);
        PlanetPosition {
            body,
            longitude,
            latitude: apparent.latitude,
            distance: apparent.distance,
            sign: ZodiacSign::from_longitude(longitude),
            position_in_sign: Dms::within_sign(longitude),
            right_ascension: apparent.equatorial.right_ascension,
            declination: apparent.equatorial.declination,
            corrections: apparent.corrections,
            reference_frame: APPARENT_REFERENCE_FRAME.to_string(),
            coordinate_system: APPARENT_COORDINATE_SYSTEM.to_string(),
            quality,
            warnings: Vec::new(),
        }
    }

    /// Build a position from raw geometric coordinates whose transform failed.
    ///
    /// Equatorial coordinates are left at zero: without a valid transform there is no
    /// trustworthy obliquity to rotate with.
    pub fn from_raw(
        body: Body,
        longitude: Degree,
        latitude: Degree,
        distance: AstronomicalUnit,
        quality: PositionQuality,
        reason: &str,
    ) -> Self {
        let longitude = if longitude.is_finite() {
            normalize_degrees(longitude)
        } else {
            0.0
        };
        PlanetPosition {
            body,
            longitude,
            latitude,
            distance,
            sign: ZodiacSign::from_longitude(longitude),
            position_in_sign: Dms::within_sign(longitude),
            right_ascension: 0.0,
            declination: 0.0,
            corrections: Corrections::bypassed(),
            reference_frame: GEOMETRIC_REFERENCE_FRAME.to_string(),
            coordinate_system: GEOMETRIC_COORDINATE_SYSTEM.to_string(),
            quality,
            warnings: vec![format!("coordinate transform bypassed: {reason}")],
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// True when a fallback theory was used or the transform was bypassed.
    pub fn is_degraded(&self) -> bool {
        self.quality.fallback.is_some() || self.corrections.bypassed
    }
}

#[cfg(test)]
mod position_test {
    use super::*;
    use crate::ref_system::EquatorialCoordinates;

    #[test]
    fn test_dms_within_sign() {
        assert_eq!(
            Dms::within_sign(280.3725),
            Dms {
                degrees: 10,
                minutes: 22,
                seconds: 21
            }
        );
        assert_eq!(
            Dms::within_sign(59.999_999_9),
            Dms {
                degrees: 29,
                minutes: 59,
                seconds: 59
            }
        );
        assert_eq!(Dms::within_sign(-30.0).degrees, 0);
        assert_eq!(Dms::within_sign(45.5).to_string(), "15°30′00″");
    }

    #[test]
    fn test_from_apparent_fills_sign() {
        let apparent = ApparentPosition {
            longitude: 95.0,
            latitude: 1.0,
            distance: 2.0,
            equatorial: EquatorialCoordinates {
                right_ascension: 96.0,
                declination: 24.0,
            },
            corrections: Corrections::default(),
        };
        let quality = PositionQuality::primary(CalculationMethod::Vsop87, PrecisionLevel::High, 10);
        let p = PlanetPosition::from_apparent(Body::Mars, apparent, quality);
        assert_eq!(p.sign, ZodiacSign::Cancer);
        assert_eq!(p.position_in_sign.degrees, 5);
        assert_eq!(p.reference_frame, "J2000.0->Date");
        assert_eq!(p.coordinate_system, "Apparent Geocentric");
        assert!(!p.is_degraded());
    }

    #[test]
    fn test_raw_position_is_degraded() {
        let quality = PositionQuality::primary(CalculationMethod::Vsop87, PrecisionLevel::Low, 10);
        let p = PlanetPosition::from_raw(Body::Venus, 370.0, 0.5, 0.7, quality, "boom");
        assert_eq!(p.longitude, 10.0);
        assert!(p.corrections.bypassed);
        assert!(p.is_degraded());
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("boom"));
        assert_eq!(p.corrections.note.as_deref(), Some("transform bypassed"));
    }

    #[test]
    fn test_fallback_quality() {
        let info = FallbackInfo {
            tier: FallbackTier::SingleTermLunar,
            reason: "corrupt table".into(),
        };
        let q = PositionQuality::fallback(PrecisionLevel::High, info);
        assert_eq!(q.method, CalculationMethod::SingleTermLunar);
        assert!(q.reduced_precision);
        assert_eq!(q.expected_accuracy, 30.0);
    }
}
