//! # Coordinate transformation pipeline
//!
//! Turns the geometric positions produced by the series (heliocentric for the planets,
//! geocentric for the Moon) into **apparent geocentric** ecliptic coordinates of date,
//! plus the matching apparent right ascension and declination.
//!
//! ## Steps
//!
//! | Step        | Sun | Moon | Planets, Pluto |
//! |-------------|-----|------|----------------|
//! | light-time  |  –  |  –   | iterate `t − τ`, `τ = 0.0057755183·Δ` |
//! | FK5         |  ✓  |  –   | ✓ |
//! | aberration  | `−20.4898″/R` | `−13.176358°/day × τ` | annual, κ = 20.49552″ |
//! | nutation    |  ✓  |  ✓   | ✓ |
//!
//! All the quantities that depend only on the date (nutation, obliquity, the Sun's
//! longitude used by the annual aberration) are gathered once per chart in a
//! [`FrameOfDate`].
//!
//! Every applied correction is recorded in [`Corrections`], so a consumer can tell an
//! apparent place from a raw position whose transform was bypassed.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::{
    ArcSec, AstronomicalUnit, Degree, JulianDay, Kilometer, Radian, ABERRATION_CONSTANT, AU,
    LIGHT_TIME_DAYS_PER_AU, MOON_MEAN_DAILY_MOTION, RADEG, SECONDS_PER_DAY, SOLAR_ABERRATION,
    VLIGHT, ARCSEC_PER_DEGREE,
};
use crate::earth_orientation::{mean_obliquity, nutation, true_obliquity, Nutation};
use crate::fundamental_args::FundamentalArguments;
use crate::kepler::{earth_perihelion_longitude, low_accuracy_sun};
use crate::lunar::LunarPosition;
use crate::orrery_errors::OrreryError;
use crate::ref_system::{cartesian_to_spherical, ecliptic_to_equatorial, EquatorialCoordinates};
use crate::series::PrecisionLevel;
use crate::time::julian_centuries;

/// Frame tag of a fully transformed position.
pub const APPARENT_REFERENCE_FRAME: &str = "J2000.0->Date";
/// Coordinate system tag of a fully transformed position.
pub const APPARENT_COORDINATE_SYSTEM: &str = "Apparent Geocentric";
/// Frame tag of a raw position returned when the transform is bypassed.
pub const GEOMETRIC_REFERENCE_FRAME: &str = "Mean Ecliptic of Date";
/// Coordinate system tag of a raw position returned when the transform is bypassed.
pub const GEOMETRIC_COORDINATE_SYSTEM: &str = "Geometric Geocentric";
/// Note attached to [`Corrections`] when the transform failed.
pub const TRANSFORM_BYPASSED_NOTE: &str = "transform bypassed";

/// Number of light-time refinements after the first evaluation.
const LIGHT_TIME_ITERATIONS: usize = 2;

/// One step of the apparent-place pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionKind {
    LightTime,
    Fk5,
    Aberration,
    Nutation,
}

/// Record of the corrections applied to one position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Corrections {
    pub applied: Vec<CorrectionKind>,
    pub light_time_days: f64,
    pub fk5_longitude: ArcSec,
    pub fk5_latitude: ArcSec,
    pub aberration_longitude: ArcSec,
    pub aberration_latitude: ArcSec,
    pub nutation_longitude: ArcSec,
    pub nutation_obliquity: ArcSec,
    /// True when the raw position was returned because the transform failed
    pub bypassed: bool,
    pub note: Option<String>,
}

impl Corrections {
    /// Corrections of a raw position whose transform failed. The failure reason travels
    /// in the position's warnings.
    pub fn bypassed() -> Self {
        Corrections {
            bypassed: true,
            note: Some(TRANSFORM_BYPASSED_NOTE.to_string()),
            ..Default::default()
        }
    }

    pub fn is_applied(&self, kind: CorrectionKind) -> bool {
        self.applied.contains(&kind)
    }

    fn total_longitude(&self) -> ArcSec {
        self.fk5_longitude + self.aberration_longitude + self.nutation_longitude
    }

    fn total_latitude(&self) -> ArcSec {
        self.fk5_latitude + self.aberration_latitude
    }
}

/// Geometric geocentric position, ecliptic and mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricPosition {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: AstronomicalUnit,
    /// Light-time used for the emitting body, zero if not applied
    pub light_time_days: f64,
}

/// Apparent geocentric position of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApparentPosition {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance: AstronomicalUnit,
    pub equatorial: EquatorialCoordinates,
    pub corrections: Corrections,
}

/// Date-dependent quantities shared by every body of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOfDate {
    pub jd: JulianDay,
    /// Julian centuries from J2000.0
    pub t: f64,
    pub arguments: FundamentalArguments,
    pub nutation: Nutation,
    pub mean_obliquity: Radian,
    pub true_obliquity: Radian,
    /// Geometric longitude of the Sun, used by the annual aberration
    pub sun_longitude: Degree,
    pub earth_eccentricity: f64,
    pub earth_perihelion: Degree,
}

impl FrameOfDate {
    /// Gather the frame quantities at `jd`; nutation is truncated at `precision`.
    pub fn new(jd: JulianDay, precision: PrecisionLevel) -> Result<Self, OrreryError> {
        if !jd.is_finite() {
            return Err(OrreryError::Transform(format!("non-finite Julian Day {jd}")));
        }
        let t = julian_centuries(jd);
        let arguments = FundamentalArguments::at(t);
        let nutation = nutation(&arguments, precision);
        let sun = low_accuracy_sun(t);
        Ok(FrameOfDate {
            jd,
            t,
            arguments,
            nutation,
            mean_obliquity: mean_obliquity(t),
            true_obliquity: true_obliquity(t, &nutation),
            sun_longitude: sun.true_longitude,
            earth_eccentricity: sun.eccentricity,
            earth_perihelion: earth_perihelion_longitude(t),
        })
    }
}

fn check_input(longitude: Degree, latitude: Degree, distance: f64) -> Result<(), OrreryError> {
    if !(longitude.is_finite() && latitude.is_finite() && distance.is_finite()) {
        return Err(OrreryError::Transform(format!(
            "non-finite input ({longitude}, {latitude}, {distance})"
        )));
    }
    if distance <= 0.0 {
        return Err(OrreryError::Transform(format!(
            "non-positive distance {distance}"
        )));
    }
    if latitude.abs() > 90.0 {
        return Err(OrreryError::Transform(format!(
            "latitude {latitude} outside [-90, 90]"
        )));
    }
    Ok(())
}

/// Light travel time for a distance in AU, in days.
pub fn light_time_days(distance: AstronomicalUnit) -> f64 {
    LIGHT_TIME_DAYS_PER_AU * distance
}

/// Correction from the VSOP87 dynamical frame to FK5, `(Δλ, Δβ)` in arcseconds.
pub fn fk5_correction(t: f64, longitude: Degree, latitude: Degree) -> (ArcSec, ArcSec) {
    let lambda_prime = (longitude - 1.397 * t - 0.000_31 * t * t) * RADEG;
    let (sin_lp, cos_lp) = lambda_prime.sin_cos();
    let dlon = -0.090_33 + 0.039_16 * (cos_lp + sin_lp) * (latitude * RADEG).tan();
    let dlat = 0.039_16 * (cos_lp - sin_lp);
    (dlon, dlat)
}

/// Annual aberration of a body at ecliptic `(longitude, latitude)`, `(Δλ, Δβ)` in
/// arcseconds, including the Earth-orbit eccentricity terms.
pub fn annual_aberration(frame: &FrameOfDate, longitude: Degree, latitude: Degree) -> (ArcSec, ArcSec) {
    let kappa = ABERRATION_CONSTANT;
    let e = frame.earth_eccentricity;
    let lat = latitude * RADEG;
    let sun_diff = (frame.sun_longitude - longitude) * RADEG;
    let peri_diff = (frame.earth_perihelion - longitude) * RADEG;

    let dlon = (-kappa * sun_diff.cos() + e * kappa * peri_diff.cos()) / lat.cos();
    let dlat = -kappa * lat.sin() * (sun_diff.sin() - e * peri_diff.sin());
    (dlon, dlat)
}

/// Aberration of the Sun, arcseconds, for a Sun–Earth distance `radius` in AU.
pub fn solar_aberration(radius: AstronomicalUnit) -> ArcSec {
    -SOLAR_ABERRATION / radius
}

/// Aberration of the Moon: its mean motion during the light travel time, arcseconds.
pub fn lunar_aberration(distance: Kilometer) -> ArcSec {
    let light_time = distance / VLIGHT / SECONDS_PER_DAY;
    -MOON_MEAN_DAILY_MOTION * light_time * ARCSEC_PER_DEGREE
}

/// Applies the apparent-place pipeline at a fixed nutation precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateTransformer {
    precision: PrecisionLevel,
    light_time: bool,
}

impl CoordinateTransformer {
    pub fn new(precision: PrecisionLevel) -> Self {
        CoordinateTransformer {
            precision,
            light_time: true,
        }
    }

    /// Enable or disable the light-time iteration for planets.
    pub fn with_light_time(mut self, enabled: bool) -> Self {
        self.light_time = enabled;
        self
    }

    pub fn precision(&self) -> PrecisionLevel {
        self.precision
    }

    pub fn frame_of_date(&self, jd: JulianDay) -> Result<FrameOfDate, OrreryError> {
        FrameOfDate::new(jd, self.precision)
    }

    /// Geometric geocentric position of a body seen from `earth` at `jd`.
    ///
    /// `heliocentric` returns the body's heliocentric ecliptic vector (AU) at a given
    /// Julian Day. When light-time is enabled it is re-evaluated at `jd − τ` until `τ`
    /// settles; the Earth stays at `jd`.
    ///
    /// Arguments
    /// ---------
    /// * `earth`: heliocentric vector of the Earth at `jd`
    /// * `jd`: observation instant
    /// * `heliocentric`: position provider of the emitting body
    ///
    /// Return
    /// ------
    /// * The geometric position, or the provider's error.
    pub fn geocentric<F>(
        &self,
        earth: &Vector3<f64>,
        jd: JulianDay,
        mut heliocentric: F,
    ) -> Result<GeometricPosition, OrreryError>
    where
        F: FnMut(JulianDay) -> Result<Vector3<f64>, OrreryError>,
    {
        let mut tau = 0.0;
        let mut geocentric = heliocentric(jd)? - earth;

        if self.light_time {
            for _ in 0..LIGHT_TIME_ITERATIONS {
                tau = light_time_days(geocentric.norm());
                geocentric = heliocentric(jd - tau)? - earth;
            }
        }

        let (longitude, latitude, distance) = cartesian_to_spherical(&geocentric);
        Ok(GeometricPosition {
            longitude,
            latitude,
            distance,
            light_time_days: tau,
        })
    }

    /// Apply FK5, annual aberration and nutation to a geometric planet position.
    ///
    /// This is the standalone entry point; it builds the [`FrameOfDate`] for `jd`.
    ///
    /// Arguments
    /// ---------
    /// * `raw_lon`, `raw_lat`: geometric geocentric ecliptic coordinates, degrees
    /// * `distance`: geocentric distance in AU, must be positive
    /// * `jd`: Julian Day of the observation
    ///
    /// Return
    /// ------
    /// * The apparent position tagged with its [`Corrections`], or
    ///   [`OrreryError::Transform`] on non-finite input or non-positive distance.
    pub fn transform_to_apparent_geocentric(
        &self,
        raw_lon: Degree,
        raw_lat: Degree,
        distance: AstronomicalUnit,
        jd: JulianDay,
    ) -> Result<ApparentPosition, OrreryError> {
        let frame = self.frame_of_date(jd)?;
        self.apparent_planet(
            &frame,
            &GeometricPosition {
                longitude: raw_lon,
                latitude: raw_lat,
                distance,
                light_time_days: 0.0,
            },
        )
    }

    /// Apparent place of a planet (or Pluto) within an already computed frame.
    pub fn apparent_planet(
        &self,
        frame: &FrameOfDate,
        geometric: &GeometricPosition,
    ) -> Result<ApparentPosition, OrreryError> {
        check_input(geometric.longitude, geometric.latitude, geometric.distance)?;

        let (fk5_longitude, fk5_latitude) =
            fk5_correction(frame.t, geometric.longitude, geometric.latitude);
        let (aberration_longitude, aberration_latitude) =
            annual_aberration(frame, geometric.longitude, geometric.latitude);

        let mut applied = Vec::with_capacity(4);
        if geometric.light_time_days > 0.0 {
            applied.push(CorrectionKind::LightTime);
        }
        applied.extend([
            CorrectionKind::Fk5,
            CorrectionKind::Aberration,
            CorrectionKind::Nutation,
        ]);

        let corrections = Corrections {
            applied,
            light_time_days: geometric.light_time_days,
            fk5_longitude,
            fk5_latitude,
            aberration_longitude,
            aberration_latitude,
            nutation_longitude: frame.nutation.longitude,
            nutation_obliquity: frame.nutation.obliquity,
            bypassed: false,
            note: None,
        };
        self.finish(frame, geometric.longitude, geometric.latitude, geometric.distance, corrections)
    }

    /// Apparent place of the Sun from the Earth's heliocentric coordinates of date.
    ///
    /// The geometric Sun is the Earth's position reversed: `λ = L + 180°`, `β = −B`,
    /// at distance `R`.
    pub fn apparent_sun(
        &self,
        frame: &FrameOfDate,
        earth_longitude: Degree,
        earth_latitude: Degree,
        radius: AstronomicalUnit,
    ) -> Result<ApparentPosition, OrreryError> {
        check_input(earth_longitude, earth_latitude, radius)?;
        let longitude = normalize_degrees(earth_longitude + 180.0);
        let latitude = -earth_latitude;

        let (fk5_longitude, fk5_latitude) = fk5_correction(frame.t, longitude, latitude);
        let corrections = Corrections {
            applied: vec![
                CorrectionKind::Fk5,
                CorrectionKind::Aberration,
                CorrectionKind::Nutation,
            ],
            fk5_longitude,
            fk5_latitude,
            aberration_longitude: solar_aberration(radius),
            nutation_longitude: frame.nutation.longitude,
            nutation_obliquity: frame.nutation.obliquity,
            ..Default::default()
        };
        self.finish(frame, longitude, latitude, radius, corrections)
    }

    /// Apparent place of the Moon: nutation and the light-time motion term only.
    pub fn apparent_moon(
        &self,
        frame: &FrameOfDate,
        moon: &LunarPosition,
    ) -> Result<ApparentPosition, OrreryError> {
        check_input(moon.longitude, moon.latitude, moon.distance_km)?;
        let corrections = Corrections {
            applied: vec![CorrectionKind::Aberration, CorrectionKind::Nutation],
            light_time_days: moon.distance_km / VLIGHT / SECONDS_PER_DAY,
            aberration_longitude: lunar_aberration(moon.distance_km),
            nutation_longitude: frame.nutation.longitude,
            nutation_obliquity: frame.nutation.obliquity,
            ..Default::default()
        };
        self.finish(
            frame,
            moon.longitude,
            moon.latitude,
            moon.distance_km / AU,
            corrections,
        )
    }

    fn finish(
        &self,
        frame: &FrameOfDate,
        longitude: Degree,
        latitude: Degree,
        distance: AstronomicalUnit,
        corrections: Corrections,
    ) -> Result<ApparentPosition, OrreryError> {
        let longitude =
            normalize_degrees(longitude + corrections.total_longitude() / ARCSEC_PER_DEGREE);
        let latitude = latitude + corrections.total_latitude() / ARCSEC_PER_DEGREE;
        if !(longitude.is_finite() && latitude.is_finite()) {
            return Err(OrreryError::Transform(
                "corrections produced a non-finite position".into(),
            ));
        }
        let equatorial = ecliptic_to_equatorial(longitude, latitude, frame.true_obliquity);
        Ok(ApparentPosition {
            longitude,
            latitude,
            distance,
            equatorial,
            corrections,
        })
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;
    use crate::lunar::LunarTheoryEngine;
    use crate::ref_system::spherical_to_cartesian;
    use crate::series::vsop87::SeriesBody;
    use crate::series::SeriesEvaluator;
    use crate::time::julian_millennia;
    use approx::assert_abs_diff_eq;

    fn vsop_vector(body: SeriesBody, jd: f64) -> Result<Vector3<f64>, OrreryError> {
        let p = SeriesEvaluator::new(PrecisionLevel::High)
            .heliocentric(&body.table(), julian_millennia(jd))?;
        Ok(spherical_to_cartesian(p.longitude, p.latitude, p.radius))
    }

    #[test]
    fn test_apparent_sun_vsop() {
        // 1992 October 13.0 TD
        let jd = 2_448_908.5;
        let transformer = CoordinateTransformer::new(PrecisionLevel::High);
        let frame = transformer.frame_of_date(jd).unwrap();
        let earth = SeriesEvaluator::new(PrecisionLevel::High)
            .heliocentric(&SeriesBody::Earth.table(), julian_millennia(jd))
            .unwrap();

        let sun = transformer
            .apparent_sun(&frame, earth.longitude, earth.latitude, earth.radius)
            .unwrap();
        assert_abs_diff_eq!(sun.longitude, 199.906_060, epsilon = 2e-4);
        assert_abs_diff_eq!(sun.equatorial.right_ascension, 198.378_178, epsilon = 5e-4);
        assert_abs_diff_eq!(sun.equatorial.declination, -7.783_871, epsilon = 5e-4);
        assert_abs_diff_eq!(sun.corrections.aberration_longitude, -20.539, epsilon = 1e-3);
        assert!(!sun.corrections.bypassed);
    }

    #[test]
    fn test_apparent_venus_with_light_time() {
        // 1992 December 20.0 TD
        let jd = 2_448_976.5;
        let transformer = CoordinateTransformer::new(PrecisionLevel::High);
        let frame = transformer.frame_of_date(jd).unwrap();
        let earth = vsop_vector(SeriesBody::Earth, jd).unwrap();

        let geometric = transformer
            .geocentric(&earth, jd, |t| vsop_vector(SeriesBody::Venus, t))
            .unwrap();
        assert_abs_diff_eq!(geometric.distance, 0.910_947, epsilon = 2e-5);
        assert_abs_diff_eq!(geometric.light_time_days, 0.005_261_2, epsilon = 1e-6);

        let venus = transformer.apparent_planet(&frame, &geometric).unwrap();
        assert_abs_diff_eq!(venus.longitude, 313.081_02, epsilon = 3e-3);
        assert_abs_diff_eq!(venus.latitude, -2.084_74, epsilon = 3e-3);
        assert!(venus.corrections.is_applied(CorrectionKind::LightTime));
        assert!(venus.corrections.is_applied(CorrectionKind::Fk5));
    }

    #[test]
    fn test_light_time_can_be_disabled() {
        let jd = 2_448_976.5;
        let transformer = CoordinateTransformer::new(PrecisionLevel::High).with_light_time(false);
        let earth = vsop_vector(SeriesBody::Earth, jd).unwrap();
        let geometric = transformer
            .geocentric(&earth, jd, |t| vsop_vector(SeriesBody::Venus, t))
            .unwrap();
        assert_eq!(geometric.light_time_days, 0.0);

        let frame = transformer.frame_of_date(jd).unwrap();
        let venus = transformer.apparent_planet(&frame, &geometric).unwrap();
        assert!(!venus.corrections.is_applied(CorrectionKind::LightTime));
    }

    #[test]
    fn test_apparent_moon() {
        // 1992 April 12.0 TD
        let jd = 2_448_724.5;
        let transformer = CoordinateTransformer::new(PrecisionLevel::High);
        let frame = transformer.frame_of_date(jd).unwrap();
        let moon = LunarTheoryEngine::new()
            .position(&frame.arguments, PrecisionLevel::High)
            .unwrap();
        let apparent = transformer.apparent_moon(&frame, &moon).unwrap();

        assert_abs_diff_eq!(apparent.longitude, 133.167_265, epsilon = 1.5e-3);
        assert_abs_diff_eq!(apparent.latitude, -3.229_126, epsilon = 1e-3);
        assert_abs_diff_eq!(apparent.equatorial.right_ascension, 134.688_470, epsilon = 2e-3);
        assert_abs_diff_eq!(apparent.equatorial.declination, 13.768_368, epsilon = 2e-3);
        assert!(apparent.corrections.aberration_longitude < 0.0);
        assert!(apparent.corrections.aberration_longitude > -1.0);
    }

    #[test]
    fn test_transform_rejects_invalid_input() {
        let transformer = CoordinateTransformer::new(PrecisionLevel::Medium);
        let jd = 2_451_545.0;
        assert!(matches!(
            transformer.transform_to_apparent_geocentric(f64::NAN, 0.0, 1.0, jd),
            Err(OrreryError::Transform(_))
        ));
        assert!(matches!(
            transformer.transform_to_apparent_geocentric(10.0, 0.0, 0.0, jd),
            Err(OrreryError::Transform(_))
        ));
        assert!(matches!(
            transformer.transform_to_apparent_geocentric(10.0, 0.0, 1.0, f64::INFINITY),
            Err(OrreryError::Transform(_))
        ));
    }

    #[test]
    fn test_transform_normalizes_longitude() {
        let transformer = CoordinateTransformer::new(PrecisionLevel::High);
        let p = transformer
            .transform_to_apparent_geocentric(359.999_99, 0.0, 5.0, 2_451_545.0)
            .unwrap();
        assert!((0.0..360.0).contains(&p.longitude));
        assert!(!p.corrections.bypassed);
        assert_eq!(p.corrections.note, None);
    }

    #[test]
    fn test_bypassed_corrections() {
        let c = Corrections::bypassed();
        assert!(c.bypassed);
        assert!(c.applied.is_empty());
        assert_eq!(c.note.as_deref(), Some("transform bypassed"));
    }
}
