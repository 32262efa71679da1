//! # Reference frames
//!
//! Rotations between the ecliptic and the equatorial frame of date, and conversions
//! between spherical and Cartesian coordinates.
//!
//! Every position in the pipeline is carried as spherical ecliptic coordinates
//! (longitude, latitude in degrees, distance in AU). The heliocentric → geocentric
//! step and the ecliptic → equatorial step are done on Cartesian vectors with
//! [`nalgebra`], then converted back.
//!
//! ## Conventions
//!
//! * [`rotmt`] returns the matrix of an **active** rotation of angle `alpha` about one
//!   coordinate axis, so that the rotated vector is `x' = R · x`.
//! * Equatorial coordinates are returned as right ascension in `[0, 360)` degrees and
//!   declination in `[-90, 90]` degrees.
//!
//! ## See also
//! ------------
//! * [`crate::earth_orientation::true_obliquity`] – The angle used by [`ecliptic_to_equatorial`].

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::{AstronomicalUnit, Degree, Radian, RADEG};

/// Rotation axis of [`rotmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Build the rotation matrix of angle `alpha` (radians) about `axis`.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians, counter-clockwise when looking down the axis.
/// * `axis`: one of [`Axis::X`], [`Axis::Y`], [`Axis::Z`].
///
/// Return
/// ------
/// * An orthonormal 3×3 matrix `R` such that the rotated vector is `x' = R · x`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Spherical (degrees, AU) to Cartesian, in the same frame.
pub fn spherical_to_cartesian(
    longitude: Degree,
    latitude: Degree,
    distance: AstronomicalUnit,
) -> Vector3<f64> {
    let (sin_lon, cos_lon) = (longitude * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();
    Vector3::new(
        distance * cos_lat * cos_lon,
        distance * cos_lat * sin_lon,
        distance * sin_lat,
    )
}

/// Cartesian to spherical `(longitude, latitude, distance)`.
///
/// The longitude is normalized to `[0, 360)`. A zero vector maps to `(0, 0, 0)`.
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> (Degree, Degree, AstronomicalUnit) {
    let distance = v.norm();
    if distance == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let longitude = normalize_degrees(v.y.atan2(v.x) / RADEG);
    let latitude = (v.z / distance).clamp(-1.0, 1.0).asin() / RADEG;
    (longitude, latitude, distance)
}

/// Right ascension and declination, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinates {
    pub right_ascension: Degree,
    pub declination: Degree,
}

/// Convert ecliptic coordinates of date into equatorial coordinates of date.
///
/// Arguments
/// ---------
/// * `longitude`, `latitude`: ecliptic coordinates in degrees.
/// * `obliquity`: obliquity of the ecliptic in radians. Pass the true obliquity to get
///   apparent right ascension and declination.
///
/// Return
/// ------
/// * [`EquatorialCoordinates`] with the right ascension in `[0, 360)`.
pub fn ecliptic_to_equatorial(
    longitude: Degree,
    latitude: Degree,
    obliquity: Radian,
) -> EquatorialCoordinates {
    let ecliptic = spherical_to_cartesian(longitude, latitude, 1.0);
    let equatorial = rotmt(obliquity, Axis::X) * ecliptic;
    let (right_ascension, declination, _) = cartesian_to_spherical(&equatorial);
    EquatorialCoordinates {
        right_ascension,
        declination,
    }
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotmt_orthonormal() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let r = rotmt(0.3, axis);
            let id = r * r.transpose();
            assert_abs_diff_eq!(id, Matrix3::identity(), epsilon = 1e-15);
        }
        let r = rotmt(std::f64::consts::FRAC_PI_2, Axis::Z);
        let v = r * Vector3::x();
        assert_abs_diff_eq!(v, Vector3::y(), epsilon = 1e-15);
    }

    #[test]
    fn test_spherical_roundtrip_keeps_longitude_range() {
        let v = spherical_to_cartesian(-45.0, 10.0, 2.5);
        let (lon, lat, r) = cartesian_to_spherical(&v);
        assert_abs_diff_eq!(lon, 315.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r, 2.5, epsilon = 1e-12);
        assert_eq!(cartesian_to_spherical(&Vector3::zeros()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_ecliptic_to_equatorial_pollux() {
        // Pollux, ecliptic of J2000.0
        let eq = ecliptic_to_equatorial(113.215_630, 6.684_170, 23.439_291_1 * RADEG);
        assert_abs_diff_eq!(eq.right_ascension, 116.328_942, epsilon = 1e-5);
        assert_abs_diff_eq!(eq.declination, 28.026_183, epsilon = 1e-5);
    }

    #[test]
    fn test_solstice_declination_equals_obliquity() {
        let eps = 23.44 * RADEG;
        let eq = ecliptic_to_equatorial(90.0, 0.0, eps);
        assert_abs_diff_eq!(eq.right_ascension, 90.0, epsilon = 1e-10);
        assert_abs_diff_eq!(eq.declination, 23.44, epsilon = 1e-10);
    }
}
