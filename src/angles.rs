//! Angle normalization helpers shared by every stage of the pipeline.

use crate::constants::Degree;

/// Reduce an angle in degrees to the interval `[0, 360)`.
///
/// `rem_euclid` can return exactly `360.0` for tiny negative inputs because of rounding,
/// so the upper bound is folded back explicitly.
pub fn normalize_degrees(angle: Degree) -> Degree {
    let reduced = angle.rem_euclid(360.0);
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Reduce an angle in degrees to the interval `(-180, 180]`.
pub fn signed_degrees(angle: Degree) -> Degree {
    let reduced = normalize_degrees(angle);
    if reduced > 180.0 {
        reduced - 360.0
    } else {
        reduced
    }
}

/// Shortest angular distance between two longitudes, `min(|a−b|, 360−|a−b|)`.
pub fn angular_separation(a: Degree, b: Degree) -> Degree {
    let diff = normalize_degrees(a - b);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod angles_test {
    use super::*;

    #[test]
    fn test_normalize_degrees_range() {
        for x in [
            -1e9, -720.5, -360.0, -1e-15, 0.0, 1e-15, 359.999_999, 360.0, 725.25, 1e12,
        ] {
            let n = normalize_degrees(x);
            assert!((0.0..360.0).contains(&n), "{x} -> {n}");
        }
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
    }

    #[test]
    fn test_signed_degrees() {
        assert_eq!(signed_degrees(190.0), -170.0);
        assert_eq!(signed_degrees(180.0), 180.0);
        assert_eq!(signed_degrees(-10.0), -10.0);
    }

    #[test]
    fn test_angular_separation_wraps() {
        assert_eq!(angular_separation(359.0, 1.0), 2.0);
        assert_eq!(angular_separation(1.0, 359.0), 2.0);
        assert_eq!(angular_separation(10.0, 190.0), 180.0);
        assert_eq!(angular_separation(42.0, 42.0), 0.0);
    }
}
