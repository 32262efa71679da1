//! # Fundamental arguments of the lunar and nutation theories
//!
//! Polynomials in Julian centuries `T` from J2000.0 for the Delaunay-type arguments
//! used by the lunar series, the nutation series and the solar fallback:
//!
//! | Symbol | Meaning                                   |
//! |--------|-------------------------------------------|
//! | `L'`   | Moon's mean longitude                     |
//! | `D`    | Mean elongation of the Moon from the Sun  |
//! | `M`    | Sun's mean anomaly                        |
//! | `M'`   | Moon's mean anomaly                       |
//! | `F`    | Moon's argument of latitude               |
//! | `Ω`    | Longitude of the Moon's ascending node    |
//!
//! Every angle is returned in degrees, reduced to `[0, 360)`. `E` is the eccentricity
//! factor multiplying the lunar terms that contain `M`.
//!
//! The values depend only on `T`, so they are computed once per chart and shared by
//! every body.

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::{Degree, RADEG};

/// Evaluate `c0 + c1·T + c2·T² + c3·T³ + c4·T⁴` with Horner's scheme.
fn polynomial(coefficients: &[f64; 5], t: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * t + c)
}

const MOON_MEAN_LONGITUDE: [f64; 5] = [
    218.316_447_7,
    481_267.881_234_21,
    -0.001_578_6,
    1.0 / 538_841.0,
    -1.0 / 65_194_000.0,
];
const MEAN_ELONGATION: [f64; 5] = [
    297.850_192_1,
    445_267.111_403_4,
    -0.001_881_9,
    1.0 / 545_868.0,
    -1.0 / 113_065_000.0,
];
const SUN_MEAN_ANOMALY: [f64; 5] = [
    357.529_109_2,
    35_999.050_290_9,
    -0.000_153_6,
    1.0 / 24_490_000.0,
    0.0,
];
const MOON_MEAN_ANOMALY: [f64; 5] = [
    134.963_396_4,
    477_198.867_505_5,
    0.008_741_4,
    1.0 / 69_699.0,
    -1.0 / 14_712_000.0,
];
const ARGUMENT_OF_LATITUDE: [f64; 5] = [
    93.272_095_0,
    483_202.017_523_3,
    -0.003_653_9,
    -1.0 / 3_526_000.0,
    1.0 / 863_310_000.0,
];
const ASCENDING_NODE: [f64; 5] = [
    125.044_547_9,
    -1_934.136_289_1,
    0.002_075_4,
    1.0 / 467_441.0,
    -1.0 / 60_616_000.0,
];

/// Fundamental arguments at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundamentalArguments {
    /// Julian centuries since J2000.0
    pub t: f64,
    /// Moon's mean longitude `L'`
    pub moon_mean_longitude: Degree,
    /// Mean elongation `D`
    pub mean_elongation: Degree,
    /// Sun's mean anomaly `M`
    pub sun_mean_anomaly: Degree,
    /// Moon's mean anomaly `M'`
    pub moon_mean_anomaly: Degree,
    /// Argument of latitude `F`
    pub argument_of_latitude: Degree,
    /// Longitude of the ascending node `Ω`
    pub ascending_node: Degree,
    /// Eccentricity factor `E = 1 − 0.002516·T − 0.0000074·T²`
    pub eccentricity_factor: f64,
}

impl FundamentalArguments {
    /// Compute all arguments at `t` Julian centuries from J2000.0.
    pub fn at(t: f64) -> Self {
        FundamentalArguments {
            t,
            moon_mean_longitude: normalize_degrees(polynomial(&MOON_MEAN_LONGITUDE, t)),
            mean_elongation: normalize_degrees(polynomial(&MEAN_ELONGATION, t)),
            sun_mean_anomaly: normalize_degrees(polynomial(&SUN_MEAN_ANOMALY, t)),
            moon_mean_anomaly: normalize_degrees(polynomial(&MOON_MEAN_ANOMALY, t)),
            argument_of_latitude: normalize_degrees(polynomial(&ARGUMENT_OF_LATITUDE, t)),
            ascending_node: normalize_degrees(polynomial(&ASCENDING_NODE, t)),
            eccentricity_factor: 1.0 - 0.002_516 * t - 0.000_007_4 * t * t,
        }
    }

    /// Linear combination `d·D + m·M + mp·M' + f·F + om·Ω`, in radians.
    ///
    /// Both the lunar and the nutation tables store their arguments as small integer
    /// multipliers of these five angles.
    pub fn combination_rad(&self, d: f64, m: f64, mp: f64, f: f64, om: f64) -> f64 {
        (d * self.mean_elongation
            + m * self.sun_mean_anomaly
            + mp * self.moon_mean_anomaly
            + f * self.argument_of_latitude
            + om * self.ascending_node)
            * RADEG
    }
}

#[cfg(test)]
mod fundamental_args_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arguments_at_j2000() {
        let args = FundamentalArguments::at(0.0);
        assert_eq!(args.moon_mean_longitude, 218.316_447_7);
        assert_eq!(args.mean_elongation, 297.850_192_1);
        assert_eq!(args.sun_mean_anomaly, 357.529_109_2);
        assert_eq!(args.moon_mean_anomaly, 134.963_396_4);
        assert_eq!(args.argument_of_latitude, 93.272_095_0);
        assert_eq!(args.ascending_node, 125.044_547_9);
        assert_eq!(args.eccentricity_factor, 1.0);
    }

    #[test]
    fn test_arguments_lunar_example_date() {
        // 1992 April 12, 0h TD
        let t = (2_448_724.5 - 2_451_545.0) / 36_525.0;
        let args = FundamentalArguments::at(t);
        assert_abs_diff_eq!(args.moon_mean_longitude, 134.290_182, epsilon = 1e-5);
        assert_abs_diff_eq!(args.mean_elongation, 113.842_304, epsilon = 1e-5);
        assert_abs_diff_eq!(args.sun_mean_anomaly, 97.643_514, epsilon = 1e-5);
        assert_abs_diff_eq!(args.moon_mean_anomaly, 5.150_833, epsilon = 1e-5);
        assert_abs_diff_eq!(args.argument_of_latitude, 219.889_721, epsilon = 1e-5);
        assert_abs_diff_eq!(args.eccentricity_factor, 1.000_194, epsilon = 1e-6);
    }

    #[test]
    fn test_arguments_always_normalized() {
        for t in [-1.0, -0.5, 0.0, 0.37, 1.0] {
            let args = FundamentalArguments::at(t);
            for angle in [
                args.moon_mean_longitude,
                args.mean_elongation,
                args.sun_mean_anomaly,
                args.moon_mean_anomaly,
                args.argument_of_latitude,
                args.ascending_node,
            ] {
                assert!((0.0..360.0).contains(&angle));
            }
        }
    }
}
