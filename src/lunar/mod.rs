//! # Lunar theory
//!
//! Geocentric position of the Moon from the truncated ELP-2000/82 series:
//!
//! ```text
//! λ = L' + Σl / 10⁶                 (degrees, mean equinox of date)
//! β = Σb / 10⁶                      (degrees)
//! Δ = 385000.56 + Σr / 1000         (km)
//! ```
//!
//! Each periodic term is `coef · sin(d·D + m·M + m'·M' + f·F)` (cosine for the distance),
//! multiplied by `E^|m|` when it involves the Sun's mean anomaly. A few additive terms
//! account for the action of Venus, Jupiter and the Earth's flattening.
//!
//! When the tables cannot be used, [`LunarTheoryEngine::single_term_position`] keeps only
//! the equation of the centre (`6.288774°·sin M'`). Positions built from it carry the
//! ±30′ expected accuracy of [`crate::position::CalculationMethod::SingleTermLunar`]
//! instead of the ±2′ of the full series.

mod elp_terms;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::{Degree, Kilometer, RADEG};
use crate::fundamental_args::FundamentalArguments;
use crate::orrery_errors::OrreryError;
use crate::series::PrecisionLevel;

/// `[D, M, M', F, Σl, Σr]`
pub type LunarTerm = [f64; 6];
/// `[D, M, M', F, Σb]`
pub type LunarLatitudeTerm = [f64; 5];

/// Mean Earth–Moon distance used as the constant term of the distance series, km.
pub const MEAN_LUNAR_DISTANCE: Kilometer = 385_000.56;

/// Equation of the centre coefficient, degrees.
const EQUATION_OF_CENTRE: Degree = 6.288_774;

/// Principal latitude coefficient, degrees.
const PRINCIPAL_LATITUDE: Degree = 5.128_122;

/// Principal distance coefficient, km.
const PRINCIPAL_DISTANCE: Kilometer = 20_905.355;

/// Term tables used by [`LunarTheoryEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct LunarTables {
    pub longitude_distance: Cow<'static, [LunarTerm]>,
    pub latitude: Cow<'static, [LunarLatitudeTerm]>,
}

impl Default for LunarTables {
    fn default() -> Self {
        LunarTables {
            longitude_distance: Cow::Borrowed(elp_terms::LONGITUDE_DISTANCE),
            latitude: Cow::Borrowed(elp_terms::LATITUDE),
        }
    }
}

impl LunarTables {
    /// Structural checks: non-empty, finite, small integer multipliers, and the equation of
    /// the centre as the leading longitude term.
    pub fn validate(&self) -> Result<(), OrreryError> {
        let corrupt = |reason: String| OrreryError::CorruptSeriesTable {
            table: "Moon".into(),
            reason,
        };

        if self.longitude_distance.is_empty() || self.latitude.is_empty() {
            return Err(corrupt("empty lunar table".into()));
        }

        let multipliers_ok = |m: &[f64]| {
            m.iter()
                .all(|x| x.is_finite() && x.fract() == 0.0 && x.abs() <= 4.0)
        };

        for (i, row) in self.longitude_distance.iter().enumerate() {
            if !multipliers_ok(&row[..4]) || !row[4].is_finite() || !row[5].is_finite() {
                return Err(corrupt(format!("longitude/distance row {i} is malformed")));
            }
        }
        for (i, row) in self.latitude.iter().enumerate() {
            if !multipliers_ok(&row[..4]) || !row[4].is_finite() {
                return Err(corrupt(format!("latitude row {i} is malformed")));
            }
        }

        let leading = self.longitude_distance[0];
        let largest = self
            .longitude_distance
            .iter()
            .map(|row| row[4].abs())
            .fold(0.0, f64::max);
        if leading[..4] != [0.0, 0.0, 1.0, 0.0] || leading[4].abs() < largest {
            return Err(corrupt(
                "first longitude term must be the equation of the centre".into(),
            ));
        }
        Ok(())
    }
}

/// How a [`LunarPosition`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LunarMethod {
    /// Full (or precision-truncated) periodic series
    Series,
    /// Equation of the centre only
    SingleTerm,
}

/// Geometric geocentric position of the Moon, ecliptic and mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPosition {
    pub longitude: Degree,
    pub latitude: Degree,
    pub distance_km: Kilometer,
    pub terms_used: usize,
    pub method: LunarMethod,
}

/// Evaluates the lunar series against a set of [`LunarTables`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LunarTheoryEngine {
    tables: LunarTables,
}

impl LunarTheoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: LunarTables) -> Self {
        LunarTheoryEngine { tables }
    }

    pub fn tables(&self) -> &LunarTables {
        &self.tables
    }

    /// Position of the Moon from the periodic series.
    ///
    /// Arguments
    /// ---------
    /// * `args`: fundamental arguments at the requested instant
    /// * `precision`: drops the terms whose coefficient magnitude is below
    ///   [`PrecisionLevel::lunar_threshold`]
    ///
    /// Return
    /// ------
    /// * the geometric position, or an error if the tables are corrupt or the sums are
    ///   not finite. Callers fall back to [`Self::single_term_position`].
    pub fn position(
        &self,
        args: &FundamentalArguments,
        precision: PrecisionLevel,
    ) -> Result<LunarPosition, OrreryError> {
        self.tables.validate()?;

        let threshold = precision.lunar_threshold();
        let t = args.t;
        let e = args.eccentricity_factor;
        let eccentricity_scale = |m: f64| e.powi(m.abs() as i32);

        let mut terms_used = 0;
        let mut sum_l = 0.0;
        let mut sum_r = 0.0;
        for &[d, m, mp, f, coef_l, coef_r] in self.tables.longitude_distance.iter() {
            let arg = args.combination_rad(d, m, mp, f, 0.0);
            let scale = eccentricity_scale(m);
            if coef_l != 0.0 && coef_l.abs() >= threshold {
                sum_l += coef_l * scale * arg.sin();
                terms_used += 1;
            }
            if coef_r != 0.0 && coef_r.abs() >= threshold {
                sum_r += coef_r * scale * arg.cos();
                terms_used += 1;
            }
        }

        let mut sum_b = 0.0;
        for &[d, m, mp, f, coef_b] in self.tables.latitude.iter() {
            if coef_b.abs() >= threshold {
                let arg = args.combination_rad(d, m, mp, f, 0.0);
                sum_b += coef_b * eccentricity_scale(m) * arg.sin();
                terms_used += 1;
            }
        }

        // Venus (A1), Jupiter (A2) and flattening (A3) terms
        let a1 = (119.75 + 131.849 * t) * RADEG;
        let a2 = (53.09 + 479_264.290 * t) * RADEG;
        let a3 = (313.45 + 481_266.484 * t) * RADEG;
        let l_prime = args.moon_mean_longitude * RADEG;
        let f = args.argument_of_latitude * RADEG;
        let m_prime = args.moon_mean_anomaly * RADEG;

        let additive_l: [(f64, f64); 3] = [
            (3958.0, a1),
            (1962.0, l_prime - f),
            (318.0, a2),
        ];
        let additive_b: [(f64, f64); 6] = [
            (-2235.0, l_prime),
            (382.0, a3),
            (175.0, a1 - f),
            (175.0, a1 + f),
            (127.0, l_prime - m_prime),
            (-115.0, l_prime + m_prime),
        ];
        for (coef, arg) in additive_l {
            if coef.abs() >= threshold {
                sum_l += coef * arg.sin();
                terms_used += 1;
            }
        }
        for (coef, arg) in additive_b {
            if coef.abs() >= threshold {
                sum_b += coef * arg.sin();
                terms_used += 1;
            }
        }

        let longitude = args.moon_mean_longitude + sum_l / 1e6;
        let latitude = sum_b / 1e6;
        let distance_km = MEAN_LUNAR_DISTANCE + sum_r / 1000.0;

        if !(longitude.is_finite() && latitude.is_finite() && distance_km.is_finite()) {
            return Err(OrreryError::SeriesEvaluation {
                series: "Moon".into(),
                reason: "lunar series produced a non-finite value".into(),
            });
        }

        Ok(LunarPosition {
            longitude: normalize_degrees(longitude),
            latitude,
            distance_km,
            terms_used,
            method: LunarMethod::Series,
        })
    }

    /// Equation-of-the-centre approximation used when the series cannot be evaluated.
    pub fn single_term_position(args: &FundamentalArguments) -> LunarPosition {
        let m_prime = args.moon_mean_anomaly * RADEG;
        let f = args.argument_of_latitude * RADEG;
        LunarPosition {
            longitude: normalize_degrees(
                args.moon_mean_longitude + EQUATION_OF_CENTRE * m_prime.sin(),
            ),
            latitude: PRINCIPAL_LATITUDE * f.sin(),
            distance_km: MEAN_LUNAR_DISTANCE - PRINCIPAL_DISTANCE * m_prime.cos(),
            terms_used: 3,
            method: LunarMethod::SingleTerm,
        }
    }
}

#[cfg(test)]
mod lunar_test {
    use super::*;
    use crate::angles::angular_separation;
    use crate::time::julian_centuries;
    use approx::assert_abs_diff_eq;

    fn example_args() -> FundamentalArguments {
        // 1992 April 12, 0h TD
        FundamentalArguments::at(julian_centuries(2_448_724.5))
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = LunarTables::default();
        assert_eq!(tables.validate(), Ok(()));
        assert_eq!(tables.longitude_distance.len(), 60);
        assert_eq!(tables.latitude.len(), 60);
    }

    #[test]
    fn test_moon_meeus_example() {
        let moon = LunarTheoryEngine::new()
            .position(&example_args(), PrecisionLevel::High)
            .unwrap();
        assert_abs_diff_eq!(moon.longitude, 133.162_655, epsilon = 1e-3);
        assert_abs_diff_eq!(moon.latitude, -3.229_126, epsilon = 1e-3);
        assert_abs_diff_eq!(moon.distance_km, 368_409.7, epsilon = 1.0);
        assert_eq!(moon.method, LunarMethod::Series);
    }

    #[test]
    fn test_precision_levels_drop_terms() {
        let engine = LunarTheoryEngine::new();
        let args = example_args();
        let high = engine.position(&args, PrecisionLevel::High).unwrap();
        let medium = engine.position(&args, PrecisionLevel::Medium).unwrap();
        let minimal = engine.position(&args, PrecisionLevel::Minimal).unwrap();

        assert!(high.terms_used > medium.terms_used);
        assert!(medium.terms_used > minimal.terms_used);
        assert!(angular_separation(high.longitude, medium.longitude) < 0.01);
        assert!(angular_separation(high.longitude, minimal.longitude) < 0.2);
    }

    #[test]
    fn test_single_term_fallback() {
        let args = example_args();
        let full = LunarTheoryEngine::new()
            .position(&args, PrecisionLevel::High)
            .unwrap();
        let rough = LunarTheoryEngine::single_term_position(&args);
        assert_eq!(rough.method, LunarMethod::SingleTerm);
        assert!(angular_separation(full.longitude, rough.longitude) < 3.0);
        assert!((rough.distance_km - full.distance_km).abs() < 15_000.0);
    }

    #[test]
    fn test_single_term_expected_accuracy() {
        use crate::position::CalculationMethod;
        assert_eq!(CalculationMethod::SingleTermLunar.expected_accuracy(PrecisionLevel::High), 30.0);
        assert_eq!(CalculationMethod::Elp2000.expected_accuracy(PrecisionLevel::High), 2.0);
    }

    #[test]
    fn test_corrupt_tables_are_rejected() {
        let mut rows = elp_terms::LONGITUDE_DISTANCE.to_vec();
        rows.swap(0, 1);
        let engine = LunarTheoryEngine::with_tables(LunarTables {
            longitude_distance: Cow::Owned(rows),
            latitude: Cow::Borrowed(elp_terms::LATITUDE),
        });
        assert!(engine
            .position(&example_args(), PrecisionLevel::High)
            .is_err());

        let empty = LunarTheoryEngine::with_tables(LunarTables {
            longitude_distance: Cow::Borrowed(elp_terms::LONGITUDE_DISTANCE),
            latitude: Cow::Owned(Vec::new()),
        });
        assert!(matches!(
            empty.position(&example_args(), PrecisionLevel::Low),
            Err(OrreryError::CorruptSeriesTable { .. })
        ));
    }
}
