//! # Truncated harmonic series evaluation
//!
//! Heliocentric ecliptic coordinates of the planets are computed from truncated VSOP87D
//! tables. For each coordinate `X ∈ {L, B, R}` the theory provides up to six degrees
//! `X0 … X5`, each a list of periodic terms `A·cos(B + C·τ)`. The coordinate is
//!
//! ```text
//! X(τ) = X0 + X1·τ + X2·τ² + X3·τ³ + X4·τ⁴ + X5·τ⁵        (τ in Julian millennia)
//! ```
//!
//! with amplitudes in units of 1e-8 rad (1e-8 AU for the radius vector).
//!
//! ## Precision levels
//!
//! A [`PrecisionLevel`] drops every term whose amplitude is below a level-specific
//! threshold. Lower levels therefore always use a subset of the terms of higher levels,
//! and `High` keeps the whole table:
//!
//! | Level     | VSOP87 threshold (1e-8) | ELP threshold (1e-6 °) | Nutation threshold (1e-4″) |
//! |-----------|-------------------------|------------------------|----------------------------|
//! | `High`    | all terms               | all terms              | all terms                  |
//! | `Medium`  | 1 000                   | 400                    | 10                         |
//! | `Low`     | 10 000                  | 2 000                  | 100                        |
//! | `Minimal` | 100 000                 | 10 000                 | 1 000                      |
//!
//! ## Validation
//!
//! [`SeriesTable::validate`] checks the structure of a table before the engine uses it
//! (non-empty leading degrees, finite values, non-negative amplitudes, constant leading
//! term for `L0` and `R0`). A table that fails validation is never evaluated: the engine
//! switches the affected body to its closed-form fallback instead.
//!
//! ## See also
//! * [`vsop87::SeriesBody`] – access to the built-in tables.
//! * [`crate::orrery::Orrery`] – fallback handling around the evaluator.

pub mod vsop87;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::{AstronomicalUnit, Degree};
use crate::orrery_errors::OrreryError;

/// One periodic term `[A, B, C]` of a VSOP87 series.
pub type VsopTerm = [f64; 3];

/// Terms of one degree of one coordinate, borrowed from the static tables or owned when
/// supplied by the caller.
pub type HarmonicSeries = Cow<'static, [VsopTerm]>;

/// Maximum number of time-power degrees in a VSOP87D coordinate.
pub const MAX_SERIES_DEGREE: usize = 6;

/// Scale from the VSOP87 amplitude unit (1e-8) to radians or AU.
const VSOP_UNIT: f64 = 1e-8;

/// Truncation level applied to every series of a calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrecisionLevel {
    #[default]
    High,
    Medium,
    Low,
    Minimal,
}

impl PrecisionLevel {
    pub const ALL: [PrecisionLevel; 4] = [
        PrecisionLevel::High,
        PrecisionLevel::Medium,
        PrecisionLevel::Low,
        PrecisionLevel::Minimal,
    ];

    /// Minimum VSOP87 amplitude kept, in 1e-8 rad / 1e-8 AU.
    pub fn vsop_threshold(self) -> f64 {
        match self {
            PrecisionLevel::High => 0.0,
            PrecisionLevel::Medium => 1_000.0,
            PrecisionLevel::Low => 10_000.0,
            PrecisionLevel::Minimal => 100_000.0,
        }
    }

    /// Minimum lunar coefficient kept, in 1e-6 degree (1e-3 km for the distance series).
    pub fn lunar_threshold(self) -> f64 {
        match self {
            PrecisionLevel::High => 0.0,
            PrecisionLevel::Medium => 400.0,
            PrecisionLevel::Low => 2_000.0,
            PrecisionLevel::Minimal => 10_000.0,
        }
    }

    /// Minimum nutation coefficient kept, in 0.0001 arcsecond.
    pub fn nutation_threshold(self) -> f64 {
        match self {
            PrecisionLevel::High => 0.0,
            PrecisionLevel::Medium => 10.0,
            PrecisionLevel::Low => 100.0,
            PrecisionLevel::Minimal => 1_000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrecisionLevel::High => "high",
            PrecisionLevel::Medium => "medium",
            PrecisionLevel::Low => "low",
            PrecisionLevel::Minimal => "minimal",
        }
    }
}

impl fmt::Display for PrecisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrecisionLevel {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(PrecisionLevel::High),
            "medium" => Ok(PrecisionLevel::Medium),
            "low" => Ok(PrecisionLevel::Low),
            "minimal" => Ok(PrecisionLevel::Minimal),
            other => Err(OrreryError::InvalidEngineParameter(format!(
                "unknown precision level '{other}'"
            ))),
        }
    }
}

/// Complete set of L, B, R series for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    pub name: String,
    pub longitude: Vec<HarmonicSeries>,
    pub latitude: Vec<HarmonicSeries>,
    pub radius: Vec<HarmonicSeries>,
}

impl SeriesTable {
    /// Wrap static term slices without copying them.
    pub fn from_static(
        name: &str,
        longitude: &[&'static [VsopTerm]],
        latitude: &[&'static [VsopTerm]],
        radius: &[&'static [VsopTerm]],
    ) -> Self {
        let wrap = |degrees: &[&'static [VsopTerm]]| {
            degrees
                .iter()
                .map(|terms| Cow::Borrowed(*terms))
                .collect::<Vec<HarmonicSeries>>()
        };
        SeriesTable {
            name: name.to_string(),
            longitude: wrap(longitude),
            latitude: wrap(latitude),
            radius: wrap(radius),
        }
    }

    /// Structural checks run once before a table is used.
    ///
    /// Return
    /// ------
    /// * `Ok(())` when the table can be evaluated, otherwise
    ///   [`OrreryError::CorruptSeriesTable`] describing the first problem found.
    pub fn validate(&self) -> Result<(), OrreryError> {
        let corrupt = |reason: String| OrreryError::CorruptSeriesTable {
            table: self.name.clone(),
            reason,
        };

        for (label, degrees) in [
            ("L", &self.longitude),
            ("B", &self.latitude),
            ("R", &self.radius),
        ] {
            if degrees.is_empty() || degrees.len() > MAX_SERIES_DEGREE {
                return Err(corrupt(format!(
                    "{label} has {} degrees, expected 1..={MAX_SERIES_DEGREE}",
                    degrees.len()
                )));
            }
            if degrees[0].is_empty() {
                return Err(corrupt(format!("{label}0 has no terms")));
            }
            for (k, terms) in degrees.iter().enumerate() {
                for (i, [a, b, c]) in terms.iter().enumerate() {
                    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
                        return Err(corrupt(format!("{label}{k}[{i}] is not finite")));
                    }
                    if *a < 0.0 {
                        return Err(corrupt(format!("{label}{k}[{i}] has a negative amplitude")));
                    }
                }
            }
        }

        for (label, leading) in [("L0", &self.longitude[0]), ("R0", &self.radius[0])] {
            let [a, _, c] = leading[0];
            if c != 0.0 || a == 0.0 {
                return Err(corrupt(format!(
                    "{label} must start with its non-zero constant term"
                )));
            }
        }
        Ok(())
    }

    /// Number of terms kept over the three coordinates at `precision`.
    pub fn term_count(&self, precision: PrecisionLevel) -> usize {
        let threshold = precision.vsop_threshold();
        [&self.longitude, &self.latitude, &self.radius]
            .into_iter()
            .flatten()
            .map(|terms| terms.iter().filter(|t| t[0] >= threshold).count())
            .sum()
    }
}

/// Raw value of one coordinate and the number of terms that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesEvaluation {
    pub value: f64,
    pub terms_used: usize,
}

/// Evaluate `Σ_k τ^k Σ_i A_i·cos(B_i + C_i·τ)` keeping terms with `A ≥ threshold`.
///
/// The outer sum is accumulated with Horner's scheme from the highest degree down.
/// The result is in the table's native unit (1e-8 rad or 1e-8 AU).
pub fn evaluate_series(degrees: &[HarmonicSeries], tau: f64, threshold: f64) -> SeriesEvaluation {
    let mut terms_used = 0;
    let value = degrees.iter().rev().fold(0.0, |acc, terms| {
        let sum: f64 = terms
            .iter()
            .filter(|t| t[0] >= threshold)
            .inspect(|_| terms_used += 1)
            .map(|[a, b, c]| a * (b + c * tau).cos())
            .sum();
        acc * tau + sum
    });
    SeriesEvaluation { value, terms_used }
}

/// Heliocentric ecliptic position of date produced by a [`SeriesTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricPosition {
    /// Longitude, degrees in `[0, 360)`
    pub longitude: Degree,
    /// Latitude, degrees
    pub latitude: Degree,
    /// Radius vector, AU
    pub radius: AstronomicalUnit,
    /// Total number of periodic terms summed
    pub terms_used: usize,
}

/// Evaluates VSOP87 tables at a fixed precision level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesEvaluator {
    precision: PrecisionLevel,
}

impl SeriesEvaluator {
    pub fn new(precision: PrecisionLevel) -> Self {
        SeriesEvaluator { precision }
    }

    pub fn precision(&self) -> PrecisionLevel {
        self.precision
    }

    fn checked(
        &self,
        table: &SeriesTable,
        coordinate: &str,
        evaluation: SeriesEvaluation,
    ) -> Result<SeriesEvaluation, OrreryError> {
        if evaluation.value.is_finite() {
            Ok(evaluation)
        } else {
            Err(OrreryError::SeriesEvaluation {
                series: table.name.clone(),
                reason: format!("{coordinate} evaluated to {}", evaluation.value),
            })
        }
    }

    /// Heliocentric longitude in degrees, normalized to `[0, 360)`.
    ///
    /// Arguments
    /// ---------
    /// * `table`: the body's series
    /// * `tau`: Julian millennia from J2000.0
    pub fn longitude(&self, table: &SeriesTable, tau: f64) -> Result<SeriesEvaluation, OrreryError> {
        let raw = evaluate_series(&table.longitude, tau, self.precision.vsop_threshold());
        let raw = self.checked(table, "longitude", raw)?;
        Ok(SeriesEvaluation {
            value: normalize_degrees((raw.value * VSOP_UNIT).to_degrees()),
            terms_used: raw.terms_used,
        })
    }

    /// Heliocentric latitude in degrees.
    pub fn latitude(&self, table: &SeriesTable, tau: f64) -> Result<SeriesEvaluation, OrreryError> {
        let raw = evaluate_series(&table.latitude, tau, self.precision.vsop_threshold());
        let raw = self.checked(table, "latitude", raw)?;
        Ok(SeriesEvaluation {
            value: (raw.value * VSOP_UNIT).to_degrees(),
            terms_used: raw.terms_used,
        })
    }

    /// Radius vector in AU.
    pub fn radius(&self, table: &SeriesTable, tau: f64) -> Result<SeriesEvaluation, OrreryError> {
        let raw = evaluate_series(&table.radius, tau, self.precision.vsop_threshold());
        let raw = self.checked(table, "radius", raw)?;
        if raw.value <= 0.0 {
            return Err(OrreryError::SeriesEvaluation {
                series: table.name.clone(),
                reason: format!("radius evaluated to non-positive {}", raw.value),
            });
        }
        Ok(SeriesEvaluation {
            value: raw.value * VSOP_UNIT,
            terms_used: raw.terms_used,
        })
    }

    /// All three coordinates at once.
    pub fn heliocentric(
        &self,
        table: &SeriesTable,
        tau: f64,
    ) -> Result<HeliocentricPosition, OrreryError> {
        let l = self.longitude(table, tau)?;
        let b = self.latitude(table, tau)?;
        let r = self.radius(table, tau)?;
        Ok(HeliocentricPosition {
            longitude: l.value,
            latitude: b.value,
            radius: r.value,
            terms_used: l.terms_used + b.terms_used + r.terms_used,
        })
    }
}

#[cfg(test)]
mod series_test {
    use super::vsop87::SeriesBody;
    use super::*;
    use crate::time::julian_millennia;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_precision_from_str() {
        assert_eq!("HIGH".parse::<PrecisionLevel>(), Ok(PrecisionLevel::High));
        assert_eq!("minimal".parse::<PrecisionLevel>(), Ok(PrecisionLevel::Minimal));
        assert!("ultra".parse::<PrecisionLevel>().is_err());
    }

    #[test]
    fn test_thresholds_are_monotonic() {
        for pair in PrecisionLevel::ALL.windows(2) {
            assert!(pair[0].vsop_threshold() < pair[1].vsop_threshold());
            assert!(pair[0].lunar_threshold() < pair[1].lunar_threshold());
            assert!(pair[0].nutation_threshold() < pair[1].nutation_threshold());
        }
    }

    #[test]
    fn test_earth_heliocentric_meeus_example() {
        // 1992 October 13.0 TD
        let tau = julian_millennia(2_448_908.5);
        let table = SeriesBody::Earth.table();
        let earth = SeriesEvaluator::new(PrecisionLevel::High)
            .heliocentric(&table, tau)
            .unwrap();

        assert_abs_diff_eq!(earth.longitude, 19.907_372, epsilon = 2e-5);
        assert_abs_diff_eq!(earth.latitude, -0.000_179, epsilon = 2e-5);
        assert_abs_diff_eq!(earth.radius, 0.997_607_75, epsilon = 1e-7);
    }

    #[test]
    fn test_lower_precision_uses_subset() {
        let table = SeriesBody::Mars.table();
        let counts: Vec<usize> = PrecisionLevel::ALL
            .iter()
            .map(|&p| table.term_count(p))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] > w[1]));

        let tau = julian_millennia(2_451_545.0);
        for p in PrecisionLevel::ALL {
            let used = SeriesEvaluator::new(p).heliocentric(&table, tau).unwrap();
            assert_eq!(used.terms_used, table.term_count(p));
        }
    }

    #[test]
    fn test_precision_levels_agree_roughly() {
        let tau = julian_millennia(2_460_000.5);
        let table = SeriesBody::Venus.table();
        let high = SeriesEvaluator::new(PrecisionLevel::High)
            .heliocentric(&table, tau)
            .unwrap();
        let minimal = SeriesEvaluator::new(PrecisionLevel::Minimal)
            .heliocentric(&table, tau)
            .unwrap();
        let diff = crate::angles::angular_separation(high.longitude, minimal.longitude);
        assert!(diff < 0.3, "diff = {diff}");
    }

    #[test]
    fn test_builtin_tables_validate() {
        for body in SeriesBody::ALL {
            assert_eq!(body.table().validate(), Ok(()), "{body:?}");
        }
    }

    #[test]
    fn test_validate_rejects_corruption() {
        let mut table = SeriesBody::Mars.table();
        let mut l0 = table.longitude[0].to_vec();
        l0[3][0] = f64::NAN;
        table.longitude[0] = Cow::Owned(l0);
        assert!(matches!(
            table.validate(),
            Err(OrreryError::CorruptSeriesTable { .. })
        ));

        let mut empty = SeriesBody::Mars.table();
        empty.radius[0] = Cow::Owned(Vec::new());
        assert!(empty.validate().is_err());

        let mut negative = SeriesBody::Saturn.table();
        let mut b1 = negative.latitude[1].to_vec();
        b1[0][0] = -1.0;
        negative.latitude[1] = Cow::Owned(b1);
        assert!(negative.validate().is_err());

        let mut too_deep = SeriesBody::Earth.table();
        too_deep.longitude.push(Cow::Borrowed(&[]));
        assert!(too_deep.validate().is_err());
    }

    #[test]
    fn test_non_finite_evaluation_is_an_error() {
        let table = SeriesTable {
            name: "broken".into(),
            longitude: vec![Cow::Owned(vec![[f64::INFINITY, 0.0, 0.0]])],
            latitude: vec![Cow::Owned(vec![[0.0, 0.0, 0.0]])],
            radius: vec![Cow::Owned(vec![[1e8, 0.0, 0.0]])],
        };
        let err = SeriesEvaluator::new(PrecisionLevel::High)
            .longitude(&table, 0.0)
            .unwrap_err();
        assert!(matches!(err, OrreryError::SeriesEvaluation { .. }));
    }
}
