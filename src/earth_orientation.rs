//! # Earth orientation: obliquity and nutation
//!
//! * [`mean_obliquity`] – IAU 1976 polynomial for the mean obliquity of the ecliptic.
//! * [`nutation`] – IAU 1980 nutation in longitude and obliquity, truncated to the 63
//!   largest terms and further filtered by [`PrecisionLevel`].
//! * [`true_obliquity`] – mean obliquity plus nutation in obliquity.
//!
//! The nutation arguments `D, M, M', F, Ω` are shared with the lunar theory through
//! [`FundamentalArguments`].

use serde::{Deserialize, Serialize};

use crate::{
    constants::{ArcSec, Radian, RADSEC},
    fundamental_args::FundamentalArguments,
    series::PrecisionLevel,
};

/// `[D, M, M', F, Ω, ψ₀, ψ₁, ε₀, ε₁]`: multipliers, then `Δψ = (ψ₀ + ψ₁·T)·sin(arg)` and
/// `Δε = (ε₀ + ε₁·T)·cos(arg)` in units of 0.0001″.
type NutationTerm = [f64; 9];

#[rustfmt::skip]
const NUTATION_TERMS: &[NutationTerm] = &[
    [0.0, 0.0, 0.0, 0.0, 1.0, -171996.0, -174.2, 92025.0, 8.9],
    [-2.0, 0.0, 0.0, 2.0, 2.0, -13187.0, -1.6, 5736.0, -3.1],
    [0.0, 0.0, 0.0, 2.0, 2.0, -2274.0, -0.2, 977.0, -0.5],
    [0.0, 0.0, 0.0, 0.0, 2.0, 2062.0, 0.2, -895.0, 0.5],
    [0.0, 1.0, 0.0, 0.0, 0.0, 1426.0, -3.4, 54.0, -0.1],
    [0.0, 0.0, 1.0, 0.0, 0.0, 712.0, 0.1, -7.0, 0.0],
    [-2.0, 1.0, 0.0, 2.0, 2.0, -517.0, 1.2, 224.0, -0.6],
    [0.0, 0.0, 0.0, 2.0, 1.0, -386.0, -0.4, 200.0, 0.0],
    [0.0, 0.0, 1.0, 2.0, 2.0, -301.0, 0.0, 129.0, -0.1],
    [-2.0, -1.0, 0.0, 2.0, 2.0, 217.0, -0.5, -95.0, 0.3],
    [-2.0, 0.0, 1.0, 0.0, 0.0, -158.0, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 0.0, 2.0, 1.0, 129.0, 0.1, -70.0, 0.0],
    [0.0, 0.0, -1.0, 2.0, 2.0, 123.0, 0.0, -53.0, 0.0],
    [2.0, 0.0, 0.0, 0.0, 0.0, 63.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 1.0, 63.0, 0.1, -33.0, 0.0],
    [2.0, 0.0, -1.0, 2.0, 2.0, -59.0, 0.0, 26.0, 0.0],
    [0.0, 0.0, -1.0, 0.0, 1.0, -58.0, -0.1, 32.0, 0.0],
    [0.0, 0.0, 1.0, 2.0, 1.0, -51.0, 0.0, 27.0, 0.0],
    [-2.0, 0.0, 2.0, 0.0, 0.0, 48.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -2.0, 2.0, 1.0, 46.0, 0.0, -24.0, 0.0],
    [2.0, 0.0, 0.0, 2.0, 2.0, -38.0, 0.0, 16.0, 0.0],
    [0.0, 0.0, 2.0, 2.0, 2.0, -31.0, 0.0, 13.0, 0.0],
    [0.0, 0.0, 2.0, 0.0, 0.0, 29.0, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 1.0, 2.0, 2.0, 29.0, 0.0, -12.0, 0.0],
    [0.0, 0.0, 0.0, 2.0, 0.0, 26.0, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 0.0, 2.0, 0.0, -22.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -1.0, 2.0, 1.0, 21.0, 0.0, -10.0, 0.0],
    [0.0, 2.0, 0.0, 0.0, 0.0, 17.0, -0.1, 0.0, 0.0],
    [2.0, 0.0, -1.0, 0.0, 1.0, 16.0, 0.0, -8.0, 0.0],
    [-2.0, 2.0, 0.0, 2.0, 2.0, -16.0, 0.1, 7.0, 0.0],
    [0.0, 1.0, 0.0, 0.0, 1.0, -15.0, 0.0, 9.0, 0.0],
    [-2.0, 0.0, 1.0, 0.0, 1.0, -13.0, 0.0, 7.0, 0.0],
    [0.0, -1.0, 0.0, 0.0, 1.0, -12.0, 0.0, 6.0, 0.0],
    [0.0, 0.0, 2.0, -2.0, 0.0, 11.0, 0.0, 0.0, 0.0],
    [2.0, 0.0, -1.0, 2.0, 1.0, -10.0, 0.0, 5.0, 0.0],
    [2.0, 0.0, 1.0, 2.0, 2.0, -8.0, 0.0, 3.0, 0.0],
    [0.0, 1.0, 0.0, 2.0, 2.0, 7.0, 0.0, -3.0, 0.0],
    [-2.0, 1.0, 1.0, 0.0, 0.0, -7.0, 0.0, 0.0, 0.0],
    [0.0, -1.0, 0.0, 2.0, 2.0, -7.0, 0.0, 3.0, 0.0],
    [2.0, 0.0, 0.0, 2.0, 1.0, -7.0, 0.0, 3.0, 0.0],
    [2.0, 0.0, 1.0, 0.0, 0.0, 6.0, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 2.0, 2.0, 2.0, 6.0, 0.0, -3.0, 0.0],
    [-2.0, 0.0, 1.0, 2.0, 1.0, 6.0, 0.0, -3.0, 0.0],
    [2.0, 0.0, -2.0, 0.0, 1.0, -6.0, 0.0, 3.0, 0.0],
    [2.0, 0.0, 0.0, 0.0, 1.0, -6.0, 0.0, 3.0, 0.0],
    [0.0, -1.0, 1.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0],
    [-2.0, -1.0, 0.0, 2.0, 1.0, -5.0, 0.0, 3.0, 0.0],
    [-2.0, 0.0, 0.0, 0.0, 1.0, -5.0, 0.0, 3.0, 0.0],
    [0.0, 0.0, 2.0, 2.0, 1.0, -5.0, 0.0, 3.0, 0.0],
    [-2.0, 0.0, 2.0, 0.0, 1.0, 4.0, 0.0, 0.0, 0.0],
    [-2.0, 1.0, 0.0, 2.0, 1.0, 4.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, -2.0, 0.0, 4.0, 0.0, 0.0, 0.0],
    [-1.0, 0.0, 1.0, 0.0, 0.0, -4.0, 0.0, 0.0, 0.0],
    [-2.0, 1.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 2.0, 0.0, 3.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -2.0, 2.0, 2.0, -3.0, 0.0, 0.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 1.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0],
    [0.0, -1.0, 1.0, 2.0, 2.0, -3.0, 0.0, 0.0, 0.0],
    [2.0, -1.0, -1.0, 2.0, 2.0, -3.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 3.0, 2.0, 2.0, -3.0, 0.0, 0.0, 0.0],
    [2.0, -1.0, 0.0, 2.0, 2.0, -3.0, 0.0, 0.0, 0.0],
];

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `t`: Julian centuries (TT) since J2000.0.
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(T) = 23°26′21.448″ − 46.815″·T − 0.0006″·T² + 0.00181″·T³
/// ```
/// evaluated with Horner's method.
///
/// # See also
/// * [`true_obliquity`] – adds the nutation in obliquity
/// * [`crate::ref_system::ecliptic_to_equatorial`] – consumes the true obliquity
pub fn mean_obliquity(t: f64) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation angles at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutation {
    /// Nutation in longitude Δψ, arcseconds
    pub longitude: ArcSec,
    /// Nutation in obliquity Δε, arcseconds
    pub obliquity: ArcSec,
    /// Number of periodic terms summed
    pub terms_used: usize,
}

/// Compute the nutation angles in longitude and obliquity (IAU 1980 theory).
///
/// Arguments
/// ---------
/// * `args`: fundamental arguments at the requested instant (their `t` is used for the
///   secular part of the coefficients).
/// * `precision`: terms whose largest coefficient is below
///   [`PrecisionLevel::nutation_threshold`] are skipped.
///
/// Returns
/// --------
/// * [`Nutation`] with both angles in arcseconds.
///
/// # See also
/// * [`true_obliquity`]
pub fn nutation(args: &FundamentalArguments, precision: PrecisionLevel) -> Nutation {
    let threshold = precision.nutation_threshold();
    let t = args.t;

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    let mut terms_used = 0;
    for &[d, m, mp, f, om, psi0, psi1, eps0, eps1] in NUTATION_TERMS {
        if psi0.abs().max(eps0.abs()) < threshold {
            continue;
        }
        let arg = args.combination_rad(d, m, mp, f, om);
        dpsi += (psi0 + psi1 * t) * arg.sin();
        deps += (eps0 + eps1 * t) * arg.cos();
        terms_used += 1;
    }

    Nutation {
        longitude: dpsi * 1e-4,
        obliquity: deps * 1e-4,
        terms_used,
    }
}

/// True obliquity `ε = ε₀ + Δε`, in radians.
pub fn true_obliquity(t: f64, nutation: &Nutation) -> Radian {
    mean_obliquity(t) + nutation.obliquity * RADSEC
}

#[cfg(test)]
mod test_earth_orientation {
    use super::*;
    use crate::time::julian_centuries;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_obliquity() {
        let obl = mean_obliquity(0.0);
        assert_relative_eq!(obl, 0.40909280422232897, max_relative = 1e-15);
    }

    #[test]
    fn test_nutation_at_j2000() {
        let nut = nutation(&FundamentalArguments::at(0.0), PrecisionLevel::High);
        // full IAU 1980 series: (-13.923385, -5.773808)
        assert_abs_diff_eq!(nut.longitude, -13.923_385, epsilon = 0.05);
        assert_abs_diff_eq!(nut.obliquity, -5.773_808, epsilon = 0.05);
        assert_eq!(nut.terms_used, NUTATION_TERMS.len());
    }

    #[test]
    fn test_nutation_meeus_example() {
        // 1987 April 10, 0h TD
        let t = julian_centuries(2_446_895.5);
        let nut = nutation(&FundamentalArguments::at(t), PrecisionLevel::High);
        assert_abs_diff_eq!(nut.longitude, -3.788, epsilon = 0.01);
        assert_abs_diff_eq!(nut.obliquity, 9.443, epsilon = 0.01);

        let eps0 = mean_obliquity(t).to_degrees();
        assert_abs_diff_eq!(eps0, 23.440_946, epsilon = 1e-6);
        let eps = true_obliquity(t, &nut).to_degrees();
        assert_abs_diff_eq!(eps, 23.443_569, epsilon = 1e-5);
    }

    #[test]
    fn test_nutation_precision_filter() {
        let args = FundamentalArguments::at(0.12);
        let high = nutation(&args, PrecisionLevel::High);
        let minimal = nutation(&args, PrecisionLevel::Minimal);
        assert!(minimal.terms_used < high.terms_used);
        assert!(minimal.terms_used >= 4);
        assert_abs_diff_eq!(high.longitude, minimal.longitude, epsilon = 0.6);
    }
}
