//! # Keplerian mean-element ephemerides
//!
//! Closed-form heliocentric positions from osculating mean elements that vary linearly
//! with time (JPL "Keplerian elements for approximate positions of the major planets",
//! valid 1800–2050 AD, ecliptic and equinox J2000.0).
//!
//! Two users in the crate:
//!
//! * **Pluto**, which has no VSOP87 table. Its mean elements are complemented with a
//!   single Neptune resonance term and with the general precession in longitude so the
//!   result is referred to the equinox of date like the series bodies.
//! * The **legacy fallback** used when a series table fails validation or evaluation:
//!   every planet (and the Earth–Moon barycenter standing in for the Earth) can be
//!   positioned from its elements, and the Sun has the low-accuracy solar formula.
//!
//! Kepler's equation `E − e·sin E = M` is solved with Newton–Raphson from the `roots`
//! crate.

use nalgebra::Vector3;
use roots::{find_root_newton_raphson, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::angles::{normalize_degrees, signed_degrees};
use crate::bodies::Body;
use crate::constants::{ArcSec, AstronomicalUnit, Degree, Radian, RADEG, RADSEC};
use crate::orrery_errors::OrreryError;
use crate::ref_system::{rotmt, Axis};
use crate::time::julian_centuries;

/// Amplitude, in degrees, of the Neptune 3:2 resonance term added to Pluto's longitude.
pub const PLUTO_RESONANCE_AMPLITUDE: Degree = 0.006;

/// Mean elements `value(T) = [0] + [1]·T`, `T` in Julian centuries from J2000.0.
///
/// Angles are in degrees, the semi-major axis in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    pub semi_major_axis: [f64; 2],
    pub eccentricity: [f64; 2],
    pub inclination: [Degree; 2],
    pub mean_longitude: [Degree; 2],
    pub perihelion_longitude: [Degree; 2],
    pub ascending_node: [Degree; 2],
}

/// Elements evaluated at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub mean_longitude: Degree,
    pub perihelion_longitude: Degree,
    pub ascending_node: Degree,
}

impl MeanElements {
    pub fn at(&self, t: f64) -> OrbitState {
        let lin = |c: &[f64; 2]| c[0] + c[1] * t;
        OrbitState {
            semi_major_axis: lin(&self.semi_major_axis),
            eccentricity: lin(&self.eccentricity),
            inclination: lin(&self.inclination),
            mean_longitude: normalize_degrees(lin(&self.mean_longitude)),
            perihelion_longitude: normalize_degrees(lin(&self.perihelion_longitude)),
            ascending_node: normalize_degrees(lin(&self.ascending_node)),
        }
    }
}

const MERCURY: MeanElements = MeanElements {
    semi_major_axis: [0.387_099_27, 0.000_000_37],
    eccentricity: [0.205_635_93, 0.000_019_06],
    inclination: [7.004_979_02, -0.005_947_49],
    mean_longitude: [252.250_323_50, 149_472.674_111_75],
    perihelion_longitude: [77.457_796_28, 0.160_476_89],
    ascending_node: [48.330_765_93, -0.125_340_81],
};

const VENUS: MeanElements = MeanElements {
    semi_major_axis: [0.723_335_66, 0.000_003_90],
    eccentricity: [0.006_776_72, -0.000_041_07],
    inclination: [3.394_676_05, -0.000_788_90],
    mean_longitude: [181.979_099_50, 58_517.815_387_29],
    perihelion_longitude: [131.602_467_18, 0.002_683_29],
    ascending_node: [76.679_842_55, -0.277_694_18],
};

const EARTH_MOON_BARYCENTER: MeanElements = MeanElements {
    semi_major_axis: [1.000_002_61, 0.000_005_62],
    eccentricity: [0.016_711_23, -0.000_043_92],
    inclination: [-0.000_015_31, -0.012_946_68],
    mean_longitude: [100.464_571_66, 35_999.372_449_81],
    perihelion_longitude: [102.937_681_93, 0.323_273_64],
    ascending_node: [0.0, 0.0],
};

const MARS: MeanElements = MeanElements {
    semi_major_axis: [1.523_710_34, 0.000_018_47],
    eccentricity: [0.093_394_10, 0.000_078_82],
    inclination: [1.849_691_42, -0.008_131_31],
    mean_longitude: [-4.553_432_05, 19_140.302_684_99],
    perihelion_longitude: [-23.943_629_59, 0.444_410_88],
    ascending_node: [49.559_538_91, -0.292_573_43],
};

const JUPITER: MeanElements = MeanElements {
    semi_major_axis: [5.202_887_00, -0.000_116_07],
    eccentricity: [0.048_386_24, -0.000_132_53],
    inclination: [1.304_396_95, -0.001_837_14],
    mean_longitude: [34.396_440_51, 3_034.746_127_75],
    perihelion_longitude: [14.728_479_83, 0.212_526_68],
    ascending_node: [100.473_909_09, 0.204_691_06],
};

const SATURN: MeanElements = MeanElements {
    semi_major_axis: [9.536_675_94, -0.001_250_60],
    eccentricity: [0.053_861_79, -0.000_509_91],
    inclination: [2.485_991_87, 0.001_936_09],
    mean_longitude: [49.954_244_23, 1_222.493_622_01],
    perihelion_longitude: [92.598_878_31, -0.418_972_16],
    ascending_node: [113.662_424_48, -0.288_677_94],
};

const URANUS: MeanElements = MeanElements {
    semi_major_axis: [19.189_164_64, -0.001_961_76],
    eccentricity: [0.047_257_44, -0.000_043_97],
    inclination: [0.772_637_83, -0.002_429_39],
    mean_longitude: [313.238_104_51, 428.482_027_85],
    perihelion_longitude: [170.954_276_30, 0.408_052_81],
    ascending_node: [74.016_925_03, 0.042_405_89],
};

const NEPTUNE: MeanElements = MeanElements {
    semi_major_axis: [30.069_922_76, 0.000_262_91],
    eccentricity: [0.008_590_48, 0.000_051_05],
    inclination: [1.770_043_47, 0.000_353_72],
    mean_longitude: [-55.120_029_69, 218.459_453_25],
    perihelion_longitude: [44.964_762_27, -0.322_414_64],
    ascending_node: [131.784_225_74, -0.005_086_64],
};

const PLUTO: MeanElements = MeanElements {
    semi_major_axis: [39.482_116_75, -0.000_315_96],
    eccentricity: [0.248_827_30, 0.000_051_70],
    inclination: [17.140_012_06, 0.000_048_18],
    mean_longitude: [238.929_038_33, 145.207_805_15],
    perihelion_longitude: [224.068_916_29, -0.040_629_42],
    ascending_node: [110.303_936_84, -0.011_834_82],
};

/// Bodies with a mean-element set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeplerBody {
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl KeplerBody {
    /// Mean-element body for a chart body. The Sun and the Moon have none.
    pub fn for_body(body: Body) -> Option<KeplerBody> {
        match body {
            Body::Mercury => Some(KeplerBody::Mercury),
            Body::Venus => Some(KeplerBody::Venus),
            Body::Mars => Some(KeplerBody::Mars),
            Body::Jupiter => Some(KeplerBody::Jupiter),
            Body::Saturn => Some(KeplerBody::Saturn),
            Body::Uranus => Some(KeplerBody::Uranus),
            Body::Neptune => Some(KeplerBody::Neptune),
            Body::Pluto => Some(KeplerBody::Pluto),
            Body::Sun | Body::Moon => None,
        }
    }

    pub fn elements(self) -> &'static MeanElements {
        match self {
            KeplerBody::Mercury => &MERCURY,
            KeplerBody::Venus => &VENUS,
            KeplerBody::EarthMoonBarycenter => &EARTH_MOON_BARYCENTER,
            KeplerBody::Mars => &MARS,
            KeplerBody::Jupiter => &JUPITER,
            KeplerBody::Saturn => &SATURN,
            KeplerBody::Uranus => &URANUS,
            KeplerBody::Neptune => &NEPTUNE,
            KeplerBody::Pluto => &PLUTO,
        }
    }
}

/// Solve Kepler's equation `E − e·sin E = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly in radians, any range.
/// * `eccentricity`: orbital eccentricity, `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly in radians, on the same turn as the reduced mean anomaly
///   (`M` is first reduced to `(-π, π]`).
/// * [`OrreryError::RootFindingError`] if Newton–Raphson does not converge.
pub fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, OrreryError> {
    let m = signed_degrees(mean_anomaly / RADEG) * RADEG;

    let f = |e_anom: f64| -> f64 { e_anom - eccentricity * e_anom.sin() - m };
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    let x0 = m + eccentricity * m.sin();

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2,
        max_iter: 25,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Heliocentric position from a set of orbital elements, in the elements' frame
/// (ecliptic and equinox J2000.0), AU.
pub fn position_from_state(state: &OrbitState) -> Result<Vector3<f64>, OrreryError> {
    let e = state.eccentricity;
    let a = state.semi_major_axis;
    let arg_perihelion = (state.perihelion_longitude - state.ascending_node) * RADEG;
    let mean_anomaly = (state.mean_longitude - state.perihelion_longitude) * RADEG;

    let ecc_anomaly = solve_kepler_equation(mean_anomaly, e)?;

    let in_plane = Vector3::new(
        a * (ecc_anomaly.cos() - e),
        a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
        0.0,
    );

    let to_ecliptic = rotmt(state.ascending_node * RADEG, Axis::Z)
        * rotmt(state.inclination * RADEG, Axis::X)
        * rotmt(arg_perihelion, Axis::Z);

    Ok(to_ecliptic * in_plane)
}

/// General precession in longitude since J2000.0, `T` in Julian centuries.
pub fn general_precession(t: f64) -> ArcSec {
    5_029.096_6 * t + 1.111_13 * t * t
}

/// Heliocentric position of `body` referred to the ecliptic and mean equinox of date.
///
/// The J2000.0 vector is rotated about the ecliptic pole by the general precession in
/// longitude; the small motion of the ecliptic itself is neglected.
pub fn heliocentric_of_date(body: KeplerBody, jd: f64) -> Result<Vector3<f64>, OrreryError> {
    let t = julian_centuries(jd);
    let state = body.elements().at(t);
    let j2000 = position_from_state(&state)?;
    Ok(rotmt(general_precession(t) * RADSEC, Axis::Z) * j2000)
}

/// Pluto's heliocentric position referred to the equinox of date.
///
/// Mean elements plus one resonance term with Neptune in longitude,
/// `Δλ = A·sin(3λ_P − 2λ_N − ϖ_P)` with `A =` [`PLUTO_RESONANCE_AMPLITUDE`].
pub fn pluto_heliocentric(jd: f64) -> Result<Vector3<f64>, OrreryError> {
    let t = julian_centuries(jd);
    let pluto = PLUTO.at(t);
    let neptune = NEPTUNE.at(t);

    let argument =
        3.0 * pluto.mean_longitude - 2.0 * neptune.mean_longitude - pluto.perihelion_longitude;
    let resonance = PLUTO_RESONANCE_AMPLITUDE * (argument * RADEG).sin();

    let j2000 = position_from_state(&pluto)?;
    let rotation = general_precession(t) * RADSEC + resonance * RADEG;
    Ok(rotmt(rotation, Axis::Z) * j2000)
}

/// Output of the low-accuracy solar theory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LowAccuracySun {
    /// Geometric longitude referred to the mean equinox of date
    pub true_longitude: Degree,
    /// Longitude corrected for nutation and aberration
    pub apparent_longitude: Degree,
    /// Sun–Earth distance in AU
    pub radius: AstronomicalUnit,
    /// Eccentricity of the Earth's orbit
    pub eccentricity: f64,
}

/// Solar position to about 0.01°, `T` in Julian centuries from J2000.0.
///
/// Geometric mean longitude plus the equation of the center; the apparent longitude
/// folds nutation and aberration into `−0.00569° − 0.00478°·sin Ω`.
pub fn low_accuracy_sun(t: f64) -> LowAccuracySun {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t) * RADEG;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    let true_longitude = normalize_degrees(mean_longitude + center);
    let true_anomaly = mean_anomaly + center * RADEG;
    let radius = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    let node = (125.04 - 1_934.136 * t) * RADEG;
    let apparent_longitude = normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * node.sin());

    LowAccuracySun {
        true_longitude,
        apparent_longitude,
        radius,
        eccentricity,
    }
}

/// Longitude of the perihelion of the Earth's orbit, degrees.
pub fn earth_perihelion_longitude(t: f64) -> Degree {
    102.937_35 + 1.719_46 * t + 0.000_46 * t * t
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use crate::ref_system::cartesian_to_spherical;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kepler_equation() {
        let e = 0.1;
        let m = 5.0 * RADEG;
        let ecc = solve_kepler_equation(m, e).unwrap();
        assert_abs_diff_eq!(ecc - e * ecc.sin(), m, epsilon = 1e-13);
        assert_abs_diff_eq!(ecc / RADEG, 5.554_589, epsilon = 1e-6);

        assert_eq!(solve_kepler_equation(0.0, 0.25).unwrap(), 0.0);
        let high = solve_kepler_equation(3.0, 0.9).unwrap();
        assert_abs_diff_eq!(high - 0.9 * high.sin(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circular_orbit_is_mean_longitude() {
        let state = OrbitState {
            semi_major_axis: 2.0,
            eccentricity: 0.0,
            inclination: 0.0,
            mean_longitude: 123.0,
            perihelion_longitude: 40.0,
            ascending_node: 10.0,
        };
        let (lon, lat, r) = cartesian_to_spherical(&position_from_state(&state).unwrap());
        assert_abs_diff_eq!(lon, 123.0, epsilon = 1e-10);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(r, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_earth_moon_barycenter_distance() {
        for jd in [2_415_020.5, 2_451_545.0, 2_488_070.5] {
            let v = heliocentric_of_date(KeplerBody::EarthMoonBarycenter, jd).unwrap();
            assert!((0.983..=1.017).contains(&v.norm()), "r = {}", v.norm());
        }
    }

    #[test]
    fn test_pluto_distance_and_latitude() {
        // Near perihelion in 1989 (29.7 AU), receding since
        let (_, lat, r) = cartesian_to_spherical(&pluto_heliocentric(2_447_800.5).unwrap());
        assert!((29.5..=30.0).contains(&r), "r = {r}");
        assert!(lat.abs() < 17.5);

        let (_, _, r2000) = cartesian_to_spherical(&pluto_heliocentric(2_451_545.0).unwrap());
        assert!(r2000 > r);
    }

    #[test]
    fn test_precession_rate() {
        assert_abs_diff_eq!(general_precession(1.0) / 3600.0, 1.397, epsilon = 1e-3);
        assert_eq!(general_precession(0.0), 0.0);
    }

    #[test]
    fn test_low_accuracy_sun() {
        // 1992 October 13.0 TD
        let t = (2_448_908.5 - 2_451_545.0) / 36_525.0;
        let sun = low_accuracy_sun(t);
        assert_abs_diff_eq!(sun.true_longitude, 199.909_88, epsilon = 1e-4);
        assert_abs_diff_eq!(sun.apparent_longitude, 199.908_95, epsilon = 2e-4);
        assert_abs_diff_eq!(sun.radius, 0.997_66, epsilon = 2e-5);

        let j2000 = low_accuracy_sun(0.0);
        assert_abs_diff_eq!(j2000.apparent_longitude, 280.3726, epsilon = 1e-3);
    }
}
