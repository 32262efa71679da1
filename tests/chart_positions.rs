mod common;

use approx::assert_abs_diff_eq;
use orrery::bodies::{Body, ZodiacSign};
use orrery::config::EngineConfig;
use orrery::constants::J2000_JD;
use orrery::coordinates::CorrectionKind;
use orrery::orrery::Orrery;
use orrery::position::CalculationMethod;
use orrery::series::PrecisionLevel;

use crate::common::{assert_longitude_close, uncached_engine};

#[test]
fn test_j2000_chart() {
    let engine = Orrery::new();
    let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();

    // 2000 January 1.5 TT, apparent geocentric longitudes
    let expected = [
        (Body::Sun, 280.37, 0.01),
        (Body::Mercury, 271.9, 1.0),
        (Body::Venus, 241.6, 1.0),
        (Body::Mars, 327.9, 1.0),
        (Body::Jupiter, 25.2, 1.0),
        (Body::Saturn, 40.4, 1.0),
        (Body::Uranus, 314.8, 1.0),
        (Body::Neptune, 303.2, 1.0),
        (Body::Pluto, 251.5, 1.0),
    ];
    for (body, longitude, epsilon) in expected {
        assert_longitude_close(chart[body.index()].longitude, longitude, epsilon);
    }

    assert_eq!(chart[Body::Sun.index()].sign, ZodiacSign::Capricorn);
    assert_eq!(chart[Body::Jupiter.index()].sign, ZodiacSign::Aries);
    assert_eq!(chart[Body::Saturn.index()].sign, ZodiacSign::Taurus);
    assert_eq!(chart[Body::Pluto.index()].sign, ZodiacSign::Sagittarius);
}

#[test]
fn test_published_examples() {
    let engine = uncached_engine();

    // Sun, 1992 October 13.0 TD
    let sun = engine
        .calculate_position(Body::Sun, 2_448_908.5, PrecisionLevel::High)
        .unwrap();
    assert_abs_diff_eq!(sun.longitude, 199.906_06, epsilon = 5e-4);
    assert_eq!(sun.sign, ZodiacSign::Libra);

    // Venus, 1992 December 20.0 TD
    let venus = engine
        .calculate_position(Body::Venus, 2_448_976.5, PrecisionLevel::High)
        .unwrap();
    assert_abs_diff_eq!(venus.longitude, 313.081_02, epsilon = 5e-3);
    assert_abs_diff_eq!(venus.latitude, -2.084_74, epsilon = 5e-3);
    assert_abs_diff_eq!(venus.distance, 0.910_947, epsilon = 5e-5);

    // Moon, 1992 April 12.0 TD
    let moon = engine
        .calculate_position(Body::Moon, 2_448_724.5, PrecisionLevel::High)
        .unwrap();
    assert_abs_diff_eq!(moon.longitude, 133.167_265, epsilon = 2e-3);
    assert_eq!(moon.sign, ZodiacSign::Leo);
    assert_eq!(moon.position_in_sign.degrees, 13);
    assert_eq!(moon.quality.method, CalculationMethod::Elp2000);
}

#[test]
fn test_positions_are_consistent() {
    let engine = Orrery::new();
    for jd in [2_415_020.5, 2_433_282.5, 2_460_000.5, 2_488_070.5] {
        let chart = engine.calculate_positions(jd, PrecisionLevel::Medium).unwrap();
        for (position, body) in chart.iter().zip(Body::ALL) {
            assert_eq!(position.body, body);
            assert!((0.0..360.0).contains(&position.longitude));
            assert!((0.0..360.0).contains(&position.right_ascension));
            assert!(position.declination.abs() <= 90.0);
            assert_eq!(position.sign, ZodiacSign::from_longitude(position.longitude));
            assert!(position.position_in_sign.degrees < 30);
            assert!(position.distance > 0.0);
            assert!(!position.is_degraded(), "{body:?} degraded at {jd}");
            assert_eq!(position.reference_frame, "J2000.0->Date");
            assert_eq!(position.coordinate_system, "Apparent Geocentric");
        }
    }
}

#[test]
fn test_light_time_is_configurable() {
    let with = Orrery::new();
    let without = Orrery::with_config(EngineConfig::builder().light_time(false).build().unwrap());

    let a = with
        .calculate_position(Body::Jupiter, J2000_JD, PrecisionLevel::High)
        .unwrap();
    let b = without
        .calculate_position(Body::Jupiter, J2000_JD, PrecisionLevel::High)
        .unwrap();

    assert!(a.corrections.is_applied(CorrectionKind::LightTime));
    assert!(!b.corrections.is_applied(CorrectionKind::LightTime));
    assert!(a.corrections.light_time_days > 0.02);
    // about 0.08°/day of heliocentric motion over ~40 minutes of light-time
    let shift = (a.longitude - b.longitude).abs();
    assert!(shift > 1e-4 && shift < 0.01);
}

#[test]
fn test_repeated_charts_are_bit_identical() {
    let cached = Orrery::new();
    let uncached = uncached_engine();
    let jd = 2_455_197.5;

    let first = cached.calculate_positions(jd, PrecisionLevel::High).unwrap();
    let second = cached.calculate_positions(jd, PrecisionLevel::High).unwrap();
    let fresh = uncached.calculate_positions(jd, PrecisionLevel::High).unwrap();

    for ((a, b), c) in first.iter().zip(&second).zip(&fresh) {
        assert_eq!(a.longitude.to_bits(), b.longitude.to_bits());
        assert_eq!(a.longitude.to_bits(), c.longitude.to_bits());
        assert_eq!(a, c);
    }
    assert_eq!(cached.metrics().cache_hits(), 1);
    assert_eq!(cached.metrics().calculations(), 1);
}

#[test]
fn test_precision_levels_agree() {
    let engine = Orrery::new();
    let jd = 2_446_470.5;
    let high = engine.calculate_positions(jd, PrecisionLevel::High).unwrap();
    let minimal = engine.calculate_positions(jd, PrecisionLevel::Minimal).unwrap();

    for (h, m) in high.iter().zip(&minimal) {
        assert!(m.quality.terms_used <= h.quality.terms_used);
        let tolerance = match h.body {
            Body::Moon => 1.0,
            _ => 0.5,
        };
        assert_longitude_close(m.longitude, h.longitude, tolerance);
    }
}
