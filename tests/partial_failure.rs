mod common;

use orrery::bodies::Body;
use orrery::constants::J2000_JD;
use orrery::diagnostics::{analyze_planetary_accuracy, degraded_bodies, ReferencePosition};
use orrery::metrics::CalculationOutcome;
use orrery::orrery::Orrery;
use orrery::position::{CalculationMethod, FallbackTier};
use orrery::series::vsop87::SeriesBody;
use orrery::series::PrecisionLevel;

use crate::common::{assert_longitude_close, table_with_nan, table_without_latitude, uncached_engine};

#[test]
fn test_corrupt_mars_table_only_flags_mars() {
    let healthy = uncached_engine()
        .calculate_positions(J2000_JD, PrecisionLevel::High)
        .unwrap();
    let engine = Orrery::new().with_series_override(SeriesBody::Mars, table_with_nan(SeriesBody::Mars));
    let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();

    assert_eq!(degraded_bodies(&chart), vec![Body::Mars]);

    let mars = &chart[Body::Mars.index()];
    let info = mars.quality.fallback.as_ref().unwrap();
    assert_eq!(info.tier, FallbackTier::LegacyKeplerian);
    assert!(info.reason.contains("Mars"));
    assert_eq!(mars.quality.method, CalculationMethod::LegacyKeplerian);
    assert!(mars.quality.reduced_precision);
    assert!(!mars.corrections.bypassed);
    assert!(!mars.warnings.is_empty());
    assert_longitude_close(mars.longitude, healthy[Body::Mars.index()].longitude, 0.5);

    for (position, reference) in chart.iter().zip(&healthy) {
        if position.body != Body::Mars {
            assert_eq!(position, reference);
        }
    }
    assert_eq!(engine.metrics().fallbacks(), 1);
}

#[test]
fn test_corrupt_earth_table_degrades_the_sun_only() {
    let healthy = uncached_engine()
        .calculate_positions(J2000_JD, PrecisionLevel::High)
        .unwrap();
    let engine = uncached_engine()
        .with_series_override(SeriesBody::Earth, table_without_latitude(SeriesBody::Earth));
    let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();

    assert_eq!(degraded_bodies(&chart), vec![Body::Sun]);
    let sun = &chart[Body::Sun.index()];
    assert_eq!(
        sun.quality.fallback.as_ref().map(|f| f.tier),
        Some(FallbackTier::LowPrecisionSolar)
    );
    assert_longitude_close(sun.longitude, healthy[Body::Sun.index()].longitude, 0.02);

    // the planets are observed from the mean-element Earth and say so
    for body in [Body::Mercury, Body::Mars, Body::Saturn, Body::Pluto] {
        let p = &chart[body.index()];
        assert!(p.warnings.iter().any(|w| w.contains("Earth position")));
        assert_longitude_close(p.longitude, healthy[body.index()].longitude, 0.1);
    }
    // the Moon does not depend on the Earth's heliocentric position
    assert_eq!(chart[Body::Moon.index()], healthy[Body::Moon.index()]);
}

#[test]
fn test_fallback_chart_is_cached_and_logged() {
    let engine = Orrery::new().with_series_override(SeriesBody::Saturn, table_with_nan(SeriesBody::Saturn));
    let first = engine.calculate_positions(2_452_000.5, PrecisionLevel::Low).unwrap();
    let second = engine.calculate_positions(2_452_000.5, PrecisionLevel::Low).unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.metrics().fallbacks(), 1);
    assert_eq!(engine.metrics().cache_hits(), 1);

    let log = engine.metrics().calculation_log();
    let fallback = log
        .iter()
        .find(|e| e.outcome == CalculationOutcome::Fallback)
        .unwrap();
    assert_eq!(fallback.body, Some(Body::Saturn));
    assert_eq!(fallback.precision, PrecisionLevel::Low);
    assert_eq!(
        log.last().map(|e| e.outcome),
        Some(CalculationOutcome::CacheHit)
    );
}

#[test]
fn test_diagnostics_see_the_degraded_body() {
    let reference: Vec<ReferencePosition> = uncached_engine()
        .calculate_positions(J2000_JD, PrecisionLevel::High)
        .unwrap()
        .iter()
        .map(|p| ReferencePosition::new(p.body, p.longitude))
        .collect();

    let engine = Orrery::new().with_series_override(SeriesBody::Venus, table_with_nan(SeriesBody::Venus));
    let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();
    let report = analyze_planetary_accuracy(&chart, &reference);

    assert_eq!(report.degraded_bodies, vec![Body::Venus]);
    assert!(report.detail(Body::Venus).unwrap().degraded);
    assert_eq!(report.summary.compared, 10);
    assert_eq!(report.summary.worst_body, Some(Body::Venus));
    assert!(report.patterns.is_empty());

    let json = engine.export_diagnostic_data(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["data"]["degradedBodies"][0], "Venus");
    assert_eq!(value["performanceMetrics"]["fallbacks"], 1);
    assert!(value["calculationLog"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["outcome"] == "Fallback" && e["body"] == "Venus"));
}
