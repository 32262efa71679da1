mod common;

use orrery::bodies::Body;
use orrery::constants::J2000_JD;
use orrery::diagnostics::thresholds::{AccuracyTier, MotionClass};
use orrery::diagnostics::{
    analyze_planetary_accuracy, analyze_with_motion, PatternKind, ReferencePosition, Severity,
};
use orrery::series::PrecisionLevel;

use crate::common::uncached_engine;

fn references_at(jd: f64) -> Vec<ReferencePosition> {
    uncached_engine()
        .calculate_positions(jd, PrecisionLevel::High)
        .unwrap()
        .iter()
        .map(|p| ReferencePosition::new(p.body, p.longitude))
        .collect()
}

#[test]
fn test_chart_against_itself_is_excellent() {
    let engine = uncached_engine();
    let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();
    let report = analyze_planetary_accuracy(&chart, &references_at(J2000_JD));

    assert_eq!(report.summary.compared, 10);
    assert_eq!(report.summary.excellent, 10);
    assert!(report.patterns.is_empty());
    assert!(report.recommendations.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(report.worst_severity(), None);
}

#[test]
fn test_one_day_shift_reads_as_time_scale_error() {
    // Computing one day late moves the fast bodies far beyond their bounds while the
    // outer planets barely move.
    let engine = uncached_engine();
    let late = engine
        .calculate_positions(J2000_JD + 1.0, PrecisionLevel::High)
        .unwrap();
    let report = analyze_planetary_accuracy(&late, &references_at(J2000_JD));

    for body in [Body::Sun, Body::Moon, Body::Mercury, Body::Venus, Body::Mars] {
        assert_eq!(report.detail(body).unwrap().tier, AccuracyTier::Poor, "{body:?}");
    }
    for body in [Body::Saturn, Body::Neptune, Body::Pluto] {
        assert_ne!(report.detail(body).unwrap().tier, AccuracyTier::Poor, "{body:?}");
    }

    assert!(report.has_pattern(PatternKind::SystematicOffset));
    assert!(report.has_pattern(PatternKind::InnerPlanetIssues));
    assert!(report.has_pattern(PatternKind::SunPositionError));
    assert!(report.has_pattern(PatternKind::MoonPositionError));
    assert!(!report.has_pattern(PatternKind::OuterPlanetIssues));
    assert!(!report.has_pattern(PatternKind::CoordinateSystemError));
    assert_eq!(report.worst_severity(), Some(Severity::High));
    assert_eq!(report.summary.worst_body, Some(Body::Moon));
    assert!(report.detail(Body::Moon).unwrap().signed_error > 10.0);
    assert!(report.recommendations.iter().any(|r| r.contains("UT versus TT")));
}

#[test]
fn test_mars_retrograde_in_august_2003() {
    let jd = 2_452_879.5;
    let engine = uncached_engine();
    let chart = engine.calculate_positions(jd, PrecisionLevel::High).unwrap();
    let motions = engine.chart_motions(jd, PrecisionLevel::High).unwrap();
    let report = analyze_with_motion(&chart, &references_at(jd), &motions);

    let mars = report.detail(Body::Mars).unwrap().motion.unwrap();
    assert_eq!(mars.class, MotionClass::Retrograde);
    assert!(mars.daily_motion < -0.2 && mars.daily_motion > -0.35);

    let venus = report.detail(Body::Venus).unwrap().motion.unwrap();
    assert!(venus.daily_motion > 1.1);
    assert!(report
        .details
        .iter()
        .all(|detail| detail.motion.is_some()));
}
