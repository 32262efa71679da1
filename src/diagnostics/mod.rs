//! # Accuracy diagnostics
//!
//! Rule-based comparison of computed [`PlanetPosition`]s against reference longitudes
//! (typically a published ephemeris or JPL Horizons output).
//!
//! The analysis runs in four steps:
//!
//! 1. the absolute angular difference of each body, in arc-minutes, is graded against the
//!    per-body [`AccuracyThresholds`],
//! 2. when daily motions are supplied, each body's motion is classified with
//!    [`MotionThresholds`],
//! 3. independent pattern rules look for error structures that point at a common cause
//!    (a time-scale offset, a wrong Earth position, a frame mix-up, …),
//! 4. each detected pattern contributes a fixed checklist of recommendations, merged in
//!    detection order without duplicates.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orrery::bodies::Body;
//! use orrery::diagnostics::{analyze_planetary_accuracy, ReferencePosition};
//! use orrery::orrery::Orrery;
//! use orrery::series::PrecisionLevel;
//!
//! let engine = Orrery::new();
//! let chart = engine.calculate_positions(2_451_545.0, PrecisionLevel::High).unwrap();
//! let reference = [ReferencePosition::new(Body::Sun, 280.3689)];
//! let report = analyze_planetary_accuracy(&chart, &reference);
//! println!("{}", report.summary);
//! ```

pub mod export;
pub mod thresholds;

use std::collections::BTreeMap;
use std::fmt;

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::angles::{angular_separation, signed_degrees};
use crate::bodies::Body;
use crate::constants::{ArcMin, Degree, ARCMIN_PER_DEGREE};
use crate::position::PlanetPosition;

pub use export::{export_diagnostic_data, DiagnosticExport, EXPORT_VERSION};
pub use thresholds::{AccuracyThresholds, AccuracyTier, MotionClass, MotionThresholds};

/// Mean signed error above which the whole chart is considered shifted, degrees.
pub const SYSTEMATIC_OFFSET_LIMIT: Degree = 1.0;

/// Bodies checked by [`PatternKind::InnerPlanetIssues`].
pub const INNER_GROUP: [Body; 3] = [Body::Mercury, Body::Venus, Body::Mars];

/// Number of poor inner bodies that triggers [`PatternKind::InnerPlanetIssues`].
pub const INNER_POOR_TRIGGER: usize = 2;

/// Number of poor outer bodies that triggers [`PatternKind::OuterPlanetIssues`].
pub const OUTER_POOR_TRIGGER: usize = 3;

/// Reference longitude of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePosition {
    pub body: Body,
    /// Apparent ecliptic longitude of date, degrees
    pub longitude: Degree,
}

impl ReferencePosition {
    pub fn new(body: Body, longitude: Degree) -> Self {
        ReferencePosition { body, longitude }
    }
}

/// Motion of one body and its class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionAnalysis {
    /// Signed daily motion in longitude, degrees per day
    pub daily_motion: Degree,
    pub class: MotionClass,
}

/// Comparison of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAccuracy {
    pub body: Body,
    pub computed_longitude: Degree,
    pub expected_longitude: Degree,
    /// Absolute angular difference, arc-minutes
    pub error_arcmin: ArcMin,
    /// Computed minus expected, degrees in `(-180, 180]`
    pub signed_error: Degree,
    pub tier: AccuracyTier,
    pub thresholds: AccuracyThresholds,
    pub motion: Option<MotionAnalysis>,
    /// The computed position came from a fallback or bypassed the transform
    pub degraded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
}

/// Error structures recognized by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    SystematicOffset,
    InnerPlanetIssues,
    OuterPlanetIssues,
    CoordinateSystemError,
    SunPositionError,
    MoonPositionError,
}

impl PatternKind {
    pub fn severity(self) -> Severity {
        match self {
            PatternKind::CoordinateSystemError => Severity::Critical,
            PatternKind::OuterPlanetIssues => Severity::Medium,
            PatternKind::SystematicOffset
            | PatternKind::InnerPlanetIssues
            | PatternKind::SunPositionError
            | PatternKind::MoonPositionError => Severity::High,
        }
    }

    /// Checklist attached to the pattern, most likely cause first.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            PatternKind::SystematicOffset => &[
                CHECK_TIME_SCALE,
                CHECK_APPARENT_CORRECTIONS,
                CHECK_REFERENCE_FRAME,
            ],
            PatternKind::InnerPlanetIssues => &[
                CHECK_EARTH_POSITION,
                "Check the light-time iteration of the inner planets",
                "Verify the Mercury, Venus and Mars series tables",
            ],
            PatternKind::OuterPlanetIssues => &[
                "Raise the precision level to keep more series terms",
                "Verify the Jupiter to Neptune series tables",
                "Check Pluto's mean elements and Neptune resonance term",
            ],
            PatternKind::CoordinateSystemError => &[
                CHECK_REFERENCE_FRAME,
                CHECK_TIME_SCALE,
                "Check the obliquity used for the ecliptic to equatorial rotation",
            ],
            PatternKind::SunPositionError => &[CHECK_EARTH_POSITION, CHECK_APPARENT_CORRECTIONS],
            PatternKind::MoonPositionError => &[
                "Verify the lunar series tables",
                "Check the lunar light-time and nutation corrections",
                CHECK_TIME_SCALE,
            ],
        }
    }
}

const CHECK_TIME_SCALE: &str = "Verify the Julian Day and its time scale (UT versus TT)";
const CHECK_APPARENT_CORRECTIONS: &str =
    "Check that nutation and aberration are applied the same way as in the reference";
const CHECK_REFERENCE_FRAME: &str =
    "Compare reference frames: true equinox of date versus J2000.0";
const CHECK_EARTH_POSITION: &str =
    "Verify the Earth's heliocentric position used for the geocentric transform";

/// A detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub kind: PatternKind,
    pub severity: Severity,
    pub bodies: Vec<Body>,
    pub description: String,
}

impl Pattern {
    fn new(kind: PatternKind, bodies: Vec<Body>, description: String) -> Self {
        Pattern {
            kind,
            severity: kind.severity(),
            bodies,
            description,
        }
    }
}

/// Aggregate figures over the compared bodies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracySummary {
    pub compared: usize,
    pub excellent: usize,
    pub good: usize,
    pub acceptable: usize,
    pub poor: usize,
    pub average_error_arcmin: ArcMin,
    pub min_error_arcmin: ArcMin,
    pub max_error_arcmin: ArcMin,
    pub best_body: Option<Body>,
    pub worst_body: Option<Body>,
}

impl fmt::Display for AccuracySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy over {} bodies", self.compared)?;
        writeln!(
            f,
            "  excellent={} good={} acceptable={} poor={}",
            self.excellent, self.good, self.acceptable, self.poor
        )?;
        write!(
            f,
            "  error avg={:.3}′ min={:.3}′ max={:.3}′",
            self.average_error_arcmin, self.min_error_arcmin, self.max_error_arcmin
        )?;
        if let (Some(best), Some(worst)) = (self.best_body, self.worst_body) {
            write!(f, " (best {best:?}, worst {worst:?})")?;
        }
        Ok(())
    }
}

/// Result of [`analyze_planetary_accuracy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    /// One entry per compared body, in chart order
    pub details: Vec<BodyAccuracy>,
    pub patterns: Vec<Pattern>,
    pub recommendations: Vec<String>,
    pub summary: AccuracySummary,
    /// Computed bodies flagged by a fallback or a transform bypass
    pub degraded_bodies: Vec<Body>,
    /// Bodies present on one side only, or with a non-finite reference
    pub skipped: Vec<Body>,
}

impl AccuracyReport {
    pub fn detail(&self, body: Body) -> Option<&BodyAccuracy> {
        self.details.iter().find(|d| d.body == body)
    }

    pub fn has_pattern(&self, kind: PatternKind) -> bool {
        self.patterns.iter().any(|p| p.kind == kind)
    }

    /// Highest severity among the detected patterns.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.patterns.iter().map(|p| p.severity).min()
    }
}

/// Bodies whose position carries a fallback or transform-bypass flag, in input order.
pub fn degraded_bodies(positions: &[PlanetPosition]) -> Vec<Body> {
    positions
        .iter()
        .filter(|p| p.is_degraded())
        .map(|p| p.body)
        .collect()
}

/// Compare computed positions with reference longitudes.
///
/// Arguments
/// ---------
/// * `computed`: positions returned by the engine, any subset of the ten bodies
/// * `expected`: reference longitudes; bodies missing on either side are skipped
///
/// Return
/// ------
/// * The [`AccuracyReport`]; motion analysis is left empty.
///
/// # See also
/// * [`analyze_with_motion`] – same analysis with daily motions.
pub fn analyze_planetary_accuracy(
    computed: &[PlanetPosition],
    expected: &[ReferencePosition],
) -> AccuracyReport {
    analyze_with_motion(computed, expected, &BTreeMap::new())
}

/// [`analyze_planetary_accuracy`] with per-body signed daily motions (degrees per day),
/// e.g. from [`crate::orrery::Orrery::daily_motion`].
pub fn analyze_with_motion(
    computed: &[PlanetPosition],
    expected: &[ReferencePosition],
    daily_motion: &BTreeMap<Body, Degree>,
) -> AccuracyReport {
    let references: BTreeMap<Body, Degree> =
        expected.iter().map(|r| (r.body, r.longitude)).collect();
    let by_body: BTreeMap<Body, &PlanetPosition> =
        computed.iter().map(|p| (p.body, p)).collect();

    let mut details = Vec::with_capacity(by_body.len());
    let mut skipped = Vec::new();

    for body in Body::ALL {
        match (by_body.get(&body), references.get(&body)) {
            (Some(position), Some(&reference)) if reference.is_finite() => {
                details.push(compare_body(position, reference, daily_motion.get(&body)));
            }
            (None, None) => {}
            _ => skipped.push(body),
        }
    }

    let patterns = detect_patterns(&details);
    let recommendations = patterns
        .iter()
        .flat_map(|p| p.kind.recommendations().iter().copied())
        .unique()
        .map(str::to_string)
        .collect();

    AccuracyReport {
        summary: summarize(&details),
        details,
        patterns,
        recommendations,
        degraded_bodies: degraded_bodies(computed),
        skipped,
    }
}

fn compare_body(
    position: &PlanetPosition,
    reference: Degree,
    daily_motion: Option<&Degree>,
) -> BodyAccuracy {
    let thresholds = AccuracyThresholds::for_body(position.body);
    let error_arcmin = angular_separation(position.longitude, reference) * ARCMIN_PER_DEGREE;
    let motion = daily_motion
        .filter(|m| m.is_finite())
        .map(|&daily_motion| MotionAnalysis {
            daily_motion,
            class: MotionThresholds::for_body(position.body).classify(daily_motion),
        });

    BodyAccuracy {
        body: position.body,
        computed_longitude: position.longitude,
        expected_longitude: reference,
        error_arcmin,
        signed_error: signed_degrees(position.longitude - reference),
        tier: thresholds.classify(error_arcmin),
        thresholds,
        motion,
        degraded: position.is_degraded(),
    }
}

fn poor_bodies<'a>(
    details: &'a [BodyAccuracy],
    group: impl Fn(Body) -> bool + 'a,
) -> impl Iterator<Item = Body> + 'a {
    details
        .iter()
        .filter(move |d| group(d.body) && d.tier == AccuracyTier::Poor)
        .map(|d| d.body)
}

fn detect_patterns(details: &[BodyAccuracy]) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    if details.is_empty() {
        return patterns;
    }

    let mean_signed = details.iter().map(|d| d.signed_error).sum::<f64>() / details.len() as f64;
    if mean_signed.abs() > SYSTEMATIC_OFFSET_LIMIT {
        patterns.push(Pattern::new(
            PatternKind::SystematicOffset,
            details.iter().map(|d| d.body).collect(),
            format!("all bodies shifted by {mean_signed:+.3}° on average"),
        ));
    }

    let inner: Vec<Body> = poor_bodies(details, |b| INNER_GROUP.contains(&b)).collect();
    if inner.len() >= INNER_POOR_TRIGGER {
        patterns.push(Pattern::new(
            PatternKind::InnerPlanetIssues,
            inner.clone(),
            format!("{} of the inner planets are poor", inner.len()),
        ));
    }

    let outer: Vec<Body> = poor_bodies(details, Body::is_outer_planet).collect();
    if outer.len() >= OUTER_POOR_TRIGGER {
        patterns.push(Pattern::new(
            PatternKind::OuterPlanetIssues,
            outer.clone(),
            format!("{} of the outer planets are poor", outer.len()),
        ));
    }

    let poor: Vec<Body> = poor_bodies(details, |_| true).collect();
    if poor.len() * 10 >= details.len() * 7 {
        patterns.push(Pattern::new(
            PatternKind::CoordinateSystemError,
            poor.clone(),
            format!("{} of {} bodies are poor", poor.len(), details.len()),
        ));
    }

    for (body, kind) in [
        (Body::Sun, PatternKind::SunPositionError),
        (Body::Moon, PatternKind::MoonPositionError),
    ] {
        if let Some(d) = details
            .iter()
            .find(|d| d.body == body && d.tier == AccuracyTier::Poor)
        {
            patterns.push(Pattern::new(
                kind,
                vec![body],
                format!("{} is off by {:.2}′", body.name(), d.error_arcmin),
            ));
        }
    }

    patterns
}

fn summarize(details: &[BodyAccuracy]) -> AccuracySummary {
    if details.is_empty() {
        return AccuracySummary::default();
    }

    let counts = details.iter().map(|d| d.tier).counts();
    let count = |tier: AccuracyTier| counts.get(&tier).copied().unwrap_or(0);

    let (best, worst) = match details
        .iter()
        .minmax_by(|a, b| a.error_arcmin.total_cmp(&b.error_arcmin))
    {
        MinMaxResult::NoElements => return AccuracySummary::default(),
        MinMaxResult::OneElement(d) => (d, d),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    AccuracySummary {
        compared: details.len(),
        excellent: count(AccuracyTier::Excellent),
        good: count(AccuracyTier::Good),
        acceptable: count(AccuracyTier::Acceptable),
        poor: count(AccuracyTier::Poor),
        average_error_arcmin: details.iter().map(|d| d.error_arcmin).sum::<f64>()
            / details.len() as f64,
        min_error_arcmin: best.error_arcmin,
        max_error_arcmin: worst.error_arcmin,
        best_body: Some(best.body),
        worst_body: Some(worst.body),
    }
}

#[cfg(test)]
mod diagnostics_test {
    use super::*;
    use crate::coordinates::{ApparentPosition, Corrections};
    use crate::position::{CalculationMethod, FallbackInfo, FallbackTier, PositionQuality};
    use crate::ref_system::EquatorialCoordinates;
    use crate::series::PrecisionLevel;
    use approx::assert_abs_diff_eq;

    fn position(body: Body, longitude: Degree) -> PlanetPosition {
        let apparent = ApparentPosition {
            longitude,
            latitude: 0.0,
            distance: 1.0,
            equatorial: EquatorialCoordinates {
                right_ascension: longitude,
                declination: 0.0,
            },
            corrections: Corrections::default(),
        };
        let quality = PositionQuality::primary(CalculationMethod::Vsop87, PrecisionLevel::High, 1);
        PlanetPosition::from_apparent(body, apparent, quality)
    }

    /// Chart at 10° steps and a reference shifted by `offsets[body]` arc-minutes.
    fn fixture(offsets: &[(Body, ArcMin)]) -> (Vec<PlanetPosition>, Vec<ReferencePosition>) {
        let computed: Vec<_> = Body::ALL
            .iter()
            .map(|&b| position(b, 10.0 * b.index() as f64 + 5.0))
            .collect();
        let expected = computed
            .iter()
            .map(|p| {
                let off = offsets
                    .iter()
                    .find(|(b, _)| *b == p.body)
                    .map_or(0.0, |(_, o)| *o);
                ReferencePosition::new(p.body, p.longitude + off / ARCMIN_PER_DEGREE)
            })
            .collect();
        (computed, expected)
    }

    #[test]
    fn test_sun_tiers_from_offsets() {
        for (offset, tier) in [
            (0.3, AccuracyTier::Excellent),
            (1.5, AccuracyTier::Acceptable),
            (2.5, AccuracyTier::Poor),
        ] {
            let (computed, expected) = fixture(&[(Body::Sun, offset)]);
            let report = analyze_planetary_accuracy(&computed, &expected);
            let sun = report.detail(Body::Sun).unwrap();
            assert_abs_diff_eq!(sun.error_arcmin, offset, epsilon = 1e-9);
            assert_eq!(sun.tier, tier);
        }
    }

    #[test]
    fn test_error_wraps_around_zero() {
        let computed = vec![position(Body::Mars, 359.99)];
        let expected = [ReferencePosition::new(Body::Mars, 0.01)];
        let report = analyze_planetary_accuracy(&computed, &expected);
        let mars = report.detail(Body::Mars).unwrap();
        assert_abs_diff_eq!(mars.error_arcmin, 1.2, epsilon = 1e-9);
        assert_abs_diff_eq!(mars.signed_error, -0.02, epsilon = 1e-9);
        assert_eq!(mars.tier, AccuracyTier::Good);
    }

    #[test]
    fn test_inner_planet_issues() {
        let (computed, expected) = fixture(&[(Body::Mercury, 10.0), (Body::Venus, 12.0)]);
        let report = analyze_planetary_accuracy(&computed, &expected);

        assert_eq!(report.patterns.len(), 1);
        let pattern = &report.patterns[0];
        assert_eq!(pattern.kind, PatternKind::InnerPlanetIssues);
        assert_eq!(pattern.severity, Severity::High);
        assert_eq!(pattern.bodies, vec![Body::Mercury, Body::Venus]);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.summary.poor, 2);
        assert_eq!(report.summary.worst_body, Some(Body::Venus));
    }

    #[test]
    fn test_outer_planet_issues_need_three() {
        let two = fixture(&[(Body::Jupiter, 20.0), (Body::Saturn, 20.0)]);
        assert!(analyze_planetary_accuracy(&two.0, &two.1).patterns.is_empty());

        let three = fixture(&[
            (Body::Jupiter, 20.0),
            (Body::Saturn, 20.0),
            (Body::Pluto, 40.0),
        ]);
        let report = analyze_planetary_accuracy(&three.0, &three.1);
        assert!(report.has_pattern(PatternKind::OuterPlanetIssues));
        assert_eq!(report.worst_severity(), Some(Severity::Medium));
    }

    #[test]
    fn test_systematic_offset_and_frame_error() {
        let offsets: Vec<_> = Body::ALL.iter().map(|&b| (b, 90.0)).collect();
        let (computed, expected) = fixture(&offsets);
        let report = analyze_planetary_accuracy(&computed, &expected);

        let kinds: Vec<_> = report.patterns.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PatternKind::SystematicOffset,
                PatternKind::InnerPlanetIssues,
                PatternKind::OuterPlanetIssues,
                PatternKind::CoordinateSystemError,
                PatternKind::SunPositionError,
                PatternKind::MoonPositionError,
            ]
        );
        assert_eq!(report.worst_severity(), Some(Severity::Critical));

        // shared checklist items appear once, in first-seen order
        assert_eq!(report.recommendations[0], CHECK_TIME_SCALE);
        let unique = report.recommendations.iter().unique().count();
        assert_eq!(unique, report.recommendations.len());
        assert_eq!(report.recommendations.len(), 12);
    }

    #[test]
    fn test_summary_and_skipped() {
        let (mut computed, mut expected) = fixture(&[(Body::Moon, 3.0)]);
        computed.retain(|p| p.body != Body::Pluto);
        expected.retain(|r| r.body != Body::Neptune);

        let report = analyze_planetary_accuracy(&computed, &expected);
        assert_eq!(report.skipped, vec![Body::Neptune, Body::Pluto]);
        assert_eq!(report.summary.compared, 8);
        assert_eq!(report.summary.acceptable, 1);
        assert_eq!(report.summary.excellent, 7);
        assert_abs_diff_eq!(report.summary.max_error_arcmin, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.summary.average_error_arcmin, 3.0 / 8.0, epsilon = 1e-9);
        assert_eq!(report.summary.worst_body, Some(Body::Moon));
    }

    #[test]
    fn test_motion_analysis() {
        let (computed, expected) = fixture(&[]);
        let motions = BTreeMap::from([(Body::Mercury, -1.1), (Body::Sun, 1.0)]);
        let report = analyze_with_motion(&computed, &expected, &motions);

        let mercury = report.detail(Body::Mercury).unwrap().motion.unwrap();
        assert_eq!(mercury.class, MotionClass::Retrograde);
        let sun = report.detail(Body::Sun).unwrap().motion.unwrap();
        assert_eq!(sun.class, MotionClass::Normal);
        assert!(report.detail(Body::Mars).unwrap().motion.is_none());
    }

    #[test]
    fn test_degraded_bodies() {
        let mut computed: Vec<_> = Body::ALL.iter().map(|&b| position(b, 1.0)).collect();
        computed[Body::Mars.index()].quality = PositionQuality::fallback(
            PrecisionLevel::High,
            FallbackInfo {
                tier: FallbackTier::LegacyKeplerian,
                reason: "corrupt".into(),
            },
        );
        assert_eq!(degraded_bodies(&computed), vec![Body::Mars]);
    }
}
