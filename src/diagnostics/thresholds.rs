//! Per-body classification tables.
//!
//! Accuracy tiers are bounded in arc-minutes (inclusive upper bounds), motion classes in
//! degrees per day. Outer bodies get looser accuracy bounds because both the theories
//! and the published reference ephemerides are coarser there.

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::constants::{ArcMin, Degree};

/// Accuracy grade of one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccuracyTier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

/// Upper bounds, in arc-minutes, of the first three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyThresholds {
    pub excellent: ArcMin,
    pub good: ArcMin,
    pub acceptable: ArcMin,
}

impl AccuracyThresholds {
    pub fn for_body(body: Body) -> Self {
        let (excellent, good, acceptable) = match body {
            Body::Sun => (0.5, 1.0, 2.0),
            Body::Moon => (1.0, 2.0, 5.0),
            Body::Mercury | Body::Venus | Body::Mars => (1.0, 3.0, 6.0),
            Body::Jupiter | Body::Saturn => (2.0, 5.0, 10.0),
            Body::Uranus | Body::Neptune => (3.0, 8.0, 15.0),
            Body::Pluto => (5.0, 15.0, 30.0),
        };
        AccuracyThresholds {
            excellent,
            good,
            acceptable,
        }
    }

    /// Tier of an absolute error. A non-finite error is `Poor`.
    pub fn classify(&self, error: ArcMin) -> AccuracyTier {
        if !error.is_finite() {
            AccuracyTier::Poor
        } else if error <= self.excellent {
            AccuracyTier::Excellent
        } else if error <= self.good {
            AccuracyTier::Good
        } else if error <= self.acceptable {
            AccuracyTier::Acceptable
        } else {
            AccuracyTier::Poor
        }
    }
}

/// Apparent motion of a body over one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionClass {
    Retrograde,
    Stationary,
    Fast,
    Slow,
    Normal,
}

/// Typical daily motion range of a body, degrees per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionThresholds {
    /// Below this absolute speed the body is stationary
    pub stationary: Degree,
    /// Direct motion below this is slow
    pub slow: Degree,
    /// Direct motion above this is fast
    pub fast: Degree,
}

impl MotionThresholds {
    pub fn for_body(body: Body) -> Self {
        let (stationary, slow, fast) = match body {
            Body::Sun => (0.0, 0.955, 1.018),
            Body::Moon => (0.0, 12.0, 15.0),
            Body::Mercury => (0.1, 0.8, 1.9),
            Body::Venus => (0.05, 0.9, 1.22),
            Body::Mars => (0.03, 0.4, 0.75),
            Body::Jupiter => (0.01, 0.1, 0.23),
            Body::Saturn => (0.005, 0.05, 0.12),
            Body::Uranus => (0.003, 0.03, 0.06),
            Body::Neptune => (0.002, 0.02, 0.036),
            Body::Pluto => (0.002, 0.015, 0.035),
        };
        MotionThresholds {
            stationary,
            slow,
            fast,
        }
    }

    /// Classify a signed daily motion.
    ///
    /// Stationary wins over the sign, so a planet turning around is never reported as
    /// retrograde while it barely moves.
    pub fn classify(&self, daily_motion: Degree) -> MotionClass {
        if daily_motion.abs() < self.stationary {
            MotionClass::Stationary
        } else if daily_motion < 0.0 {
            MotionClass::Retrograde
        } else if daily_motion > self.fast {
            MotionClass::Fast
        } else if daily_motion < self.slow {
            MotionClass::Slow
        } else {
            MotionClass::Normal
        }
    }
}

#[cfg(test)]
mod thresholds_test {
    use super::*;

    #[test]
    fn test_sun_tiers() {
        let sun = AccuracyThresholds::for_body(Body::Sun);
        assert_eq!(sun.classify(0.3), AccuracyTier::Excellent);
        assert_eq!(sun.classify(0.5), AccuracyTier::Excellent);
        assert_eq!(sun.classify(0.8), AccuracyTier::Good);
        assert_eq!(sun.classify(1.5), AccuracyTier::Acceptable);
        assert_eq!(sun.classify(2.01), AccuracyTier::Poor);
        assert_eq!(sun.classify(f64::NAN), AccuracyTier::Poor);
    }

    #[test]
    fn test_outer_bodies_are_looser() {
        for body in Body::ALL {
            let t = AccuracyThresholds::for_body(body);
            assert!(t.excellent < t.good && t.good < t.acceptable);
        }
        assert_eq!(
            AccuracyThresholds::for_body(Body::Pluto).classify(20.0),
            AccuracyTier::Acceptable
        );
        assert_eq!(
            AccuracyThresholds::for_body(Body::Mars).classify(20.0),
            AccuracyTier::Poor
        );
    }

    #[test]
    fn test_motion_classes() {
        let mercury = MotionThresholds::for_body(Body::Mercury);
        assert_eq!(mercury.classify(-0.5), MotionClass::Retrograde);
        assert_eq!(mercury.classify(-0.05), MotionClass::Stationary);
        assert_eq!(mercury.classify(2.0), MotionClass::Fast);
        assert_eq!(mercury.classify(0.5), MotionClass::Slow);
        assert_eq!(mercury.classify(1.2), MotionClass::Normal);

        let moon = MotionThresholds::for_body(Body::Moon);
        assert_eq!(moon.classify(13.2), MotionClass::Normal);
        assert_eq!(moon.classify(0.0), MotionClass::Slow);
    }
}
