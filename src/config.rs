//! # Engine configuration
//!
//! [`EngineConfig`] centralizes the tunable parameters of an
//! [`Orrery`](crate::orrery::Orrery) engine and of the timezone converter it hands out.
//! It is built either with [`EngineConfig::default`] or with the validating fluent
//! builder:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use orrery::config::EngineConfig;
//! use orrery::series::PrecisionLevel;
//!
//! let config = EngineConfig::builder()
//!     .default_precision(PrecisionLevel::Medium)
//!     .cache_ttl(Duration::from_secs(600))
//!     .cache_capacity(512)
//!     .timezone_timeout(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//! ```

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;
use std::time::Duration;

use crate::orrery_errors::OrreryError;
use crate::series::PrecisionLevel;

/// Tunable parameters of the engine.
///
/// Fields
/// -----------------
/// * `default_precision` – precision used by the convenience entry points.
/// * `cache_enabled` – memoize computed charts and bodies.
/// * `cache_ttl` – lifetime of a cache entry.
/// * `cache_capacity` – maximum number of cache entries (charts and single bodies).
/// * `light_time` – iterate the planets' positions at `t − τ`.
/// * `calculation_log_capacity` – number of entries kept in the calculation log,
///   `0` disables the log.
/// * `timezone_timeout` – upper bound on one timezone lookup.
/// * `motion_step_days` – half-width of the central difference used by
///   [`daily_motion`](crate::orrery::Orrery::daily_motion).
///
/// Defaults
/// -----------------
/// * `default_precision`: `High`
/// * `cache_enabled`: true
/// * `cache_ttl`: 1 h
/// * `cache_capacity`: 1024
/// * `light_time`: true
/// * `calculation_log_capacity`: 256
/// * `timezone_timeout`: 5 s
/// * `motion_step_days`: 0.5
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub default_precision: PrecisionLevel,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub light_time: bool,
    pub calculation_log_capacity: usize,
    pub timezone_timeout: Duration,
    pub motion_step_days: f64,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`EngineConfigBuilder`] starting from the defaults.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_precision: PrecisionLevel::High,
            cache_enabled: true,
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: 1024,
            light_time: true,
            calculation_log_capacity: 256,
            timezone_timeout: Duration::from_secs(5),
            motion_step_days: 0.5,
        }
    }
}

/// Builder for [`EngineConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        EngineConfigBuilder {
            config: EngineConfig::default(),
        }
    }

    pub fn default_precision(mut self, v: PrecisionLevel) -> Self {
        self.config.default_precision = v;
        self
    }
    pub fn cache_enabled(mut self, v: bool) -> Self {
        self.config.cache_enabled = v;
        self
    }
    pub fn cache_ttl(mut self, v: Duration) -> Self {
        self.config.cache_ttl = v;
        self
    }
    pub fn cache_capacity(mut self, v: usize) -> Self {
        self.config.cache_capacity = v;
        self
    }
    pub fn light_time(mut self, v: bool) -> Self {
        self.config.light_time = v;
        self
    }
    pub fn calculation_log_capacity(mut self, v: usize) -> Self {
        self.config.calculation_log_capacity = v;
        self
    }
    pub fn timezone_timeout(mut self, v: Duration) -> Self {
        self.config.timezone_timeout = v;
        self
    }
    pub fn motion_step_days(mut self, v: f64) -> Self {
        self.config.motion_step_days = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff a <= b and comparable.
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(std::cmp::Ordering::Less) | Some(Equal))
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * With the cache enabled: `cache_ttl > 0` and `cache_capacity ≥ 1`.
    /// * `timezone_timeout > 0`.
    /// * `0 < motion_step_days ≤ 10`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(EngineConfig)` or [`OrreryError::InvalidEngineParameter`] naming the
    ///   offending field.
    pub fn build(self) -> Result<EngineConfig, OrreryError> {
        let c = &self.config;

        if c.cache_enabled {
            if c.cache_ttl.is_zero() {
                return Err(OrreryError::InvalidEngineParameter(
                    "cache_ttl must be > 0 when the cache is enabled".into(),
                ));
            }
            if c.cache_capacity == 0 {
                return Err(OrreryError::InvalidEngineParameter(
                    "cache_capacity must be >= 1 when the cache is enabled".into(),
                ));
            }
        }
        if c.timezone_timeout.is_zero() {
            return Err(OrreryError::InvalidEngineParameter(
                "timezone_timeout must be > 0".into(),
            ));
        }
        if !(Self::gt0(c.motion_step_days) && Self::le(c.motion_step_days, 10.0)) {
            return Err(OrreryError::InvalidEngineParameter(
                "require 0 < motion_step_days <= 10".into(),
            ));
        }

        Ok(self.config)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Engine configuration")?;
            writeln!(f, "--------------------")?;
            writeln!(f, "  default_precision        = {}", self.default_precision)?;
            writeln!(f, "  cache_enabled            = {}", self.cache_enabled)?;
            writeln!(f, "  cache_ttl                = {:?}", self.cache_ttl)?;
            writeln!(f, "  cache_capacity           = {}", self.cache_capacity)?;
            writeln!(f, "  light_time               = {}", self.light_time)?;
            writeln!(f, "  calculation_log_capacity = {}", self.calculation_log_capacity)?;
            writeln!(f, "  timezone_timeout         = {:?}", self.timezone_timeout)?;
            write!(f, "  motion_step_days         = {}", self.motion_step_days)
        } else {
            write!(
                f,
                "EngineConfig(precision={}, cache={}, ttl={:?}, capacity={}, light_time={})",
                self.default_precision,
                self.cache_enabled,
                self.cache_ttl,
                self.cache_capacity,
                self.light_time
            )
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let built = EngineConfig::builder().build().unwrap();
        assert_eq!(built, EngineConfig::default());
        assert_eq!(built.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(EngineConfig::builder().cache_capacity(0).build().is_err());
        assert!(EngineConfig::builder()
            .cache_ttl(Duration::ZERO)
            .build()
            .is_err());
        assert!(EngineConfig::builder()
            .timezone_timeout(Duration::ZERO)
            .build()
            .is_err());
        assert!(EngineConfig::builder()
            .motion_step_days(f64::NAN)
            .build()
            .is_err());
        assert!(EngineConfig::builder().motion_step_days(11.0).build().is_err());
    }

    #[test]
    fn test_disabled_cache_skips_cache_checks() {
        let config = EngineConfig::builder()
            .cache_enabled(false)
            .cache_capacity(0)
            .build()
            .unwrap();
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_display() {
        let config = EngineConfig::default();
        assert!(config.to_string().starts_with("EngineConfig(precision=high"));
        assert!(format!("{config:#}").contains("motion_step_days         = 0.5"));
    }
}
