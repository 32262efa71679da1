//! # Orrery: the planetary position engine
//!
//! [`Orrery`] is the façade that wires the theories and the apparent-place pipeline
//! together and owns the long-lived state of a calculation session:
//!
//! 1. **Series tables**: the VSOP87 tables of the eight series bodies and the lunar
//!    tables, validated once on first use through [`OnceCell`] and optionally overridden
//!    per body.
//! 2. **Position cache**: a [`PositionCache`] keyed by `(body, Julian Day, precision)`
//!    holding full charts and single bodies.
//! 3. **Performance monitor**: counters, timing statistics and the bounded calculation
//!    log ([`PerformanceMonitor`]).
//!
//! ## Dispatch
//!
//! | Body                 | Primary theory                       | Fallback                       |
//! |----------------------|--------------------------------------|--------------------------------|
//! | Sun                  | VSOP87 Earth, reversed               | low-accuracy solar theory      |
//! | Moon                 | ELP2000 periodic series              | equation of the centre         |
//! | Mercury … Neptune    | VSOP87 with light-time iteration     | Keplerian mean elements        |
//! | Pluto                | mean elements + Neptune resonance    | Keplerian mean elements        |
//!
//! A body whose primary theory fails is computed by its fallback and tagged with a
//! [`FallbackInfo`]; a body whose apparent-place transform fails is returned with its
//! geometric coordinates and `corrections.bypassed = true`. Neither aborts the other
//! bodies of the chart: for a valid Julian Day a full chart is always produced.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use orrery::orrery::Orrery;
//! use orrery::series::PrecisionLevel;
//!
//! let engine = Orrery::new();
//! let chart = engine.calculate_positions(2_451_545.0, PrecisionLevel::High).unwrap();
//! for p in &chart {
//!     println!("{:<8} {:>10.5}° {} {}", p.body.name(), p.longitude, p.sign.name(), p.position_in_sign);
//! }
//! ```
//!
//! ## See also
//! ------------
//! * [`EngineConfig`] – tunable parameters.
//! * [`CoordinateTransformer`] – apparent-place pipeline.
//! * [`crate::diagnostics`] – comparison against reference positions.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hifitime::Epoch;
use nalgebra::Vector3;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, warn};

use crate::angles::signed_degrees;
use crate::bodies::Body;
use crate::cache::{CacheKey, Clock, PositionCache, SystemClock};
use crate::config::EngineConfig;
use crate::constants::{AstronomicalUnit, Degree, JulianDay, AU, MAX_JULIAN_DAY, MIN_JULIAN_DAY};
use crate::coordinates::{CoordinateTransformer, FrameOfDate, GeometricPosition};
use crate::diagnostics::export_diagnostic_data;
use crate::kepler::{heliocentric_of_date, low_accuracy_sun, pluto_heliocentric, KeplerBody};
use crate::lunar::{LunarPosition, LunarTables, LunarTheoryEngine};
use crate::metrics::{CalculationOutcome, PerformanceMonitor};
use crate::orrery_errors::OrreryError;
use crate::position::{
    CalculationMethod, FallbackInfo, FallbackTier, PlanetPosition, PositionQuality,
};
use crate::ref_system::spherical_to_cartesian;
use crate::series::vsop87::SeriesBody;
use crate::series::{HeliocentricPosition, PrecisionLevel, SeriesEvaluator, SeriesTable};
use crate::time::{julian_centuries, julian_millennia, validate_julian_day};
use crate::timezone::{RegionTableLookup, TimezoneAwareConverter, TimezoneLookup};

/// Apparent positions of the ten bodies, in [`Body::ALL`] order.
pub type Chart = [PlanetPosition; 10];

/// Earth from the barycenter elements, or the reversed low-accuracy Sun when those fail.
fn earth_from_elements(
    barycenter: Result<Vector3<f64>, OrreryError>,
    jd: JulianDay,
) -> Vector3<f64> {
    barycenter.unwrap_or_else(|e| {
        warn!(error = %e, jd, "Earth-Moon barycenter elements failed, using the low-accuracy Sun");
        let sun = low_accuracy_sun(julian_centuries(jd));
        spherical_to_cartesian(sun.true_longitude + 180.0, 0.0, sun.radius)
    })
}

/// Outcome of loading a table: the usable table, or why it was rejected.
type TableState<T> = Result<T, String>;

/// Geometric input of the apparent-place pipeline, per kind of body.
#[derive(Debug, Clone, Copy)]
enum RawPosition {
    /// Heliocentric coordinates of the Earth, of date
    Sun {
        earth_longitude: Degree,
        earth_latitude: Degree,
        radius: AstronomicalUnit,
    },
    Moon(LunarPosition),
    Planet(GeometricPosition),
}

impl RawPosition {
    /// Geometric geocentric longitude, latitude and distance (AU).
    fn geocentric(&self) -> (Degree, Degree, AstronomicalUnit) {
        match self {
            RawPosition::Sun {
                earth_longitude,
                earth_latitude,
                radius,
            } => (earth_longitude + 180.0, -earth_latitude, *radius),
            RawPosition::Moon(moon) => (
                moon.longitude,
                moon.latitude,
                moon.distance_km / AU,
            ),
            RawPosition::Planet(g) => (g.longitude, g.latitude, g.distance),
        }
    }
}

/// Heliocentric Earth used as the observer of every body but the Moon.
#[derive(Debug, Clone)]
struct EarthState {
    vector: Vector3<f64>,
    /// VSOP87 coordinates, or why the series could not be used
    series: TableState<HeliocentricPosition>,
}

/// Quantities shared by all bodies of one chart.
#[derive(Debug, Clone)]
struct ChartContext {
    jd: JulianDay,
    precision: PrecisionLevel,
    transformer: CoordinateTransformer,
    frame: FrameOfDate,
    earth: EarthState,
}

/// Planetary position engine.
#[derive(Debug)]
pub struct Orrery {
    config: EngineConfig,
    cache: Option<PositionCache>,
    monitor: PerformanceMonitor,
    series_overrides: BTreeMap<SeriesBody, SeriesTable>,
    lunar_override: Option<LunarTables>,
    series_tables: OnceCell<BTreeMap<SeriesBody, TableState<SeriesTable>>>,
    lunar_engine: OnceCell<TableState<LunarTheoryEngine>>,
}

impl Default for Orrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Orrery {
    /// Engine with [`EngineConfig::default`].
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Construct an engine whose cache expiry is measured with `clock`.
    ///
    /// Arguments
    /// -----------------
    /// * `config`: validated engine parameters.
    /// * `clock`: time source of the cache, e.g. a [`crate::cache::ManualClock`] in tests.
    ///
    /// Return
    /// ----------
    /// * A new [`Orrery`]. Tables are not loaded until the first calculation.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = config
            .cache_enabled
            .then(|| PositionCache::new(config.cache_ttl, config.cache_capacity, clock));
        Orrery {
            monitor: PerformanceMonitor::new(config.calculation_log_capacity),
            cache,
            config,
            series_overrides: BTreeMap::new(),
            lunar_override: None,
            series_tables: OnceCell::new(),
            lunar_engine: OnceCell::new(),
        }
    }

    /// Replace the built-in VSOP87 table of one body.
    ///
    /// The table goes through the same validation as the built-in ones; a rejected table
    /// sends the body to its fallback theory. Previously cached positions are dropped.
    pub fn with_series_override(mut self, body: SeriesBody, table: SeriesTable) -> Self {
        self.series_overrides.insert(body, table);
        self.series_tables = OnceCell::new();
        self.drop_cached_positions();
        self
    }

    /// Replace the built-in lunar tables.
    pub fn with_lunar_tables(mut self, tables: LunarTables) -> Self {
        self.lunar_override = Some(tables);
        self.lunar_engine = OnceCell::new();
        self.drop_cached_positions();
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters, statistics and calculation log of this engine.
    pub fn metrics(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// Drop every cached chart and body.
    pub fn clear_cache(&self) -> Result<(), OrreryError> {
        match &self.cache {
            Some(cache) => cache.clear(),
            None => Ok(()),
        }
    }

    /// Number of cached entries, `0` when the cache is disabled.
    pub fn cached_entries(&self) -> Result<usize, OrreryError> {
        match &self.cache {
            Some(cache) => cache.len(),
            None => Ok(0),
        }
    }

    fn drop_cached_positions(&self) {
        if let Err(e) = self.clear_cache() {
            warn!(error = %e, "could not clear the position cache");
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Tables
    // ---------------------------------------------------------------------------------------------

    fn series_table(&self, body: SeriesBody) -> Result<&SeriesTable, OrreryError> {
        let tables = self.series_tables.get_or_init(|| {
            SeriesBody::ALL
                .iter()
                .map(|&b| {
                    let table = self
                        .series_overrides
                        .get(&b)
                        .cloned()
                        .unwrap_or_else(|| b.table());
                    let state = match table.validate() {
                        Ok(()) => Ok(table),
                        Err(e) => {
                            warn!(table = b.name(), error = %e, "series table rejected");
                            Err(e.to_string())
                        }
                    };
                    (b, state)
                })
                .collect()
        });

        match tables.get(&body) {
            Some(Ok(table)) => Ok(table),
            Some(Err(reason)) => Err(OrreryError::SeriesEvaluation {
                series: body.name().to_string(),
                reason: reason.clone(),
            }),
            None => Err(OrreryError::SeriesEvaluation {
                series: body.name().to_string(),
                reason: "no table loaded".into(),
            }),
        }
    }

    fn lunar_engine(&self) -> Result<&LunarTheoryEngine, OrreryError> {
        self.lunar_engine
            .get_or_init(|| {
                let tables = self.lunar_override.clone().unwrap_or_default();
                match tables.validate() {
                    Ok(()) => Ok(LunarTheoryEngine::with_tables(tables)),
                    Err(e) => {
                        warn!(error = %e, "lunar tables rejected");
                        Err(e.to_string())
                    }
                }
            })
            .as_ref()
            .map_err(|reason| OrreryError::SeriesEvaluation {
                series: Body::Moon.name().to_string(),
                reason: reason.clone(),
            })
    }

    // ---------------------------------------------------------------------------------------------
    // Cache plumbing: cache failures are logged and the calculation goes on without it
    // ---------------------------------------------------------------------------------------------

    fn cache_lookup(&self, key: &CacheKey) -> Option<Arc<Vec<PlanetPosition>>> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(Some(hit)) => {
                self.monitor.record_cache_hit();
                debug!(body = ?key.body, jd = key.julian_day(), precision = %key.precision, "cache hit");
                Some(hit)
            }
            Ok(None) => {
                self.monitor.record_cache_miss();
                None
            }
            Err(e) => {
                warn!(error = %e, "position cache unavailable, computing without it");
                None
            }
        }
    }

    fn cache_store(&self, key: CacheKey, positions: Vec<PlanetPosition>) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.insert(key, positions) {
                warn!(error = %e, "position not cached");
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Calculation
    // ---------------------------------------------------------------------------------------------

    fn context(&self, jd: JulianDay, precision: PrecisionLevel) -> Result<ChartContext, OrreryError> {
        let transformer =
            CoordinateTransformer::new(precision).with_light_time(self.config.light_time);
        let frame = transformer.frame_of_date(jd)?;
        Ok(ChartContext {
            jd,
            precision,
            transformer,
            frame,
            earth: self.earth_state(jd, precision),
        })
    }

    fn earth_state(&self, jd: JulianDay, precision: PrecisionLevel) -> EarthState {
        let series = self
            .series_table(SeriesBody::Earth)
            .and_then(|table| SeriesEvaluator::new(precision).heliocentric(table, julian_millennia(jd)));

        match series {
            Ok(helio) => EarthState {
                vector: spherical_to_cartesian(helio.longitude, helio.latitude, helio.radius),
                series: Ok(helio),
            },
            Err(e) => {
                warn!(error = %e, "Earth series unavailable, using the Earth-Moon barycenter elements");
                let vector = earth_from_elements(
                    heliocentric_of_date(KeplerBody::EarthMoonBarycenter, jd),
                    jd,
                );
                EarthState {
                    vector,
                    series: Err(e.to_string()),
                }
            }
        }
    }

    fn primary_sun(&self, ctx: &ChartContext) -> Result<(RawPosition, PositionQuality), OrreryError> {
        let earth = ctx
            .earth
            .series
            .as_ref()
            .map_err(|reason| OrreryError::SeriesEvaluation {
                series: SeriesBody::Earth.name().to_string(),
                reason: reason.clone(),
            })?;
        Ok((
            RawPosition::Sun {
                earth_longitude: earth.longitude,
                earth_latitude: earth.latitude,
                radius: earth.radius,
            },
            PositionQuality::primary(CalculationMethod::Vsop87, ctx.precision, earth.terms_used),
        ))
    }

    fn primary_moon(&self, ctx: &ChartContext) -> Result<(RawPosition, PositionQuality), OrreryError> {
        let moon = self
            .lunar_engine()?
            .position(&ctx.frame.arguments, ctx.precision)?;
        Ok((
            RawPosition::Moon(moon),
            PositionQuality::primary(CalculationMethod::Elp2000, ctx.precision, moon.terms_used),
        ))
    }

    fn primary_pluto(&self, ctx: &ChartContext) -> Result<(RawPosition, PositionQuality), OrreryError> {
        let geometric = ctx
            .transformer
            .geocentric(&ctx.earth.vector, ctx.jd, pluto_heliocentric)?;
        Ok((
            RawPosition::Planet(geometric),
            PositionQuality::primary(CalculationMethod::KeplerianResonance, ctx.precision, 1),
        ))
    }

    fn primary_planet(
        &self,
        body: Body,
        ctx: &ChartContext,
    ) -> Result<(RawPosition, PositionQuality), OrreryError> {
        let series_body = SeriesBody::for_body(body).ok_or_else(|| OrreryError::SeriesEvaluation {
            series: body.name().to_string(),
            reason: "no VSOP87 series for this body".into(),
        })?;
        let table = self.series_table(series_body)?;
        let evaluator = SeriesEvaluator::new(ctx.precision);

        let mut terms_used = 0;
        let geometric = ctx.transformer.geocentric(&ctx.earth.vector, ctx.jd, |t| {
            let helio = evaluator.heliocentric(table, julian_millennia(t))?;
            terms_used = helio.terms_used;
            Ok(spherical_to_cartesian(helio.longitude, helio.latitude, helio.radius))
        })?;

        Ok((
            RawPosition::Planet(geometric),
            PositionQuality::primary(CalculationMethod::Vsop87, ctx.precision, terms_used),
        ))
    }

    /// Closed-form position used when the primary theory of `body` failed.
    fn legacy(&self, body: Body, ctx: &ChartContext) -> Result<RawPosition, OrreryError> {
        match body {
            Body::Sun => {
                let sun = low_accuracy_sun(ctx.frame.t);
                Ok(RawPosition::Sun {
                    earth_longitude: sun.true_longitude + 180.0,
                    earth_latitude: 0.0,
                    radius: sun.radius,
                })
            }
            Body::Moon => Ok(RawPosition::Moon(LunarTheoryEngine::single_term_position(
                &ctx.frame.arguments,
            ))),
            planet => {
                let kepler = KeplerBody::for_body(planet).ok_or_else(|| {
                    OrreryError::SeriesEvaluation {
                        series: planet.name().to_string(),
                        reason: "no mean elements for this body".into(),
                    }
                })?;
                ctx.transformer
                    .geocentric(&ctx.earth.vector, ctx.jd, |t| heliocentric_of_date(kepler, t))
                    .map(RawPosition::Planet)
            }
        }
    }

    fn fallback_tier(body: Body) -> FallbackTier {
        match body {
            Body::Sun => FallbackTier::LowPrecisionSolar,
            Body::Moon => FallbackTier::SingleTermLunar,
            _ => FallbackTier::LegacyKeplerian,
        }
    }

    /// Compute one body of the chart described by `ctx`. Never fails.
    fn compute_body(&self, body: Body, ctx: &ChartContext) -> PlanetPosition {
        let primary = match body {
            Body::Sun => self.primary_sun(ctx),
            Body::Moon => self.primary_moon(ctx),
            Body::Pluto => self.primary_pluto(ctx),
            planet => self.primary_planet(planet, ctx),
        };

        let (raw, quality) = match primary {
            Ok(found) => found,
            Err(error) => {
                let tier = Self::fallback_tier(body);
                warn!(body = body.name(), error = %error, fallback = ?tier, "primary theory failed");
                self.monitor.record_fallback();
                let info = FallbackInfo {
                    tier,
                    reason: error.to_string(),
                };
                let quality = PositionQuality::fallback(ctx.precision, info);

                match self.legacy(body, ctx) {
                    Ok(raw) => (raw, quality),
                    Err(legacy_error) => {
                        warn!(body = body.name(), error = %legacy_error, "fallback theory failed");
                        self.monitor.record_transform_bypass();
                        let mean = KeplerBody::for_body(body)
                            .map(|k| k.elements().at(ctx.frame.t))
                            .map_or(0.0, |state| state.mean_longitude);
                        return PlanetPosition::from_raw(
                            body,
                            mean,
                            0.0,
                            1.0,
                            quality,
                            &legacy_error.to_string(),
                        )
                        .with_warning(format!("{} reduced to its mean longitude", body.name()));
                    }
                }
            }
        };

        let transformed = match &raw {
            RawPosition::Sun {
                earth_longitude,
                earth_latitude,
                radius,
            } => ctx
                .transformer
                .apparent_sun(&ctx.frame, *earth_longitude, *earth_latitude, *radius),
            RawPosition::Moon(moon) => ctx.transformer.apparent_moon(&ctx.frame, moon),
            RawPosition::Planet(geometric) => ctx.transformer.apparent_planet(&ctx.frame, geometric),
        };

        let mut position = match transformed {
            Ok(apparent) => PlanetPosition::from_apparent(body, apparent, quality),
            Err(error) => {
                warn!(body = body.name(), error = %error, "apparent-place transform bypassed");
                self.monitor.record_transform_bypass();
                let (longitude, latitude, distance) = raw.geocentric();
                PlanetPosition::from_raw(
                    body,
                    longitude,
                    latitude,
                    distance,
                    quality,
                    &error.to_string(),
                )
            }
        };

        if let Some(info) = &position.quality.fallback {
            let warning = format!("computed with the {:?} fallback: {}", info.tier, info.reason);
            position.warnings.push(warning);
        }
        if let (Err(reason), false) = (&ctx.earth.series, matches!(body, Body::Sun | Body::Moon)) {
            position
                .warnings
                .push(format!("Earth position from mean elements: {reason}"));
        }
        position
    }

    fn log_body(&self, position: &PlanetPosition, ctx: &ChartContext, elapsed: Duration) {
        let (outcome, message) = if let Some(info) = &position.quality.fallback {
            (CalculationOutcome::Fallback, Some(info.reason.clone()))
        } else if position.corrections.bypassed {
            (
                CalculationOutcome::TransformBypassed,
                position.warnings.first().cloned(),
            )
        } else {
            return;
        };
        self.monitor.log_calculation(
            "compute_body",
            Some(position.body),
            ctx.jd,
            ctx.precision,
            outcome,
            elapsed,
            message,
        );
    }

    /// Apparent geocentric positions of the ten bodies.
    ///
    /// Arguments
    /// -----------------
    /// * `jd`: Julian Day (dynamical time) in `[2415020.5, 2488070.5]`.
    /// * `precision`: series truncation level.
    ///
    /// Return
    /// ----------
    /// * The [`Chart`] in [`Body::ALL`] order, or [`OrreryError::InvalidJulianDay`].
    ///   Bodies computed by a fallback or with a bypassed transform are flagged on their
    ///   [`PlanetPosition`]; see [`crate::diagnostics::degraded_bodies`].
    ///
    /// See also
    /// ------------
    /// * [`Orrery::calculate_position`] – single body.
    /// * [`Orrery::calculate_batch_positions`] – several instants.
    pub fn calculate_positions(
        &self,
        jd: JulianDay,
        precision: PrecisionLevel,
    ) -> Result<Chart, OrreryError> {
        const OPERATION: &str = "calculate_positions";
        let jd = validate_julian_day(jd)?;
        let timer = self.monitor.start(OPERATION);
        let key = CacheKey::chart(jd, precision);

        if let Some(chart) = self
            .cache_lookup(&key)
            .and_then(|hit| Chart::try_from(hit.to_vec()).ok())
        {
            let elapsed = timer.finish();
            self.monitor.log_calculation(
                OPERATION,
                None,
                jd,
                precision,
                CalculationOutcome::CacheHit,
                elapsed,
                None,
            );
            return Ok(chart);
        }

        self.monitor.record_calculation();
        let ctx = self.context(jd, precision)?;
        let chart: Chart = Body::ALL.map(|body| {
            let started = Instant::now();
            let position = self.compute_body(body, &ctx);
            self.log_body(&position, &ctx, started.elapsed());
            position
        });

        for position in &chart {
            self.cache_store(
                CacheKey::body(position.body, jd, precision),
                vec![position.clone()],
            );
        }
        self.cache_store(key, chart.to_vec());

        let degraded = chart.iter().filter(|p| p.is_degraded()).count();
        let elapsed = timer.finish();
        debug!(jd, precision = %precision, degraded, elapsed_us = elapsed.as_micros() as u64, "chart computed");
        self.monitor.log_calculation(
            OPERATION,
            None,
            jd,
            precision,
            CalculationOutcome::Computed,
            elapsed,
            (degraded > 0).then(|| format!("{degraded} degraded bodies")),
        );
        Ok(chart)
    }

    /// [`Orrery::calculate_positions`] at the configured default precision.
    pub fn calculate_default_positions(&self, jd: JulianDay) -> Result<Chart, OrreryError> {
        self.calculate_positions(jd, self.config.default_precision)
    }

    /// Apparent geocentric position of one body.
    ///
    /// The single-body cache entry is tried first, then a cached chart; a fresh value is
    /// identical to the one a full chart would contain.
    pub fn calculate_position(
        &self,
        body: Body,
        jd: JulianDay,
        precision: PrecisionLevel,
    ) -> Result<PlanetPosition, OrreryError> {
        const OPERATION: &str = "calculate_position";
        let jd = validate_julian_day(jd)?;
        let timer = self.monitor.start(OPERATION);

        let cached = self
            .cache_lookup(&CacheKey::body(body, jd, precision))
            .and_then(|hit| hit.first().cloned())
            .or_else(|| {
                self.cache_lookup(&CacheKey::chart(jd, precision))
                    .and_then(|hit| hit.get(body.index()).cloned())
            });
        if let Some(position) = cached {
            let elapsed = timer.finish();
            self.monitor.log_calculation(
                OPERATION,
                Some(body),
                jd,
                precision,
                CalculationOutcome::CacheHit,
                elapsed,
                None,
            );
            return Ok(position);
        }

        self.monitor.record_calculation();
        let ctx = self.context(jd, precision)?;
        let position = self.compute_body(body, &ctx);
        self.cache_store(CacheKey::body(body, jd, precision), vec![position.clone()]);

        let elapsed = timer.finish();
        self.log_body(&position, &ctx, elapsed);
        Ok(position)
    }

    /// Charts for several instants, in input order. Each instant succeeds or fails on
    /// its own.
    pub fn calculate_batch_positions(
        &self,
        jds: &[JulianDay],
        precision: PrecisionLevel,
    ) -> Vec<Result<Chart, OrreryError>> {
        jds.iter()
            .map(|&jd| self.calculate_positions(jd, precision))
            .collect()
    }

    /// [`Orrery::calculate_batch_positions`] on tokio's blocking pool, one task per
    /// instant, results in input order.
    ///
    /// Dropping the returned future does not cancel the tasks already started; their
    /// charts still land in the cache whole.
    ///
    /// Return
    /// ----------
    /// * One result per instant, or [`OrreryError::BatchWorker`] if a task panicked.
    pub async fn calculate_batch_positions_parallel(
        self: &Arc<Self>,
        jds: Vec<JulianDay>,
        precision: PrecisionLevel,
    ) -> Result<Vec<Result<Chart, OrreryError>>, OrreryError> {
        let handles: Vec<_> = jds
            .into_iter()
            .map(|jd| {
                let engine = Arc::clone(self);
                tokio::task::spawn_blocking(move || engine.calculate_positions(jd, precision))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| OrreryError::BatchWorker(e.to_string()))?;
            results.push(result);
        }
        Ok(results)
    }

    /// Signed change of apparent longitude per day, by central difference over
    /// `± motion_step_days` (one-sided at the ends of the supported range).
    ///
    /// Negative values mean retrograde motion.
    pub fn daily_motion(
        &self,
        body: Body,
        jd: JulianDay,
        precision: PrecisionLevel,
    ) -> Result<Degree, OrreryError> {
        let jd = validate_julian_day(jd)?;
        let step = self.config.motion_step_days;
        let before = (jd - step).max(MIN_JULIAN_DAY);
        let after = (jd + step).min(MAX_JULIAN_DAY);

        let from = self.calculate_position(body, before, precision)?.longitude;
        let to = self.calculate_position(body, after, precision)?.longitude;
        Ok(signed_degrees(to - from) / (after - before))
    }

    /// [`Orrery::daily_motion`] of every body, ready for
    /// [`crate::diagnostics::analyze_with_motion`].
    pub fn chart_motions(
        &self,
        jd: JulianDay,
        precision: PrecisionLevel,
    ) -> Result<BTreeMap<Body, Degree>, OrreryError> {
        Body::ALL
            .iter()
            .map(|&body| Ok((body, self.daily_motion(body, jd, precision)?)))
            .collect()
    }

    // ---------------------------------------------------------------------------------------------
    // Collaborators and export
    // ---------------------------------------------------------------------------------------------

    /// Converter backed by the offline [`RegionTableLookup`], with the configured timeout.
    pub fn timezone_converter(&self) -> TimezoneAwareConverter<RegionTableLookup> {
        TimezoneAwareConverter::default().with_timeout(self.config.timezone_timeout)
    }

    /// Converter backed by a caller-supplied lookup, with the configured timeout.
    pub fn timezone_converter_with<L: TimezoneLookup>(&self, lookup: L) -> TimezoneAwareConverter<L> {
        TimezoneAwareConverter::new(lookup).with_timeout(self.config.timezone_timeout)
    }

    /// JSON export of `data` with this engine's calculation log and metrics, stamped with
    /// the Unix epoch.
    pub fn export_diagnostic_data<T: Serialize>(&self, data: &T) -> Result<String, OrreryError> {
        export_diagnostic_data(data, &self.monitor, None)
    }

    /// [`Orrery::export_diagnostic_data`] stamped with `timestamp`.
    pub fn export_diagnostic_data_at<T: Serialize>(
        &self,
        data: &T,
        timestamp: Epoch,
    ) -> Result<String, OrreryError> {
        export_diagnostic_data(data, &self.monitor, Some(timestamp))
    }
}

#[cfg(test)]
mod orrery_test {
    use super::*;
    use crate::angles::angular_separation;
    use crate::cache::ManualClock;
    use crate::constants::J2000_JD;
    use approx::assert_abs_diff_eq;

    fn engine() -> Orrery {
        Orrery::new()
    }

    #[test]
    fn test_earth_from_elements_falls_back_to_low_accuracy_sun() {
        let jd = J2000_JD;
        let elements = heliocentric_of_date(KeplerBody::EarthMoonBarycenter, jd).unwrap();
        assert_eq!(earth_from_elements(Ok(elements), jd), elements);

        let failed = Err(OrreryError::Transform("diverged".into()));
        let earth = earth_from_elements(failed, jd);
        assert_abs_diff_eq!(earth.norm(), 0.9833, epsilon = 1e-3);
        assert!((earth - elements).norm() < 0.01);
    }

    #[test]
    fn test_rejects_out_of_range_jd() {
        let engine = engine();
        for jd in [MIN_JULIAN_DAY - 1.0, MAX_JULIAN_DAY + 1.0, f64::NAN] {
            assert!(matches!(
                engine.calculate_positions(jd, PrecisionLevel::High),
                Err(OrreryError::InvalidJulianDay(_))
            ));
        }
        assert_eq!(engine.metrics().calculations(), 0);
    }

    #[test]
    fn test_j2000_sun() {
        let engine = engine();
        let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();
        let sun = &chart[Body::Sun.index()];
        assert_eq!(sun.body, Body::Sun);
        assert_abs_diff_eq!(sun.longitude, 280.37, epsilon = 0.01);
        assert!(sun.quality.fallback.is_none());
        assert!(!sun.corrections.bypassed);
        assert!(chart.iter().all(|p| !p.is_degraded()));
        for (p, body) in chart.iter().zip(Body::ALL) {
            assert_eq!(p.body, body);
            assert!((0.0..360.0).contains(&p.longitude));
        }
    }

    #[test]
    fn test_sun_tightens_with_precision() {
        let engine = engine();
        let high = engine
            .calculate_position(Body::Sun, J2000_JD, PrecisionLevel::High)
            .unwrap();
        for (precision, tolerance) in [
            (PrecisionLevel::Medium, 0.01),
            (PrecisionLevel::Low, 0.05),
            (PrecisionLevel::Minimal, 0.15),
        ] {
            let p = engine
                .calculate_position(Body::Sun, J2000_JD, precision)
                .unwrap();
            assert!(angular_separation(p.longitude, high.longitude) < tolerance);
            assert!(p.quality.terms_used <= high.quality.terms_used);
        }
    }

    #[test]
    fn test_second_call_is_a_cache_hit() {
        let engine = engine();
        let first = engine.calculate_positions(2_447_000.5, PrecisionLevel::Medium).unwrap();
        let second = engine.calculate_positions(2_447_000.5, PrecisionLevel::Medium).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.metrics().calculations(), 1);
        assert_eq!(engine.metrics().cache_hits(), 1);

        let moon = engine
            .calculate_position(Body::Moon, 2_447_000.5, PrecisionLevel::Medium)
            .unwrap();
        assert_eq!(moon, first[Body::Moon.index()]);
        assert_eq!(engine.metrics().calculations(), 1);
    }

    #[test]
    fn test_single_body_matches_chart() {
        let cold = Orrery::with_config(
            EngineConfig::builder().cache_enabled(false).build().unwrap(),
        );
        let chart = cold.calculate_positions(2_450_000.5, PrecisionLevel::High).unwrap();
        let mars = cold
            .calculate_position(Body::Mars, 2_450_000.5, PrecisionLevel::High)
            .unwrap();
        assert_eq!(mars, chart[Body::Mars.index()]);
        assert_eq!(cold.metrics().cache_hits() + cold.metrics().cache_misses(), 0);
        assert_eq!(cold.cached_entries().unwrap(), 0);
    }

    #[test]
    fn test_cache_expires() {
        let clock = Arc::new(ManualClock::new());
        let engine = Orrery::with_clock(EngineConfig::default(), clock.clone());
        engine.calculate_positions(J2000_JD, PrecisionLevel::Low).unwrap();
        clock.advance(Duration::from_secs(3601));
        engine.calculate_positions(J2000_JD, PrecisionLevel::Low).unwrap();
        assert_eq!(engine.metrics().calculations(), 2);

        engine.clear_cache().unwrap();
        assert_eq!(engine.cached_entries().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_lunar_tables_use_single_term() {
        let mut tables = LunarTables::default();
        tables.longitude_distance.to_mut()[0][4] = f64::NAN;
        let engine = engine().with_lunar_tables(tables);

        let chart = engine.calculate_positions(J2000_JD, PrecisionLevel::High).unwrap();
        let moon = &chart[Body::Moon.index()];
        let info = moon.quality.fallback.as_ref().unwrap();
        assert_eq!(info.tier, FallbackTier::SingleTermLunar);
        assert_eq!(moon.quality.method, CalculationMethod::SingleTermLunar);
        assert!(!moon.corrections.bypassed);
        assert_eq!(engine.metrics().fallbacks(), 1);
        assert_eq!(
            crate::diagnostics::degraded_bodies(&chart),
            vec![Body::Moon]
        );

        let log = engine.metrics().calculation_log();
        assert!(log
            .iter()
            .any(|e| e.body == Some(Body::Moon) && e.outcome == CalculationOutcome::Fallback));
    }

    #[test]
    fn test_daily_motion() {
        let engine = engine();
        let sun = engine
            .daily_motion(Body::Sun, J2000_JD, PrecisionLevel::Medium)
            .unwrap();
        assert_abs_diff_eq!(sun, 1.019, epsilon = 0.005);
        let moon = engine
            .daily_motion(Body::Moon, J2000_JD, PrecisionLevel::Medium)
            .unwrap();
        assert!((11.5..15.5).contains(&moon));

        // motion at the edge of the range uses a one-sided difference
        assert!(engine
            .daily_motion(Body::Sun, MIN_JULIAN_DAY, PrecisionLevel::Low)
            .is_ok());
    }

    #[tokio::test]
    async fn test_parallel_batch_keeps_order() {
        let engine = Arc::new(engine());
        let jds = vec![2_451_545.0, 2_440_000.5, 2_460_000.5];
        let results = engine
            .calculate_batch_positions_parallel(jds.clone(), PrecisionLevel::Low)
            .await
            .unwrap();
        let sequential = engine.calculate_batch_positions(&jds, PrecisionLevel::Low);

        assert_eq!(results.len(), 3);
        for (parallel, sequential) in results.iter().zip(&sequential) {
            assert_eq!(parallel.as_ref().unwrap(), sequential.as_ref().unwrap());
        }
    }

    #[test]
    fn test_batch_reports_invalid_instants() {
        let engine = engine();
        let results = engine.calculate_batch_positions(&[J2000_JD, 0.0], PrecisionLevel::Minimal);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_validation());
    }

    #[test]
    fn test_converter_uses_configured_timeout() {
        let engine = Orrery::with_config(
            EngineConfig::builder()
                .timezone_timeout(Duration::from_millis(250))
                .build()
                .unwrap(),
        );
        assert_eq!(engine.timezone_converter().timeout(), Duration::from_millis(250));
    }
}
