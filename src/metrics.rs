//! # Performance monitoring
//!
//! Counters and timing statistics owned by one engine instance:
//!
//! * **Counters** – calculations, cache hits/misses, fallbacks, transform bypasses.
//!   Plain atomics, safe to bump from concurrent batch workers.
//! * **Per-operation timings** – count, total, min, max and a smoothed
//!   **exponential moving average** of the duration, updated as
//!   `ema ← α·dt + (1−α)·ema` (the first sample initializes the average).
//! * **Calculation log** – a bounded ring of the most recent operations, exported with
//!   the diagnostic data.
//!
//! [`fmt_duration`] renders durations as `"253µs"`, `"42ms"` or `"3.14s"` for log lines.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::constants::JulianDay;
use crate::series::PrecisionLevel;

/// Default smoothing factor of the moving average.
pub const DEFAULT_EMA_ALPHA: f64 = 0.2;

/// Timing statistics of one named operation, durations in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    pub count: u64,
    pub total_us: f64,
    pub min_us: f64,
    pub max_us: f64,
    pub ema_us: f64,
}

impl OperationStats {
    fn first(sample_us: f64) -> Self {
        OperationStats {
            count: 1,
            total_us: sample_us,
            min_us: sample_us,
            max_us: sample_us,
            ema_us: sample_us,
        }
    }

    fn record(&mut self, sample_us: f64, alpha: f64) {
        self.count += 1;
        self.total_us += sample_us;
        self.min_us = self.min_us.min(sample_us);
        self.max_us = self.max_us.max(sample_us);
        self.ema_us = alpha * sample_us + (1.0 - alpha) * self.ema_us;
    }

    pub fn mean_us(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_us / self.count as f64
        }
    }
}

impl fmt::Display for OperationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} calls, mean {}, ema {}",
            self.count,
            fmt_duration(Duration::from_nanos((self.mean_us() * 1e3) as u64)),
            fmt_duration(Duration::from_nanos((self.ema_us * 1e3) as u64)),
        )
    }
}

/// What happened to one logged calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationOutcome {
    Computed,
    CacheHit,
    Fallback,
    TransformBypassed,
    Failed,
}

/// One entry of the calculation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationLogEntry {
    /// Monotonic sequence number within the engine
    pub sequence: u64,
    pub operation: String,
    pub body: Option<Body>,
    pub julian_day: JulianDay,
    pub precision: PrecisionLevel,
    pub outcome: CalculationOutcome,
    pub duration_us: f64,
    pub message: Option<String>,
}

/// Point-in-time copy of the counters and statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub calculations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
    pub fallbacks: u64,
    pub transform_bypasses: u64,
    pub operations: BTreeMap<String, OperationStats>,
}

/// Counters, timings and calculation log of an engine.
#[derive(Debug)]
pub struct PerformanceMonitor {
    calculations: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    fallbacks: AtomicU64,
    transform_bypasses: AtomicU64,
    sequence: AtomicU64,
    alpha: f64,
    operations: Mutex<BTreeMap<String, OperationStats>>,
    log: Mutex<VecDeque<CalculationLogEntry>>,
    log_capacity: usize,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(256)
    }
}

impl PerformanceMonitor {
    pub fn new(log_capacity: usize) -> Self {
        PerformanceMonitor {
            calculations: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
            transform_bypasses: AtomicU64::new(0),
            sequence: AtomicU64::new(0),
            alpha: DEFAULT_EMA_ALPHA,
            operations: Mutex::new(BTreeMap::new()),
            log: Mutex::new(VecDeque::with_capacity(log_capacity)),
            log_capacity,
        }
    }

    pub fn record_calculation(&self) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transform_bypass(&self) {
        self.transform_bypasses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn calculations(&self) -> u64 {
        self.calculations.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn transform_bypasses(&self) -> u64 {
        self.transform_bypasses.load(Ordering::Relaxed)
    }

    /// Add one duration sample to the statistics of `operation`.
    pub fn record_duration(&self, operation: &str, elapsed: Duration) {
        let sample_us = elapsed.as_secs_f64() * 1e6;
        let mut operations = self.operations.lock().unwrap_or_else(|e| e.into_inner());
        match operations.get_mut(operation) {
            Some(stats) => stats.record(sample_us, self.alpha),
            None => {
                operations.insert(operation.to_string(), OperationStats::first(sample_us));
            }
        }
    }

    /// Start timing `operation`; the sample is recorded by [`OperationTimer::finish`].
    pub fn start<'a>(&'a self, operation: &'a str) -> OperationTimer<'a> {
        OperationTimer {
            monitor: self,
            operation,
            start: Instant::now(),
        }
    }

    /// Append an entry to the calculation log, dropping the oldest beyond capacity.
    #[allow(clippy::too_many_arguments)]
    pub fn log_calculation(
        &self,
        operation: &str,
        body: Option<Body>,
        julian_day: JulianDay,
        precision: PrecisionLevel,
        outcome: CalculationOutcome,
        elapsed: Duration,
        message: Option<String>,
    ) {
        if self.log_capacity == 0 {
            return;
        }
        let entry = CalculationLogEntry {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            operation: operation.to_string(),
            body,
            julian_day,
            precision,
            outcome,
            duration_us: elapsed.as_secs_f64() * 1e6,
            message,
        };
        let mut log = self.log.lock().unwrap_or_else(|e| e.into_inner());
        while log.len() >= self.log_capacity {
            log.pop_front();
        }
        log.push_back(entry);
    }

    /// Copy of the calculation log, oldest first.
    pub fn calculation_log(&self) -> Vec<CalculationLogEntry> {
        let log = self.log.lock().unwrap_or_else(|e| e.into_inner());
        log.iter().cloned().collect()
    }

    pub fn operation_stats(&self, operation: &str) -> Option<OperationStats> {
        let operations = self.operations.lock().unwrap_or_else(|e| e.into_inner());
        operations.get(operation).cloned()
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let lookups = hits + misses;
        PerformanceSnapshot {
            calculations: self.calculations(),
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
            fallbacks: self.fallbacks(),
            transform_bypasses: self.transform_bypasses(),
            operations: self
                .operations
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        }
    }

    /// Reset counters, statistics and log.
    pub fn reset(&self) {
        for counter in [
            &self.calculations,
            &self.cache_hits,
            &self.cache_misses,
            &self.fallbacks,
            &self.transform_bypasses,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Running timer of one operation.
pub struct OperationTimer<'a> {
    monitor: &'a PerformanceMonitor,
    operation: &'a str,
    start: Instant,
}

impl OperationTimer<'_> {
    /// Record the elapsed time and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.monitor.record_duration(self.operation, elapsed);
        elapsed
    }
}

/// Human-readable duration: microseconds below 1 ms, milliseconds below 1 s.
#[inline]
pub fn fmt_duration(d: Duration) -> String {
    let us = d.as_micros();
    if us < 1_000 {
        format!("{us}µs")
    } else {
        let ms = d.as_millis();
        if ms < 1_000 {
            format!("{ms}ms")
        } else {
            format!("{:.2}s", d.as_secs_f32())
        }
    }
}

#[cfg(test)]
mod metrics_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ema_update() {
        let monitor = PerformanceMonitor::new(4);
        monitor.record_duration("op", Duration::from_micros(100));
        monitor.record_duration("op", Duration::from_micros(200));
        let stats = monitor.operation_stats("op").unwrap();
        assert_eq!(stats.count, 2);
        assert_relative_eq!(stats.ema_us, 0.2 * 200.0 + 0.8 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(stats.mean_us(), 150.0, epsilon = 1e-9);
        assert_relative_eq!(stats.min_us, 100.0, epsilon = 1e-9);
        assert_relative_eq!(stats.max_us, 200.0, epsilon = 1e-9);
        assert!(monitor.operation_stats("other").is_none());
    }

    #[test]
    fn test_counters_and_hit_rate() {
        let monitor = PerformanceMonitor::default();
        assert_eq!(monitor.snapshot().cache_hit_rate, 0.0);
        monitor.record_cache_miss();
        monitor.record_cache_hit();
        monitor.record_cache_hit();
        monitor.record_cache_hit();
        monitor.record_fallback();
        let snap = monitor.snapshot();
        assert_eq!(snap.cache_hits, 3);
        assert_eq!(snap.fallbacks, 1);
        assert_relative_eq!(snap.cache_hit_rate, 0.75);

        monitor.reset();
        assert_eq!(monitor.snapshot().cache_hits, 0);
    }

    #[test]
    fn test_log_is_bounded() {
        let monitor = PerformanceMonitor::new(3);
        for i in 0..5 {
            monitor.log_calculation(
                "calculate_positions",
                None,
                2_451_545.0 + i as f64,
                PrecisionLevel::High,
                CalculationOutcome::Computed,
                Duration::from_micros(10),
                None,
            );
        }
        let log = monitor.calculation_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].sequence, 2);
        assert_eq!(log[2].julian_day, 2_451_549.0);
    }

    #[test]
    fn test_fmt_duration() {
        assert_eq!(fmt_duration(Duration::from_micros(253)), "253µs");
        assert_eq!(fmt_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(fmt_duration(Duration::from_millis(3140)), "3.14s");
    }
}
