//! JSON export of diagnostic data together with the engine's calculation log and
//! performance counters.
//!
//! The document layout is
//!
//! ```json
//! {
//!   "timestamp": "1970-01-01T00:00:00Z",
//!   "version": "0.1.0",
//!   "data": { ... },
//!   "calculationLog": [ ... ],
//!   "performanceMetrics": { ... }
//! }
//! ```
//!
//! The timestamp is never read from a clock: callers pass the instant they want recorded,
//! and the Unix epoch is used otherwise so two exports of the same state are identical.

use hifitime::Epoch;
use serde::Serialize;

use crate::metrics::{CalculationLogEntry, PerformanceMonitor, PerformanceSnapshot};
use crate::orrery_errors::OrreryError;
use crate::time::format_iso_utc;

/// Crate version written in every export.
pub const EXPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serialized form of an export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticExport<'a, T: Serialize> {
    pub timestamp: String,
    pub version: &'static str,
    pub data: &'a T,
    pub calculation_log: Vec<CalculationLogEntry>,
    pub performance_metrics: PerformanceSnapshot,
}

impl<'a, T: Serialize> DiagnosticExport<'a, T> {
    /// Capture the monitor's current log and counters around `data`.
    pub fn new(data: &'a T, monitor: &PerformanceMonitor, timestamp: Option<Epoch>) -> Self {
        let timestamp = timestamp.unwrap_or_else(|| Epoch::from_unix_seconds(0.0));
        DiagnosticExport {
            timestamp: format_iso_utc(&timestamp),
            version: EXPORT_VERSION,
            data,
            calculation_log: monitor.calculation_log(),
            performance_metrics: monitor.snapshot(),
        }
    }

    pub fn to_json(&self) -> Result<String, OrreryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Pretty-printed JSON export of `data`.
///
/// See also
/// ------------
/// * [`crate::orrery::Orrery::export_diagnostic_data`] – same export bound to an engine.
pub fn export_diagnostic_data<T: Serialize>(
    data: &T,
    monitor: &PerformanceMonitor,
    timestamp: Option<Epoch>,
) -> Result<String, OrreryError> {
    DiagnosticExport::new(data, monitor, timestamp).to_json()
}

#[cfg(test)]
mod export_test {
    use super::*;
    use crate::metrics::CalculationOutcome;
    use crate::series::PrecisionLevel;
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[test]
    fn test_export_layout() {
        let monitor = PerformanceMonitor::new(4);
        monitor.record_calculation();
        monitor.log_calculation(
            "calculate_positions",
            None,
            2_451_545.0,
            PrecisionLevel::High,
            CalculationOutcome::Computed,
            Duration::from_micros(120),
            None,
        );

        let data = BTreeMap::from([("answer", 42)]);
        let json = export_diagnostic_data(&data, &monitor, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timestamp"], "1970-01-01T00:00:00Z");
        assert_eq!(value["version"], EXPORT_VERSION);
        assert_eq!(value["data"]["answer"], 42);
        assert_eq!(value["calculationLog"].as_array().unwrap().len(), 1);
        assert_eq!(value["performanceMetrics"]["calculations"], 1);
    }

    #[test]
    fn test_export_uses_given_timestamp() {
        let monitor = PerformanceMonitor::default();
        let at = Epoch::from_gregorian_utc_hms(2024, 3, 20, 3, 6, 0);
        let json = export_diagnostic_data(&"payload", &monitor, Some(at)).unwrap();
        assert!(json.contains("\"timestamp\": \"2024-03-20T03:06:00Z\""));
        assert_eq!(json, export_diagnostic_data(&"payload", &monitor, Some(at)).unwrap());
    }
}
