use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Julian Day {0} is outside the supported range [2415020.5, 2488070.5] or not finite")]
    InvalidJulianDay(f64),

    #[error("Invalid date '{0}': expected a real calendar date formatted YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM or HH:MM:SS on a 24h clock")]
    InvalidTime(String),

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Invalid engine parameter: {0}")]
    InvalidEngineParameter(String),

    #[error("Series evaluation failed for {series}: {reason}")]
    SeriesEvaluation { series: String, reason: String },

    #[error("Corrupt series table '{table}': {reason}")]
    CorruptSeriesTable { table: String, reason: String },

    #[error("Coordinate transform failed: {0}")]
    Transform(String),

    #[error("Timezone resolution failed: {0}")]
    TimezoneResolution(String),

    #[error("Timezone lookup timed out after {0} ms")]
    TimezoneLookupTimeout(u128),

    #[error("Cache unavailable: {0}")]
    Cache(String),

    #[error("Kepler equation root finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Batch worker failed: {0}")]
    BatchWorker(String),

    #[error("Unable to serialize diagnostic data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrreryError {
    /// Validation failures are surfaced to the caller; everything else is recoverable
    /// inside the engine or the converter.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrreryError::InvalidJulianDay(_)
                | OrreryError::InvalidDate(_)
                | OrreryError::InvalidTime(_)
                | OrreryError::InvalidCoordinates { .. }
                | OrreryError::InvalidEngineParameter(_)
        )
    }
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (InvalidJulianDay(a), InvalidJulianDay(b)) => a.to_bits() == b.to_bits(),
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidTime(a), InvalidTime(b)) => a == b,
            (
                InvalidCoordinates {
                    latitude: la,
                    longitude: lo,
                },
                InvalidCoordinates {
                    latitude: lb,
                    longitude: lob,
                },
            ) => la.to_bits() == lb.to_bits() && lo.to_bits() == lob.to_bits(),
            (InvalidEngineParameter(a), InvalidEngineParameter(b)) => a == b,
            (
                SeriesEvaluation {
                    series: sa,
                    reason: ra,
                },
                SeriesEvaluation {
                    series: sb,
                    reason: rb,
                },
            ) => sa == sb && ra == rb,
            (
                CorruptSeriesTable {
                    table: ta,
                    reason: ra,
                },
                CorruptSeriesTable {
                    table: tb,
                    reason: rb,
                },
            ) => ta == tb && ra == rb,
            (Transform(a), Transform(b)) => a == b,
            (TimezoneResolution(a), TimezoneResolution(b)) => a == b,
            (TimezoneLookupTimeout(a), TimezoneLookupTimeout(b)) => a == b,
            (Cache(a), Cache(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (BatchWorker(a), BatchWorker(b)) => a == b,

            // serde_json errors are not comparable: same variant is enough
            (Serialization(_), Serialization(_)) => true,

            _ => false,
        }
    }
}
