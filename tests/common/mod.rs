#![allow(dead_code)]

use orrery::angles::angular_separation;
use orrery::config::EngineConfig;
use orrery::orrery::Orrery;
use orrery::series::vsop87::SeriesBody;
use orrery::series::SeriesTable;

/// Engine without cache, so every call goes through the theories.
pub fn uncached_engine() -> Orrery {
    Orrery::with_config(
        EngineConfig::builder()
            .cache_enabled(false)
            .build()
            .unwrap(),
    )
}

/// Built-in table of `body` with a non-finite coefficient in its main longitude series.
pub fn table_with_nan(body: SeriesBody) -> SeriesTable {
    let mut table = body.table();
    table.longitude[0].to_mut()[1][0] = f64::NAN;
    table
}

/// Built-in table of `body` without any latitude series.
pub fn table_without_latitude(body: SeriesBody) -> SeriesTable {
    let mut table = body.table();
    table.latitude.clear();
    table
}

pub fn assert_longitude_close(actual: f64, expected: f64, epsilon: f64) {
    let separation = angular_separation(actual, expected);
    assert!(
        separation <= epsilon,
        "longitude {actual} differs from {expected} by {separation}° (> {epsilon}°)"
    );
}
