pub mod angles;
pub mod bodies;
pub mod cache;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod diagnostics;
pub mod earth_orientation;
pub mod fundamental_args;
pub mod kepler;
pub mod lunar;
pub mod metrics;
pub mod orrery;
pub mod orrery_errors;
pub mod position;
pub mod ref_system;
pub mod series;
pub mod time;
pub mod timezone;
