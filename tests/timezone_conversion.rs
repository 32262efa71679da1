use std::future::Future;
use std::time::Duration;

use orrery::bodies::{Body, ZodiacSign};
use orrery::orrery::Orrery;
use orrery::orrery_errors::OrreryError;
use orrery::series::PrecisionLevel;
use orrery::timezone::{
    CivilDate, Location, SyncLookup, TimezoneInfo, TimezoneLookup, TimezoneSource,
};

/// Collaborator that never answers in time.
struct StalledLookup;

impl TimezoneLookup for StalledLookup {
    fn get_timezone_for_coordinates(
        &self,
        _latitude: f64,
        _longitude: f64,
        _date: &CivilDate,
    ) -> impl Future<Output = Result<TimezoneInfo, OrreryError>> + Send {
        async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(OrreryError::TimezoneResolution("late".into()))
        }
    }
}

fn allahabad() -> Location {
    Location::new(25.4358, 81.8463)
}

#[tokio::test]
async fn test_kolkata_birth_time() {
    let engine = Orrery::new();
    let converter = engine.timezone_converter();
    let result = converter
        .convert_birth_time_to_utc("1985-01-04", "06:30", allahabad())
        .await
        .unwrap();

    assert_eq!(result.utc_iso, "1985-01-04T01:00:00Z");
    assert_eq!(result.timezone.name, "Asia/Kolkata");
    assert_eq!(result.timezone.source, TimezoneSource::Service);
    assert_eq!(result.offset_hours, 5.5);
    assert!(!result.dst);
    assert!(!result.validation.low_confidence);
    assert!(result.validation.warnings.is_empty());

    let chart = engine
        .calculate_positions(result.julian_day_tt(), PrecisionLevel::High)
        .unwrap();
    assert_eq!(chart[Body::Sun.index()].sign, ZodiacSign::Capricorn);
}

#[tokio::test]
async fn test_failed_lookup_falls_back_to_longitude() {
    let engine = Orrery::new();
    let converter = engine.timezone_converter_with(SyncLookup(
        |_: f64, _: f64, _: &CivilDate| -> Result<TimezoneInfo, OrreryError> {
            Err(OrreryError::TimezoneResolution("service down".into()))
        },
    ));
    let result = converter
        .convert_birth_time_to_utc("1985-01-04", "06:30", allahabad())
        .await
        .unwrap();

    assert_eq!(result.timezone.source, TimezoneSource::LongitudeFallback);
    assert_eq!(result.offset_hours, 5.0);
    assert_eq!(result.utc_iso, "1985-01-04T01:30:00Z");
    assert!(result.validation.low_confidence);
    assert!(result
        .validation
        .fallback_reason
        .as_deref()
        .unwrap()
        .contains("service down"));
}

#[tokio::test]
async fn test_stalled_lookup_times_out() {
    let engine = Orrery::with_config(
        orrery::config::EngineConfig::builder()
            .timezone_timeout(Duration::from_millis(50))
            .build()
            .unwrap(),
    );
    let converter = engine.timezone_converter_with(StalledLookup);
    let result = converter
        .convert_birth_time_to_utc("2001-07-15", "12:00:30", Location::new(40.7, -74.0))
        .await
        .unwrap();

    assert_eq!(result.timezone.source, TimezoneSource::LongitudeFallback);
    assert_eq!(result.offset_hours, -5.0);
    assert!(!result.dst);
    assert_eq!(result.utc_iso, "2001-07-15T17:00:30Z");
}

#[tokio::test]
async fn test_new_york_summer_applies_dst() {
    let converter = Orrery::new().timezone_converter();
    let result = converter
        .convert_birth_time_to_utc("2001-07-15", "12:00", Location::new(40.7, -74.0))
        .await
        .unwrap();
    assert_eq!(result.timezone.name, "America/New_York");
    assert!(result.dst);
    assert_eq!(result.offset_hours, -4.0);
    assert_eq!(result.utc_iso, "2001-07-15T16:00:00Z");
}

#[tokio::test]
async fn test_conversion_is_idempotent() {
    let converter = Orrery::new().timezone_converter();
    let a = converter
        .convert_birth_time_to_utc("1969-07-20", "20:17", Location::new(48.85, 2.35))
        .await
        .unwrap();
    let b = converter
        .convert_birth_time_to_utc("1969-07-20", "20:17", Location::new(48.85, 2.35))
        .await
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.julian_day(), b.julian_day());
}

#[tokio::test]
async fn test_validation_errors_are_fatal() {
    let converter = Orrery::new().timezone_converter();
    let cases = [
        ("1985-02-30", "06:30", allahabad()),
        ("04/01/1985", "06:30", allahabad()),
        ("1985-01-04", "24:30", allahabad()),
        ("1985-01-04", "6h30", allahabad()),
        ("1985-01-04", "06:30", Location::new(91.0, 0.0)),
        ("1985-01-04", "06:30", Location::new(0.0, 181.0)),
    ];
    for (date, time, location) in cases {
        let err = converter
            .convert_birth_time_to_utc(date, time, location)
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{date} {time}: {err}");
    }
}
