//! Built-in truncated VSOP87D tables (heliocentric ecliptic coordinates, equinox of date).

mod earth;
mod jupiter;
mod mars;
mod mercury;
mod neptune;
mod saturn;
mod uranus;
mod venus;

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::series::SeriesTable;

/// Bodies that have a VSOP87 table. The Earth's table also yields the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeriesBody {
    Earth,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl SeriesBody {
    pub const ALL: [SeriesBody; 8] = [
        SeriesBody::Earth,
        SeriesBody::Mercury,
        SeriesBody::Venus,
        SeriesBody::Mars,
        SeriesBody::Jupiter,
        SeriesBody::Saturn,
        SeriesBody::Uranus,
        SeriesBody::Neptune,
    ];

    /// Table backing a chart body: the Sun maps to the Earth, Moon and Pluto have none.
    pub fn for_body(body: Body) -> Option<SeriesBody> {
        match body {
            Body::Sun => Some(SeriesBody::Earth),
            Body::Mercury => Some(SeriesBody::Mercury),
            Body::Venus => Some(SeriesBody::Venus),
            Body::Mars => Some(SeriesBody::Mars),
            Body::Jupiter => Some(SeriesBody::Jupiter),
            Body::Saturn => Some(SeriesBody::Saturn),
            Body::Uranus => Some(SeriesBody::Uranus),
            Body::Neptune => Some(SeriesBody::Neptune),
            Body::Moon | Body::Pluto => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeriesBody::Earth => "Earth",
            SeriesBody::Mercury => "Mercury",
            SeriesBody::Venus => "Venus",
            SeriesBody::Mars => "Mars",
            SeriesBody::Jupiter => "Jupiter",
            SeriesBody::Saturn => "Saturn",
            SeriesBody::Uranus => "Uranus",
            SeriesBody::Neptune => "Neptune",
        }
    }

    /// The built-in table, borrowing the static terms.
    pub fn table(self) -> SeriesTable {
        let (l, b, r) = match self {
            SeriesBody::Earth => (earth::LONGITUDE, earth::LATITUDE, earth::RADIUS),
            SeriesBody::Mercury => (mercury::LONGITUDE, mercury::LATITUDE, mercury::RADIUS),
            SeriesBody::Venus => (venus::LONGITUDE, venus::LATITUDE, venus::RADIUS),
            SeriesBody::Mars => (mars::LONGITUDE, mars::LATITUDE, mars::RADIUS),
            SeriesBody::Jupiter => (jupiter::LONGITUDE, jupiter::LATITUDE, jupiter::RADIUS),
            SeriesBody::Saturn => (saturn::LONGITUDE, saturn::LATITUDE, saturn::RADIUS),
            SeriesBody::Uranus => (uranus::LONGITUDE, uranus::LATITUDE, uranus::RADIUS),
            SeriesBody::Neptune => (neptune::LONGITUDE, neptune::LATITUDE, neptune::RADIUS),
        };
        SeriesTable::from_static(self.name(), l, b, r)
    }
}

#[cfg(test)]
mod vsop87_test {
    use super::*;
    use crate::series::{PrecisionLevel, SeriesEvaluator};
    use crate::time::julian_millennia;

    #[test]
    fn test_mean_distances_at_j2000() {
        let expected = [
            (SeriesBody::Earth, 0.983, 1.017),
            (SeriesBody::Mercury, 0.30, 0.47),
            (SeriesBody::Venus, 0.71, 0.73),
            (SeriesBody::Mars, 1.38, 1.67),
            (SeriesBody::Jupiter, 4.95, 5.46),
            (SeriesBody::Saturn, 9.0, 10.1),
            (SeriesBody::Uranus, 18.3, 20.1),
            (SeriesBody::Neptune, 29.8, 30.4),
        ];
        let evaluator = SeriesEvaluator::new(PrecisionLevel::High);
        for (body, min, max) in expected {
            let pos = evaluator
                .heliocentric(&body.table(), julian_millennia(2_451_545.0))
                .unwrap();
            assert!(
                (min..=max).contains(&pos.radius),
                "{body:?} radius {} outside [{min}, {max}]",
                pos.radius
            );
            assert!(pos.latitude.abs() < 7.5, "{body:?} latitude {}", pos.latitude);
        }
    }

    #[test]
    fn test_sun_maps_to_earth() {
        assert_eq!(SeriesBody::for_body(Body::Sun), Some(SeriesBody::Earth));
        assert_eq!(SeriesBody::for_body(Body::Moon), None);
        assert_eq!(SeriesBody::for_body(Body::Pluto), None);
    }
}
