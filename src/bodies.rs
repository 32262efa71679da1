//! # Celestial bodies and zodiac signs
//!
//! The engine always reports the same ten bodies in the same order:
//! Sun, Moon, Mercury, Venus, Mars, Jupiter, Saturn, Uranus, Neptune, Pluto.
//! [`ZodiacSign`] partitions the ecliptic into twelve 30° sectors starting at the
//! vernal equinox of date.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::constants::Degree;
use crate::orrery_errors::OrreryError;

/// One of the ten bodies reported in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All bodies, in chart order.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Position of the body in [`Body::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Mercury and Venus.
    pub fn is_inner_planet(self) -> bool {
        matches!(self, Body::Mercury | Body::Venus)
    }

    /// Jupiter through Pluto.
    pub fn is_outer_planet(self) -> bool {
        matches!(
            self,
            Body::Jupiter | Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto
        )
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OrreryError::InvalidEngineParameter(format!("unknown body '{s}'")))
    }
}

/// Tropical zodiac sign, each spanning 30° of ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    const ORDER: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing the given longitude, i.e. `floor(λ / 30)` after normalization.
    pub fn from_longitude(longitude: Degree) -> Self {
        let index = (normalize_degrees(longitude) / 30.0).floor() as usize;
        Self::ORDER[index.min(11)]
    }

    /// Longitude of the first degree of this sign.
    pub fn start_longitude(self) -> Degree {
        self as usize as f64 * 30.0
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;

    #[test]
    fn test_chart_order() {
        for (i, body) in Body::ALL.iter().enumerate() {
            assert_eq!(body.index(), i);
        }
        assert_eq!(Body::ALL[0], Body::Sun);
        assert_eq!(Body::ALL[9], Body::Pluto);
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("mars".parse::<Body>(), Ok(Body::Mars));
        assert_eq!(" Pluto ".parse::<Body>(), Ok(Body::Pluto));
        assert!("Vulcan".parse::<Body>().is_err());
    }

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999_999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(280.37), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(-0.5), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::Leo.start_longitude(), 120.0);
    }
}
