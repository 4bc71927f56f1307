//! Celestial bodies and their mean radii (km).
//!
//! Bodies are not registry resources: the engine predefines them. They exist
//! here so callers can name central bodies and convert between altitude and
//! radius without hardcoding constants.

use serde::{Deserialize, Serialize};

/// A celestial body the engine knows by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Mean radius in km.
    pub radius: f64,
}

impl CelestialBody {
    #[must_use]
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
        }
    }

    /// Radius of a point `altitude` km above the surface.
    #[must_use]
    pub fn radius_of_altitude(&self, altitude: f64) -> f64 {
        self.radius + altitude
    }

    /// Altitude of a point at `radius` km from the body center.
    #[must_use]
    pub fn altitude_of_radius(&self, radius: f64) -> f64 {
        radius - self.radius
    }

    #[must_use]
    pub fn sun() -> Self {
        Self::new("Sun", 696_340.0)
    }

    #[must_use]
    pub fn mercury() -> Self {
        Self::new("Mercury", 2439.7)
    }

    #[must_use]
    pub fn venus() -> Self {
        Self::new("Venus", 6051.8)
    }

    #[must_use]
    pub fn earth() -> Self {
        Self::new("Earth", 6371.0)
    }

    #[must_use]
    pub fn mars() -> Self {
        Self::new("Mars", 3389.5)
    }

    #[must_use]
    pub fn jupiter() -> Self {
        Self::new("Jupiter", 69_911.0)
    }

    #[must_use]
    pub fn saturn() -> Self {
        Self::new("Saturn", 58_232.0)
    }

    #[must_use]
    pub fn uranus() -> Self {
        Self::new("Uranus", 25_362.0)
    }

    #[must_use]
    pub fn neptune() -> Self {
        Self::new("Neptune", 24_622.0)
    }

    #[must_use]
    pub fn pluto() -> Self {
        Self::new("Pluto", 1188.3)
    }

    /// Earth's moon. The engine names it Luna.
    #[must_use]
    pub fn luna() -> Self {
        Self::new("Luna", 1737.5)
    }
}
