//! Coordinate system resources.
//!
//! The engine predefines four Earth-centered frames; those render to nothing.
//! Any other frame must carry an origin body and an axis set, declared with
//! a `Create CoordinateSystem` block.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::celestial::CelestialBody;

/// Frames the engine predefines; declaring them is unnecessary.
const PREDEFINED: [&str; 4] = ["EarthMJ2000Eq", "EarthMJ2000Ec", "EarthFixed", "EarthICRF"];

/// Axis sets for custom coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axes {
    MJ2000Eq,
    MJ2000Ec,
    BodyFixed,
    BodyInertial,
}

impl Axes {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MJ2000Eq => "MJ2000Eq",
            Self::MJ2000Ec => "MJ2000Ec",
            Self::BodyFixed => "BodyFixed",
            Self::BodyInertial => "BodyInertial",
        }
    }
}

/// A reference frame, predefined or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub name: String,
    /// Name of the origin body.
    pub origin: String,
    /// `None` only for predefined frames.
    pub axes: Option<Axes>,
}

impl CoordinateSystem {
    /// Build a custom frame. Fails if `name` is not one of the engine's
    /// predefined frames and no axes were given.
    pub fn new(
        name: impl Into<String>,
        origin: &CelestialBody,
        axes: Option<Axes>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if axes.is_none() && !PREDEFINED.contains(&name.as_str()) {
            return Err(ConfigError::MissingAxes { name });
        }
        Ok(Self {
            name,
            origin: origin.name.clone(),
            axes,
        })
    }

    #[must_use]
    pub fn earth_mj2000_eq() -> Self {
        Self::predefined("EarthMJ2000Eq")
    }

    #[must_use]
    pub fn earth_mj2000_ec() -> Self {
        Self::predefined("EarthMJ2000Ec")
    }

    #[must_use]
    pub fn earth_fixed() -> Self {
        Self::predefined("EarthFixed")
    }

    /// International Celestial Reference Frame.
    #[must_use]
    pub fn earth_icrf() -> Self {
        Self::predefined("EarthICRF")
    }

    fn predefined(name: &str) -> Self {
        Self {
            name: name.to_string(),
            origin: "Earth".to_string(),
            axes: None,
        }
    }

    #[must_use]
    pub fn is_predefined(&self) -> bool {
        PREDEFINED.contains(&self.name.as_str())
    }

    /// Render the declaration block. Predefined frames render to nothing;
    /// the serializer skips empty renderings.
    #[must_use]
    pub fn script(&self) -> String {
        match (&self.axes, self.is_predefined()) {
            (_, true) => String::new(),
            (Some(axes), false) => format!(
                "Create CoordinateSystem {name};\n\
                 GMAT {name}.Origin = {origin};\n\
                 GMAT {name}.Axes = {axes};",
                name = self.name,
                origin = self.origin,
                axes = axes.as_str(),
            ),
            // Unreachable for values built through `new`.
            (None, false) => String::new(),
        }
    }
}
