//! Impulsive burn resources.

use serde::{Deserialize, Serialize};

use super::celestial::CelestialBody;
use super::coordsys::CoordinateSystem;

/// Axis sets available for burn-local frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalAxes {
    Vnb,
    Lvlh,
    MJ2000Eq,
    SpacecraftBody,
}

impl LocalAxes {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vnb => "VNB",
            Self::Lvlh => "LVLH",
            Self::MJ2000Eq => "MJ2000Eq",
            Self::SpacecraftBody => "SpacecraftBody",
        }
    }
}

/// Frame a burn's delta-v vector is expressed in: either a declared
/// coordinate system or a spacecraft-local frame around an origin body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BurnFrame {
    Coordinate { frame: String },
    Local { origin: String, axes: LocalAxes },
}

impl BurnFrame {
    #[must_use]
    pub fn coordinate(frame: &CoordinateSystem) -> Self {
        Self::Coordinate {
            frame: frame.name.clone(),
        }
    }

    #[must_use]
    pub fn local(origin: &CelestialBody, axes: LocalAxes) -> Self {
        Self::Local {
            origin: origin.name.clone(),
            axes,
        }
    }
}

/// An instantaneous delta-v applied to one spacecraft by a maneuver step.
///
/// The delta-v vector is a fixed `[f64; 3]`; there is no wrong-length state
/// to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpulsiveBurn {
    pub name: String,
    pub frame: BurnFrame,
    /// Delta-v components in km/s.
    pub delta_v: [f64; 3],
}

impl ImpulsiveBurn {
    /// A zero burn; solver blocks vary its elements.
    #[must_use]
    pub fn new(name: impl Into<String>, frame: BurnFrame) -> Self {
        Self {
            name: name.into(),
            frame,
            delta_v: [0.0; 3],
        }
    }

    #[must_use]
    pub fn with_delta_v(mut self, delta_v: [f64; 3]) -> Self {
        self.delta_v = delta_v;
        self
    }

    /// Parameter name of the first delta-v element, for vary directives.
    #[must_use]
    pub fn element1(&self) -> String {
        format!("{}.Element1", self.name)
    }

    #[must_use]
    pub fn element2(&self) -> String {
        format!("{}.Element2", self.name)
    }

    #[must_use]
    pub fn element3(&self) -> String {
        format!("{}.Element3", self.name)
    }

    #[must_use]
    pub fn script(&self) -> String {
        let frame_lines = match &self.frame {
            BurnFrame::Coordinate { frame } => {
                format!("GMAT {}.CoordinateSystem = {frame};", self.name)
            }
            BurnFrame::Local { origin, axes } => format!(
                "GMAT {name}.CoordinateSystem = Local;\n\
                 GMAT {name}.Origin = {origin};\n\
                 GMAT {name}.Axes = {axes};",
                name = self.name,
                axes = axes.as_str(),
            ),
        };
        format!(
            "Create ImpulsiveBurn {name};\n{frame_lines}\n\
             GMAT {name}.Element1 = {};\n\
             GMAT {name}.Element2 = {};\n\
             GMAT {name}.Element3 = {};",
            self.delta_v[0],
            self.delta_v[1],
            self.delta_v[2],
            name = self.name,
        )
    }
}
