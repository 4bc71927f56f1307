//! Configuration objects declared ahead of the mission sequence.
//!
//! Every resource is immutable after construction, renders its own
//! `Create …` declaration block, and carries a kind that maps to a fixed
//! ordering category (see [`crate::registry`]). Mission steps reference
//! resources by name, so resources can be declared and dropped independently
//! of the instruction tree that uses them.

pub mod burn;
pub mod celestial;
pub mod coordsys;
pub mod epoch;
pub mod propagator;
pub mod sink;
pub mod solver;
pub mod spacecraft;
pub mod variable;

use serde::{Deserialize, Serialize};

pub use burn::{BurnFrame, ImpulsiveBurn, LocalAxes};
pub use celestial::CelestialBody;
pub use coordsys::{Axes, CoordinateSystem};
pub use epoch::{Epoch, TimeStandard};
pub use propagator::{ErrorControl, ForceModel, GravityField, Propagator};
pub use sink::ReportSink;
pub use solver::{Algorithm, DerivativeMethod, DifferentialCorrector};
pub use spacecraft::{
    BodyRelative, CartesianState, KeplerianState, ModifiedKeplerianState, Spacecraft, State,
};
pub use variable::Variable;

/// Escape hatch for engine resource types this crate has no dedicated type
/// for. The script block is emitted verbatim; the kind string must still map
/// to a known ordering category, which is where unrecognized kinds are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomResource {
    /// Engine type name, e.g. `ReportFile` or `Barycenter`.
    pub kind: String,
    pub name: String,
    /// Verbatim declaration block.
    pub script: String,
}

impl CustomResource {
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            script: script.into(),
        }
    }
}

/// Any configuration object a plan can declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    Variable(Variable),
    Frame(CoordinateSystem),
    Spacecraft(Spacecraft),
    Burn(ImpulsiveBurn),
    ForceModel(ForceModel),
    Propagator(Propagator),
    Solver(DifferentialCorrector),
    Sink(ReportSink),
    Custom(CustomResource),
}

impl Resource {
    /// Engine type name, the key the category classifier orders by.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Variable(_) => "Variable",
            Self::Frame(_) => "CoordinateSystem",
            Self::Spacecraft(_) => "Spacecraft",
            Self::Burn(_) => "ImpulsiveBurn",
            Self::ForceModel(_) => "ForceModel",
            Self::Propagator(_) => "Propagator",
            Self::Solver(_) => "DifferentialCorrector",
            Self::Sink(_) => "ReportFile",
            Self::Custom(c) => &c.kind,
        }
    }

    /// Resource name. Uniqueness is not enforced by this layer; the engine
    /// rejects duplicate declarations itself.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::Frame(f) => &f.name,
            Self::Spacecraft(s) => &s.name,
            Self::Burn(b) => &b.name,
            Self::ForceModel(m) => &m.name,
            Self::Propagator(p) => &p.name,
            Self::Solver(s) => &s.name,
            Self::Sink(s) => &s.name,
            Self::Custom(c) => &c.name,
        }
    }

    /// Render the declaration block. May be empty (predefined frames).
    #[must_use]
    pub fn script(&self) -> String {
        match self {
            Self::Variable(v) => v.script(),
            Self::Frame(f) => f.script(),
            Self::Spacecraft(s) => s.script(),
            Self::Burn(b) => b.script(),
            Self::ForceModel(m) => m.script(),
            Self::Propagator(p) => p.script(),
            Self::Solver(s) => s.script(),
            Self::Sink(s) => s.script(),
            Self::Custom(c) => c.script.clone(),
        }
    }
}

impl From<Variable> for Resource {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}

impl From<CoordinateSystem> for Resource {
    fn from(f: CoordinateSystem) -> Self {
        Self::Frame(f)
    }
}

impl From<Spacecraft> for Resource {
    fn from(s: Spacecraft) -> Self {
        Self::Spacecraft(s)
    }
}

impl From<ImpulsiveBurn> for Resource {
    fn from(b: ImpulsiveBurn) -> Self {
        Self::Burn(b)
    }
}

impl From<ForceModel> for Resource {
    fn from(m: ForceModel) -> Self {
        Self::ForceModel(m)
    }
}

impl From<Propagator> for Resource {
    fn from(p: Propagator) -> Self {
        Self::Propagator(p)
    }
}

impl From<DifferentialCorrector> for Resource {
    fn from(s: DifferentialCorrector) -> Self {
        Self::Solver(s)
    }
}

impl From<ReportSink> for Resource {
    fn from(s: ReportSink) -> Self {
        Self::Sink(s)
    }
}

impl From<CustomResource> for Resource {
    fn from(c: CustomResource) -> Self {
        Self::Custom(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_engine_types() {
        assert_eq!(Resource::from(Variable::new("I")).kind(), "Variable");
        assert_eq!(
            Resource::from(DifferentialCorrector::new("DC")).kind(),
            "DifferentialCorrector"
        );
        let custom = CustomResource::new("Barycenter", "EMB", "Create Barycenter EMB;");
        assert_eq!(Resource::from(custom).kind(), "Barycenter");
    }

    #[test]
    fn test_name_accessor() {
        let sink = ReportSink::new("Rpt", "out.txt");
        assert_eq!(Resource::from(sink).name(), "Rpt");
    }
}
