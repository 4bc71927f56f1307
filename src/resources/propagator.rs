//! Dynamics models and integrators.

use serde::{Deserialize, Serialize};

use super::celestial::CelestialBody;

/// Spherical-harmonic gravity field for a force model's primary body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityField {
    /// Body the harmonics describe.
    pub body: String,
    pub degree: u32,
    pub order: u32,
    pub potential_file: String,
    pub stm_limit: u32,
}

impl GravityField {
    #[must_use]
    pub fn new(body: impl Into<String>, degree: u32, order: u32, file: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            degree,
            order,
            potential_file: file.into(),
            stm_limit: 100,
        }
    }

    /// Lunar gravity field using the LP165P model file.
    #[must_use]
    pub fn moon(degree: u32, order: u32) -> Self {
        Self::new("Luna", degree, order, "LP165P.cof")
    }

    /// Earth gravity field using the EGM96 model file.
    #[must_use]
    pub fn earth(degree: u32, order: u32) -> Self {
        Self::new("Earth", degree, order, "EGM96.cof")
    }

    fn script(&self, model: &str) -> String {
        format!(
            "GMAT {model}.GravityField.{body}.Degree = {};\n\
             GMAT {model}.GravityField.{body}.Order = {};\n\
             GMAT {model}.GravityField.{body}.StmLimit = {};\n\
             GMAT {model}.GravityField.{body}.PotentialFile = '{}';\n\
             GMAT {model}.GravityField.{body}.TideModel = 'None';",
            self.degree,
            self.order,
            self.stm_limit,
            self.potential_file,
            body = self.body,
        )
    }
}

/// Integration error-control strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorControl {
    RssStep,
    RssState,
    LargestStep,
    LargestState,
}

impl ErrorControl {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RssStep => "RSSStep",
            Self::RssState => "RSSState",
            Self::LargestStep => "LargestStep",
            Self::LargestState => "LargestState",
        }
    }
}

/// Force model: one primary body with a gravity field plus optional point
/// masses. Drag, SRP, and relativistic corrections are off; this layer only
/// emits the configuration the engine's defaults leave ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceModel {
    pub name: String,
    pub central_body: String,
    pub gravity: GravityField,
    pub point_masses: Vec<String>,
    pub error_control: ErrorControl,
}

impl ForceModel {
    #[must_use]
    pub fn new(name: impl Into<String>, gravity: GravityField, body: &CelestialBody) -> Self {
        Self {
            name: name.into(),
            central_body: body.name.clone(),
            gravity,
            point_masses: Vec::new(),
            error_control: ErrorControl::RssStep,
        }
    }

    #[must_use]
    pub fn with_point_masses(mut self, bodies: &[CelestialBody]) -> Self {
        self.point_masses = bodies.iter().map(|b| b.name.clone()).collect();
        self
    }

    #[must_use]
    pub fn script(&self) -> String {
        let masses = format!("{{{}}}", self.point_masses.join(", "));
        format!(
            "Create ForceModel {name};\n\
             GMAT {name}.CentralBody = {body};\n\
             GMAT {name}.PrimaryBodies = {{{body}}};\n\
             GMAT {name}.PointMasses = {masses};\n\
             GMAT {name}.Drag = None;\n\
             GMAT {name}.SRP = Off;\n\
             GMAT {name}.RelativisticCorrection = Off;\n\
             GMAT {name}.ErrorControl = {ec};\n{gravity}",
            name = self.name,
            body = self.central_body,
            ec = self.error_control.as_str(),
            gravity = self.gravity.script(&self.name),
        )
    }
}

/// Numerical integrator bound to a force model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagator {
    pub name: String,
    pub force_model: String,
    pub method: String,
    pub initial_step_size: f64,
    pub accuracy: f64,
    pub min_step: f64,
    pub max_step: f64,
    pub max_step_attempts: u32,
    pub stop_if_accuracy_violated: bool,
}

impl Propagator {
    /// RungeKutta89 with the engine-tuned defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, force_model: &ForceModel) -> Self {
        Self {
            name: name.into(),
            force_model: force_model.name.clone(),
            method: "RungeKutta89".to_string(),
            initial_step_size: 60.0,
            accuracy: 1e-11,
            min_step: 0.001,
            max_step: 2700.0,
            max_step_attempts: 50,
            stop_if_accuracy_violated: true,
        }
    }

    #[must_use]
    pub fn script(&self) -> String {
        format!(
            "Create Propagator {name};\n\
             GMAT {name}.FM = {fm};\n\
             GMAT {name}.Type = {method};\n\
             GMAT {name}.InitialStepSize = {};\n\
             GMAT {name}.Accuracy = {:e};\n\
             GMAT {name}.MinStep = {};\n\
             GMAT {name}.MaxStep = {};\n\
             GMAT {name}.MaxStepAttempts = {};\n\
             GMAT {name}.StopIfAccuracyIsViolated = {};",
            self.initial_step_size,
            self.accuracy,
            self.min_step,
            self.max_step,
            self.max_step_attempts,
            self.stop_if_accuracy_violated,
            name = self.name,
            fm = self.force_model,
            method = self.method,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_model_script() {
        let luna = CelestialBody::luna();
        let model = ForceModel::new("LunaForceModel", GravityField::moon(20, 20), &luna)
            .with_point_masses(&[CelestialBody::earth()]);
        let script = model.script();
        assert!(script.starts_with("Create ForceModel LunaForceModel;\n"));
        assert!(script.contains("GMAT LunaForceModel.CentralBody = Luna;"));
        assert!(script.contains("GMAT LunaForceModel.PointMasses = {Earth};"));
        assert!(script.contains("GMAT LunaForceModel.GravityField.Luna.Degree = 20;"));
        assert!(script.contains("PotentialFile = 'LP165P.cof';"));
        assert!(script.ends_with("TideModel = 'None';"));
    }

    #[test]
    fn test_force_model_empty_point_masses() {
        let earth = CelestialBody::earth();
        let model = ForceModel::new("FM", GravityField::earth(4, 4), &earth);
        assert!(model.script().contains("GMAT FM.PointMasses = {};"));
    }

    #[test]
    fn test_propagator_defaults() {
        let luna = CelestialBody::luna();
        let model = ForceModel::new("FM", GravityField::moon(20, 20), &luna);
        let prop = Propagator::new("DefaultProp", &model);
        let script = prop.script();
        assert!(script.contains("GMAT DefaultProp.FM = FM;"));
        assert!(script.contains("GMAT DefaultProp.Type = RungeKutta89;"));
        assert!(script.contains("GMAT DefaultProp.Accuracy = 1e-11;"));
        assert!(script.contains("GMAT DefaultProp.MaxStep = 2700;"));
        assert!(script.ends_with("GMAT DefaultProp.StopIfAccuracyIsViolated = true;"));
    }
}
