//! The mission sequence: atomic steps and nested control-flow blocks.
//!
//! Steps reference resources by name, taken from the resource value at
//! construction time. Validation happens in the constructors; a step that
//! exists renders.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resources::{
    CelestialBody, DifferentialCorrector, ImpulsiveBurn, Propagator, ReportSink, Spacecraft,
    Variable,
};

/// Comparison operators available to conditions.
///
/// Rendering is an exhaustive match: a new variant without a rendering arm
/// is a compile error, not a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    LessThan,
    GreaterThan,
}

impl Comparison {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

/// `parameter <op> value`, the guard of while loops and if blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub parameter: String,
    pub comparison: Comparison,
    pub value: f64,
}

impl Condition {
    #[must_use]
    pub fn new(parameter: impl Into<String>, comparison: Comparison, value: f64) -> Self {
        Self {
            parameter: parameter.into(),
            comparison,
            value,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!("{} {} {}", self.parameter, self.comparison.as_str(), self.value)
    }
}

/// Termination condition of a propagate step: either a bare stopping
/// parameter (`Sat1.Luna.Periapsis`) or a parameter-equals-value pair
/// (`Sat1.ElapsedSecs = 12000`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopCondition {
    pub parameter: String,
    pub value: Option<f64>,
}

impl StopCondition {
    /// Stop when the parameter event occurs (periapsis, apoapsis, ...).
    #[must_use]
    pub fn on(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            value: None,
        }
    }

    /// Stop when the parameter reaches the value.
    #[must_use]
    pub fn at(parameter: impl Into<String>, value: f64) -> Self {
        Self {
            parameter: parameter.into(),
            value: Some(value),
        }
    }

    fn render(&self) -> String {
        match self.value {
            Some(value) => format!("{} = {value}", self.parameter),
            None => self.parameter.clone(),
        }
    }
}

/// How a target block drives its corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMode {
    /// Run the initial guess once without iterating.
    RunInitialGuess,
    /// Iterate to convergence.
    Solve,
}

impl SolveMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RunInitialGuess => "RunInitialGuess",
            Self::Solve => "Solve",
        }
    }
}

/// What happens to varied parameters when a target block exits. Opaque to
/// this layer; passed through to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitMode {
    DiscardAndContinue,
    SaveAndContinue,
    Stop,
}

impl ExitMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DiscardAndContinue => "DiscardAndContinue",
            Self::SaveAndContinue => "SaveAndContinue",
            Self::Stop => "Stop",
        }
    }
}

fn preamble(verb: &str, description: &str) -> String {
    if description.is_empty() {
        verb.to_string()
    } else {
        format!("{verb} '{description}'")
    }
}

/// Propagate one or more spacecraft until a termination condition is met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagate {
    pub propagator: String,
    pub spacecraft: Vec<String>,
    pub conditions: Vec<StopCondition>,
    pub description: String,
}

impl Propagate {
    /// Requires at least one spacecraft and one stop condition.
    pub fn new(
        propagator: &Propagator,
        spacecraft: &[&Spacecraft],
        conditions: Vec<StopCondition>,
    ) -> Result<Self, ConfigError> {
        if spacecraft.is_empty() {
            return Err(ConfigError::NoSpacecraft);
        }
        if conditions.is_empty() {
            return Err(ConfigError::NoStopCondition);
        }
        Ok(Self {
            propagator: propagator.name.clone(),
            spacecraft: spacecraft.iter().map(|s| s.name.clone()).collect(),
            conditions,
            description: String::new(),
        })
    }

    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn script(&self) -> String {
        let conditions: Vec<String> = self.conditions.iter().map(StopCondition::render).collect();
        format!(
            "{} {}({}) {{{}}}",
            preamble("Propagate", &self.description),
            self.propagator,
            self.spacecraft.join(", "),
            conditions.join(", "),
        )
    }
}

/// Apply an impulsive burn to exactly one spacecraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    pub burn: String,
    pub spacecraft: String,
}

impl Maneuver {
    #[must_use]
    pub fn new(burn: &ImpulsiveBurn, spacecraft: &Spacecraft) -> Self {
        Self {
            burn: burn.name.clone(),
            spacecraft: spacecraft.name.clone(),
        }
    }

    fn script(&self) -> String {
        format!("Maneuver {}({})", self.burn, self.spacecraft)
    }
}

/// Write the current value of each field to a report sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sink: String,
    /// Ordered, possibly empty field list.
    pub fields: Vec<String>,
    pub description: String,
}

impl Report {
    #[must_use]
    pub fn new(sink: &ReportSink, fields: Vec<String>) -> Self {
        Self {
            sink: sink.name.clone(),
            fields,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn script(&self) -> String {
        let head = format!("{} {}", preamble("Report", &self.description), self.sink);
        if self.fields.is_empty() {
            format!("{head};")
        } else {
            format!("{head} {};", self.fields.join(" "))
        }
    }
}

/// Counted loop over an engine variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoop {
    pub variable: String,
    pub start: i64,
    pub step: i64,
    pub end: i64,
    pub body: Vec<Step>,
}

impl ForLoop {
    #[must_use]
    pub fn new(variable: &Variable, start: i64, step: i64, end: i64) -> Self {
        Self {
            variable: variable.name.clone(),
            start,
            step,
            end,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<Step>) -> Self {
        self.body = body;
        self
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.body.push(step.into());
    }
}

/// Conditional loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileLoop {
    pub condition: Condition,
    pub body: Vec<Step>,
}

impl WhileLoop {
    #[must_use]
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<Step>) -> Self {
        self.body = body;
        self
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.body.push(step.into());
    }
}

/// Conditional branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBlock {
    pub condition: Condition,
    pub body: Vec<Step>,
}

impl IfBlock {
    #[must_use]
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<Step>) -> Self {
        self.body = body;
        self
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.body.push(step.into());
    }
}

/// Iterative-solver block. Contains vary and achieve directives plus
/// ordinary steps; the engine performs the iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBlock {
    pub solver: String,
    pub solve_mode: SolveMode,
    pub exit_mode: ExitMode,
    pub body: Vec<Step>,
}

impl TargetBlock {
    #[must_use]
    pub fn new(solver: &DifferentialCorrector) -> Self {
        Self {
            solver: solver.name.clone(),
            solve_mode: SolveMode::Solve,
            exit_mode: ExitMode::DiscardAndContinue,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_solve_mode(mut self, solve_mode: SolveMode) -> Self {
        self.solve_mode = solve_mode;
        self
    }

    #[must_use]
    pub fn with_exit_mode(mut self, exit_mode: ExitMode) -> Self {
        self.exit_mode = exit_mode;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<Step>) -> Self {
        self.body = body;
        self
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.body.push(step.into());
    }

    fn header(&self) -> String {
        format!(
            "Target {} {{SolveMode = {}, ExitMode = {}, ShowProgressWindow = false}};",
            self.solver,
            self.solve_mode.as_str(),
            self.exit_mode.as_str(),
        )
    }
}

/// Vary directive inside a target block: the parameter the corrector is
/// free to change, with its numeric tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vary {
    pub solver: String,
    pub parameter: String,
    pub initial: f64,
    pub perturbation: f64,
    pub lower: f64,
    pub upper: f64,
    pub max_step: f64,
    pub additive_scale: f64,
    pub multiplicative_scale: f64,
}

impl Vary {
    /// Defaults: initial 0.5, perturbation 1e-4, bounds [-100, 100],
    /// max step 0.2, additive scale 0, multiplicative scale 1.
    #[must_use]
    pub fn new(solver: &DifferentialCorrector, parameter: impl Into<String>) -> Self {
        Self {
            solver: solver.name.clone(),
            parameter: parameter.into(),
            initial: 0.5,
            perturbation: 1e-4,
            lower: -100.0,
            upper: 100.0,
            max_step: 0.2,
            additive_scale: 0.0,
            multiplicative_scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    #[must_use]
    pub fn with_perturbation(mut self, perturbation: f64) -> Self {
        self.perturbation = perturbation;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    #[must_use]
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    #[must_use]
    pub fn with_scales(mut self, additive: f64, multiplicative: f64) -> Self {
        self.additive_scale = additive;
        self.multiplicative_scale = multiplicative;
        self
    }

    fn script(&self) -> String {
        format!(
            "Vary {}({} = {}, {{Perturbation = {}, Lower = {}, Upper = {}, \
             AdditiveScaleFactor = {}, MultiplicativeScaleFactor = {}}});",
            self.solver,
            self.parameter,
            self.initial,
            self.perturbation,
            self.lower,
            self.upper,
            self.additive_scale,
            self.multiplicative_scale,
        )
    }
}

/// Achieve directive inside a target block: the goal the corrector drives
/// its varied parameters toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achieve {
    pub solver: String,
    pub goal: String,
    pub value: f64,
    pub tolerance: f64,
}

impl Achieve {
    /// Default tolerance: 0.1.
    #[must_use]
    pub fn new(solver: &DifferentialCorrector, goal: impl Into<String>, value: f64) -> Self {
        Self {
            solver: solver.name.clone(),
            goal: goal.into(),
            value,
            tolerance: 0.1,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn script(&self) -> String {
        format!(
            "Achieve {}({} = {}, {{Tolerance = {}}});",
            self.solver, self.goal, self.value, self.tolerance,
        )
    }
}

/// One node of the mission sequence, atomic or block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    Propagate(Propagate),
    Maneuver(Maneuver),
    Report(Report),
    /// Halt execution of the mission. Stateless; construct it wherever it is
    /// needed.
    Stop,
    For(ForLoop),
    While(WhileLoop),
    If(IfBlock),
    Target(TargetBlock),
    Vary(Vary),
    Achieve(Achieve),
}

impl Step {
    /// Render this step. Block variants render header, children in order,
    /// closing marker; an empty body renders an empty block, which the
    /// engine accepts.
    #[must_use]
    pub fn script(&self) -> String {
        match self {
            Self::Propagate(s) => s.script(),
            Self::Maneuver(s) => s.script(),
            Self::Report(s) => s.script(),
            Self::Stop => "Stop;".to_string(),
            Self::For(block) => {
                let header = format!(
                    "For {} = {}:{}:{};",
                    block.variable, block.start, block.step, block.end
                );
                render_block(&header, &block.body, "EndFor;")
            }
            Self::While(block) => {
                render_block(&format!("While {}", block.condition.render()), &block.body, "EndWhile;")
            }
            Self::If(block) => {
                render_block(&format!("If {}", block.condition.render()), &block.body, "EndIf;")
            }
            Self::Target(block) => render_block(&block.header(), &block.body, "EndTarget;"),
            Self::Vary(s) => s.script(),
            Self::Achieve(s) => s.script(),
        }
    }
}

fn render_block(header: &str, body: &[Step], close: &str) -> String {
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(header.to_string());
    lines.extend(body.iter().map(Step::script));
    lines.push(close.to_string());
    lines.join("\n")
}

impl From<Propagate> for Step {
    fn from(s: Propagate) -> Self {
        Self::Propagate(s)
    }
}

impl From<Maneuver> for Step {
    fn from(s: Maneuver) -> Self {
        Self::Maneuver(s)
    }
}

impl From<Report> for Step {
    fn from(s: Report) -> Self {
        Self::Report(s)
    }
}

impl From<ForLoop> for Step {
    fn from(s: ForLoop) -> Self {
        Self::For(s)
    }
}

impl From<WhileLoop> for Step {
    fn from(s: WhileLoop) -> Self {
        Self::While(s)
    }
}

impl From<IfBlock> for Step {
    fn from(s: IfBlock) -> Self {
        Self::If(s)
    }
}

impl From<TargetBlock> for Step {
    fn from(s: TargetBlock) -> Self {
        Self::Target(s)
    }
}

impl From<Vary> for Step {
    fn from(s: Vary) -> Self {
        Self::Vary(s)
    }
}

impl From<Achieve> for Step {
    fn from(s: Achieve) -> Self {
        Self::Achieve(s)
    }
}

/// Propagate until the spacecraft reaches periapsis around `body`.
pub fn propagate_to_periapsis(
    spacecraft: &Spacecraft,
    propagator: &Propagator,
    body: &CelestialBody,
) -> Result<Propagate, ConfigError> {
    Ok(Propagate::new(
        propagator,
        &[spacecraft],
        vec![StopCondition::on(spacecraft.relative_to(body).periapsis())],
    )?
    .described("Propagate to Periapsis"))
}

/// Propagate until the spacecraft reaches apoapsis around `body`.
pub fn propagate_to_apoapsis(
    spacecraft: &Spacecraft,
    propagator: &Propagator,
    body: &CelestialBody,
) -> Result<Propagate, ConfigError> {
    Ok(Propagate::new(
        propagator,
        &[spacecraft],
        vec![StopCondition::on(spacecraft.relative_to(body).apoapsis())],
    )?
    .described("Propagate to Apoapsis"))
}
