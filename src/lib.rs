//! gmatkit - mission-plan assembly and dispatch for the GMAT console engine
//!
//! This crate builds GMAT mission scripts programmatically (configuration
//! resources plus a sequential/branching mission sequence), hands them to an
//! external `GmatConsole` process for execution, and reads back tabular
//! report output. All physics happens in the engine; this layer owns the
//! assembly ordering rules, the script contract, and the dispatch/failure
//! semantics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gmatkit::dispatch::Dispatch;
//! use gmatkit::mission::{Propagate, StopCondition};
//! use gmatkit::report::{ReportReader, keplerian_headers};
//! use gmatkit::resources::{
//!     Axes, CelestialBody, CoordinateSystem, ForceModel, GravityField, KeplerianState,
//!     Propagator, Spacecraft, State,
//! };
//! use gmatkit::script::Script;
//!
//! # fn main() -> Result<(), gmatkit::Error> {
//! let luna = CelestialBody::luna();
//! let frame = CoordinateSystem::new("MoonMJ2000Eq", &luna, Some(Axes::MJ2000Eq))?;
//! let sat = Spacecraft::new(
//!     "Sat1",
//!     State::Keplerian(KeplerianState::new(2000.0, 0.0, 45.0, 90.0, 135.0, 180.0)),
//! )
//! .with_coordinate_system(&frame);
//! let model = ForceModel::new("LunaForceModel", GravityField::moon(20, 20), &luna)
//!     .with_point_masses(&[CelestialBody::earth()]);
//! let prop = Propagator::new("DefaultProp", &model);
//!
//! let mut fields = vec![sat.elapsed_secs()];
//! fields.extend(keplerian_headers(&sat, &frame));
//! let reader = ReportReader::temp(fields)?;
//!
//! let script = Script::from_parts(
//!     vec![
//!         frame.into(),
//!         sat.clone().into(),
//!         model.into(),
//!         prop.clone().into(),
//!         reader.sink().clone().into(),
//!     ],
//!     vec![
//!         Propagate::new(&prop, &[&sat], vec![StopCondition::at(sat.elapsed_secs(), 12000.0)])?
//!             .into(),
//!     ],
//! )?;
//!
//! let session = Dispatch::new()?;
//! session.build_and_run(&script)?;
//! for row in reader.load()?.rows() {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Failure semantics
//!
//! Builder input is validated at construction ([`error::ConfigError`]);
//! nonzero engine exits surface as [`error::DispatchError`] carrying the
//! session log path for external diagnosis; malformed result files surface
//! as [`error::ReportError`]. Batch failures carry no per-plan attribution.
//! This layer never retries and never parses engine diagnostics.
//!
//! # Logging
//!
//! The crate logs through [`tracing`]; installing a subscriber is the
//! caller's choice.

pub mod dispatch;
pub mod error;
pub mod mission;
pub mod parallel;
pub mod registry;
pub mod report;
pub mod resources;
pub mod script;

pub use dispatch::Dispatch;
pub use error::{ConfigError, DispatchError, Error, ReportError};
pub use mission::Step;
pub use parallel::{partition, run_batches};
pub use registry::{Category, Registry};
pub use report::{ReportReader, ReportTable, parse_report};
pub use resources::Resource;
pub use script::{SEQUENCE_SENTINEL, Script};
