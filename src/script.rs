//! Plan assembly and serialization.
//!
//! A [`Script`] owns one resource [`Registry`] and the top-level mission
//! sequence, and renders both into the single textual artifact the engine
//! consumes.

use std::io::Write;

use camino::Utf8PathBuf;
use tracing::{debug, warn};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};
use crate::mission::Step;
use crate::registry::Registry;
use crate::resources::Resource;

/// Sentinel line separating resource declarations from executable steps.
pub const SEQUENCE_SENTINEL: &str = "BeginMissionSequence;";

/// A complete mission plan: ordered resource declarations plus the mission
/// sequence. Sole owner of both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    registry: Registry,
    sequence: Vec<Step>,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a script from unordered resources and an ordered step sequence.
    /// Resources are category-ordered on the way in; the first unrecognized
    /// kind aborts construction.
    pub fn from_parts(
        resources: Vec<Resource>,
        sequence: Vec<Step>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Registry::new();
        for resource in resources {
            registry.insert(resource)?;
        }
        Ok(Self { registry, sequence })
    }

    /// Declare a resource, keeping the registry's category order.
    pub fn add_resource(&mut self, resource: impl Into<Resource>) -> Result<(), ConfigError> {
        self.registry.insert(resource)
    }

    /// Append a step to the top-level mission sequence.
    pub fn push_step(&mut self, step: impl Into<Step>) {
        self.sequence.push(step.into());
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn sequence(&self) -> &[Step] {
        &self.sequence
    }

    /// Render the full artifact text: resource declarations in registry
    /// order, the [`SEQUENCE_SENTINEL`], then each top-level step, separated
    /// by blank lines.
    ///
    /// Pure function of the script's state; serializing an unmodified script
    /// twice yields byte-identical output.
    ///
    /// The engine only accepts ASCII. Non-ASCII characters are dropped from
    /// the output, and the drop is reported with a warning carrying the
    /// dropped count; it is never silent.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut segments: Vec<String> = Vec::with_capacity(self.registry.len() + self.sequence.len() + 1);
        for resource in &self.registry {
            let rendered = resource.script();
            // Predefined frames render to nothing; skip them rather than
            // emitting bare separators.
            if !rendered.is_empty() {
                segments.push(rendered);
            }
        }
        segments.push(SEQUENCE_SENTINEL.to_string());
        for step in &self.sequence {
            segments.push(step.script());
        }

        let text = segments.join("\n\n");
        let ascii: String = text.chars().filter(char::is_ascii).collect();
        let dropped = text.chars().count() - ascii.chars().count();
        if dropped > 0 {
            warn!(dropped, "dropped non-ASCII characters during serialization");
        }
        ascii
    }

    /// Serialize to a fresh temporary `.script` file.
    ///
    /// The artifact is explicitly retained (never deleted by this layer) so
    /// it stays available for postmortem inspection after a failed run.
    pub fn write_artifact(&self) -> Result<Utf8PathBuf, Error> {
        let mut file = tempfile::Builder::new()
            .prefix("mission-")
            .suffix(".script")
            .tempfile()?;
        file.write_all(self.serialize().as_bytes())?;
        let (_, path) = file.keep().map_err(|e| Error::Io(e.error))?;
        let path = utf8_path(path)?;
        debug!(artifact = %path, "wrote mission artifact");
        Ok(path)
    }
}

/// Temp-file paths come back as `PathBuf`; everything downstream speaks
/// UTF-8 paths.
pub(crate) fn utf8_path(path: std::path::PathBuf) -> Result<Utf8PathBuf, std::io::Error> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("non-UTF-8 temp path: {}", p.display()),
        )
    })
}
