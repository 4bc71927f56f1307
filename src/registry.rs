//! Category classifier and ordered resource registry.
//!
//! The engine requires configuration objects to be declared in dependency
//! order: a propagator names its force model, a solver block names its
//! corrector, and so on. Rather than tracking the reference graph, the
//! registry orders declarations by a fixed category sequence that is a
//! topological order of every legal reference: variables first, output sinks
//! last. Insertion keeps categories non-decreasing and preserves insertion
//! order within a category.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resources::Resource;

/// Fixed, totally ordered declaration categories. The discriminant order is
/// the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Variable,
    Frame,
    Vehicle,
    Actuator,
    Dynamics,
    Integrator,
    Solver,
    Sink,
}

/// Kind-name to category table. Kinds absent from this table cannot be
/// ordered and are rejected at insertion time.
const KIND_CATEGORIES: [(&str, Category); 8] = [
    ("Variable", Category::Variable),
    ("CoordinateSystem", Category::Frame),
    ("Spacecraft", Category::Vehicle),
    ("ImpulsiveBurn", Category::Actuator),
    ("ForceModel", Category::Dynamics),
    ("Propagator", Category::Integrator),
    ("DifferentialCorrector", Category::Solver),
    ("ReportFile", Category::Sink),
];

/// Map an engine kind name to its declaration category.
pub fn classify(kind: &str) -> Result<Category, ConfigError> {
    KIND_CATEGORIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, c)| *c)
        .ok_or_else(|| ConfigError::UnrecognizedKind {
            kind: kind.to_string(),
        })
}

impl Resource {
    /// Declaration category of this resource.
    ///
    /// Built-in resource kinds always classify; only [`Resource::Custom`]
    /// can fail, when its kind string is not in the category table.
    pub fn category(&self) -> Result<Category, ConfigError> {
        classify(self.kind())
    }
}

/// Insert-only ordered collection of resources.
///
/// Invariant: categories are non-decreasing front to back, and resources of
/// equal category appear in insertion order. There is no removal operation;
/// a registry only grows for the life of its plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    entries: Vec<Resource>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource at the last position that keeps categories
    /// non-decreasing: immediately before the first entry of a strictly
    /// greater category, or at the end.
    ///
    /// Classification happens before any mutation, so a failed insert leaves
    /// the registry exactly as it was. Linear in the registry size, which is
    /// at most tens of entries for real plans.
    ///
    /// Resource names are not checked for uniqueness here; the engine
    /// rejects duplicate declarations when the plan runs.
    pub fn insert(&mut self, resource: impl Into<Resource>) -> Result<(), ConfigError> {
        let resource = resource.into();
        let category = resource.category()?;
        let position = self
            .entries
            .iter()
            .position(|existing| {
                // Entries already in the registry always classify.
                existing.category().is_ok_and(|c| c > category)
            })
            .unwrap_or(self.entries.len());
        self.entries.insert(position, resource);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
