//! Scalar engine variables.

use serde::{Deserialize, Serialize};

/// A named scalar variable, usable as a loop counter or report field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn script(&self) -> String {
        format!("Create Variable {};", self.name)
    }
}
