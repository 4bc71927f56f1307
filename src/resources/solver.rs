//! Differential corrector resources for solver blocks.
//!
//! The iteration itself is performed entirely by the engine; this type only
//! declares the corrector and its tuning.

use serde::{Deserialize, Serialize};

/// Root-finding algorithm used by the corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    NewtonRaphson,
    Broyden,
    ModifiedBroyden,
}

impl Algorithm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewtonRaphson => "NewtonRaphson",
            Self::Broyden => "Broyden",
            Self::ModifiedBroyden => "ModifiedBroyden",
        }
    }
}

/// Finite-difference scheme for Jacobian estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivativeMethod {
    CentralDifference,
    ForwardDifference,
    BackwardDifference,
}

impl DerivativeMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CentralDifference => "CentralDifference",
            Self::ForwardDifference => "ForwardDifference",
            Self::BackwardDifference => "BackwardDifference",
        }
    }
}

/// Iterative corrector referenced by target blocks and their vary/achieve
/// directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialCorrector {
    pub name: String,
    pub algorithm: Algorithm,
    pub max_iterations: u32,
    pub derivative_method: DerivativeMethod,
}

impl DifferentialCorrector {
    /// Newton-Raphson, 25 iterations, forward differences.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            algorithm: Algorithm::NewtonRaphson,
            max_iterations: 25,
            derivative_method: DerivativeMethod::ForwardDifference,
        }
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_derivative_method(mut self, method: DerivativeMethod) -> Self {
        self.derivative_method = method;
        self
    }

    #[must_use]
    pub fn script(&self) -> String {
        format!(
            "Create DifferentialCorrector {name};\n\
             GMAT {name}.ShowProgress       = false;\n\
             GMAT {name}.MaximumIterations  = {};\n\
             GMAT {name}.DerivativeMethod   = {};\n\
             GMAT {name}.Algorithm          = {};",
            self.max_iterations,
            self.derivative_method.as_str(),
            self.algorithm.as_str(),
            name = self.name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrector_defaults() {
        let dc = DifferentialCorrector::new("DC");
        assert_eq!(
            dc.script(),
            "Create DifferentialCorrector DC;\n\
             GMAT DC.ShowProgress       = false;\n\
             GMAT DC.MaximumIterations  = 25;\n\
             GMAT DC.DerivativeMethod   = ForwardDifference;\n\
             GMAT DC.Algorithm          = NewtonRaphson;"
        );
    }

    #[test]
    fn test_corrector_overrides() {
        let dc = DifferentialCorrector::new("DC")
            .with_algorithm(Algorithm::Broyden)
            .with_max_iterations(50)
            .with_derivative_method(DerivativeMethod::CentralDifference);
        let script = dc.script();
        assert!(script.contains("MaximumIterations  = 50;"));
        assert!(script.contains("Algorithm          = Broyden;"));
    }
}
