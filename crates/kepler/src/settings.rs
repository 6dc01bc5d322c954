use serde::{Deserialize, Serialize};

use crate::KeplerError;

/// Tunables for the Newton-Raphson iteration.
///
/// Lowering `tolerance` or `max_iterations` trades accuracy for speed. The
/// initial guess switches from `M` to `π` once the eccentricity reaches
/// `high_eccentricity_threshold`, which keeps the iteration from overshooting
/// on nearly parabolic ellipses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub tolerance: f64,
    pub max_iterations: u32,
    pub high_eccentricity_threshold: f64,
}

impl SolverSettings {
    pub const DEFAULT_TOLERANCE: f64 = 1e-12;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
    pub const DEFAULT_HIGH_ECCENTRICITY_THRESHOLD: f64 = 0.8;

    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Reject settings the iteration cannot honour.
    pub fn validate(&self) -> Result<(), KeplerError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(KeplerError::InvalidSettings {
                reason: format!("tolerance must be positive and finite, got {}", self.tolerance),
            });
        }
        if !self.high_eccentricity_threshold.is_finite() {
            return Err(KeplerError::InvalidSettings {
                reason: "high-eccentricity threshold must be finite".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            high_eccentricity_threshold: Self::DEFAULT_HIGH_ECCENTRICITY_THRESHOLD,
        }
    }
}
