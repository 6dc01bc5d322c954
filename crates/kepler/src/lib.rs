//! Kepler equation solver and anomaly conversions for elliptic orbits.

pub mod settings;
pub mod solver;

pub use settings::SolverSettings;
pub use solver::{
    mean_from_eccentric, solve_eccentric_anomaly, solve_eccentric_anomaly_with,
    true_from_eccentric,
};

use thiserror::Error;

/// Failures surfaced by the solver. None of them are retried internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeplerError {
    #[error(
        "kepler equation did not converge after {iterations} iterations \
         (M = {mean_anomaly}, e = {eccentricity}, last step = {last_step:e})"
    )]
    Convergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: u32,
        last_step: f64,
    },
    #[error("eccentricity {eccentricity} is outside the elliptic range [0, 1)")]
    InvalidEccentricity { eccentricity: f64 },
    #[error("invalid solver settings: {reason}")]
    InvalidSettings { reason: String },
}
