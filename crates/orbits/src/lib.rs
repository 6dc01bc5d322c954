//! Two-body orbit kernel: classical elements to heliocentric ecliptic positions.
//!
//! Everything works in AU, days, and degrees on input (radians internally).
//! All functions are pure; identical inputs give bit-identical outputs.

pub mod elements;
pub mod position;
pub mod propagator;
pub mod rotation;
pub mod sampler;

pub use elements::{AnomalyReference, ElementRecord, ElementsError, OrbitalElements};
pub use neo_kepler::{KeplerError, SolverSettings};
pub use position::CartesianPosition;
pub use propagator::{
    OrbitState, Propagator, evaluate, evaluate_record, evaluate_with, mean_motion,
    orbital_period_days,
};
pub use rotation::PerifocalRotation;
#[cfg(feature = "parallel")]
pub use sampler::sample_parallel;
pub use sampler::{OrbitPath, sample, sample_period, sample_with};

use thiserror::Error;

/// Failures of the evaluator and sampler. Nothing is defaulted or extrapolated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("invalid orbital elements: {0}")]
    InvalidElements(#[from] ElementsError),
    #[error("target epoch must be a finite Julian Date, got {0}")]
    NonFiniteEpoch(f64),
    #[error(transparent)]
    Solver(#[from] KeplerError),
}
