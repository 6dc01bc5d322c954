//! Small-body orbit kernel.
//!
//! Converts classical orbital elements (as published by small-body databases)
//! and a target epoch into heliocentric ecliptic positions, and samples such
//! positions into discretized orbit paths. The member crates are re-exported
//! here so front-ends (CLI, services, renderers) depend on one crate.

pub use neo_config as config;
pub use neo_core::{angle, constants, units, vector};
pub use neo_export as export;
pub use neo_kepler as kepler;
pub use neo_orbits as orbits;
pub use neo_time as time;

pub use neo_kepler::{KeplerError, SolverSettings, solve_eccentric_anomaly};
pub use neo_orbits::{
    AnomalyReference, CartesianPosition, OrbitError, OrbitPath, OrbitalElements, evaluate, sample,
};
pub use neo_time::{CalendarInstant, to_julian_date};

use chrono::NaiveDateTime;
use thiserror::Error;

/// Top-level error for the calendar-aware convenience entry points.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("epoch parsing failed: {0}")]
    Time(#[from] neo_time::TimeError),
    #[error("orbit evaluation failed: {0}")]
    Orbit(#[from] OrbitError),
}

/// Evaluate `elements` at an epoch given as a calendar string or Julian Date.
pub fn evaluate_at(
    elements: &OrbitalElements,
    epoch: &str,
) -> Result<CartesianPosition, KernelError> {
    let jd = neo_time::parse_julian_date(epoch)?;
    Ok(evaluate(elements, jd)?)
}

/// Evaluate `elements` at a chrono timestamp.
pub fn evaluate_at_datetime(
    elements: &OrbitalElements,
    datetime: &NaiveDateTime,
) -> Result<CartesianPosition, OrbitError> {
    evaluate(elements, neo_time::julian_date_from_datetime(datetime))
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
