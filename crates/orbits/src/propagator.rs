//! Orbit evaluator: elements + Julian Date to heliocentric ecliptic position.

use std::f64::consts::TAU;

use neo_core::angle::reduce_radians;
use neo_core::constants::GAUSSIAN_K;
use neo_core::units::deg_to_rad;
use neo_kepler::{SolverSettings, solve_eccentric_anomaly_with, true_from_eccentric};
use serde::Serialize;

use crate::{
    AnomalyReference, CartesianPosition, ElementRecord, OrbitError, OrbitalElements,
    PerifocalRotation,
};

/// Mean motion `n = k / a^1.5` in radians per day.
pub fn mean_motion(semi_major_axis_au: f64) -> f64 {
    GAUSSIAN_K / semi_major_axis_au.powf(1.5)
}

/// Sidereal period `2π / n` in days.
pub fn orbital_period_days(semi_major_axis_au: f64) -> f64 {
    TAU / mean_motion(semi_major_axis_au)
}

/// Intermediate quantities of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitState {
    pub epoch_jd: f64,
    /// Mean anomaly reduced into `[0, 2π)` (radians).
    pub mean_anomaly: f64,
    pub eccentric_anomaly: f64,
    pub true_anomaly: f64,
    pub radius_au: f64,
    pub position: CartesianPosition,
}

/// Evaluator bound to one element set.
///
/// Mean motion and the rotation matrix are computed once, so repeated
/// evaluations only pay for the Kepler solve.
#[derive(Debug, Clone, Copy)]
pub struct Propagator {
    elements: OrbitalElements,
    mean_motion: f64,
    rotation: PerifocalRotation,
    settings: SolverSettings,
}

impl Propagator {
    pub fn new(elements: &OrbitalElements) -> Self {
        Self {
            elements: *elements,
            mean_motion: mean_motion(elements.semi_major_axis_au()),
            rotation: PerifocalRotation::from_elements(elements),
            settings: SolverSettings::default(),
        }
    }

    pub fn with_settings(self, settings: SolverSettings) -> Self {
        Self { settings, ..self }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn period_days(&self) -> f64 {
        TAU / self.mean_motion
    }

    pub fn rotation(&self) -> &PerifocalRotation {
        &self.rotation
    }

    /// Mean anomaly at `target_jd` in radians, before reduction into `[0, 2π)`.
    pub fn unreduced_mean_anomaly(&self, target_jd: f64) -> f64 {
        match self.elements.anomaly() {
            AnomalyReference::PerihelionPassage { time_jd } => {
                self.mean_motion * (target_jd - time_jd)
            }
            AnomalyReference::MeanAnomalyAtEpoch {
                mean_anomaly_deg,
                epoch_jd,
            } => deg_to_rad(mean_anomaly_deg) + self.mean_motion * (target_jd - epoch_jd),
        }
    }

    /// Mean anomaly at `target_jd` reduced into `[0, 2π)`.
    pub fn mean_anomaly(&self, target_jd: f64) -> f64 {
        reduce_radians(self.unreduced_mean_anomaly(target_jd))
    }

    /// Full evaluation including the intermediate anomalies.
    pub fn state_at(&self, target_jd: f64) -> Result<OrbitState, OrbitError> {
        if !target_jd.is_finite() {
            return Err(OrbitError::NonFiniteEpoch(target_jd));
        }

        let a = self.elements.semi_major_axis_au();
        let e = self.elements.eccentricity();

        let mean_anomaly = self.mean_anomaly(target_jd);
        let eccentric_anomaly = solve_eccentric_anomaly_with(mean_anomaly, e, &self.settings)?;
        let true_anomaly = true_from_eccentric(eccentric_anomaly, e);
        let radius_au = a * (1.0 - e * eccentric_anomaly.cos());

        let x_pf = radius_au * true_anomaly.cos();
        let y_pf = radius_au * true_anomaly.sin();
        let position = CartesianPosition::from(self.rotation.apply_in_plane(x_pf, y_pf));

        Ok(OrbitState {
            epoch_jd: target_jd,
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly,
            radius_au,
            position,
        })
    }

    /// Heliocentric ecliptic position (AU) at `target_jd`.
    pub fn position_at(&self, target_jd: f64) -> Result<CartesianPosition, OrbitError> {
        self.state_at(target_jd).map(|state| state.position)
    }
}

/// Evaluate the position of `elements` at `target_jd` with default solver settings.
pub fn evaluate(
    elements: &OrbitalElements,
    target_jd: f64,
) -> Result<CartesianPosition, OrbitError> {
    Propagator::new(elements).position_at(target_jd)
}

/// Evaluate the position of `elements` at `target_jd` with explicit solver settings.
pub fn evaluate_with(
    elements: &OrbitalElements,
    target_jd: f64,
    settings: &SolverSettings,
) -> Result<CartesianPosition, OrbitError> {
    Propagator::new(elements)
        .with_settings(*settings)
        .position_at(target_jd)
}

/// Validate a raw database record and evaluate it in one step.
pub fn evaluate_record(
    record: &ElementRecord,
    target_jd: f64,
) -> Result<CartesianPosition, OrbitError> {
    let elements = OrbitalElements::try_from(*record)?;
    evaluate(&elements, target_jd)
}
