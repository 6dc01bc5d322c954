//! Orbit sampler: evaluate an element set over evenly spaced epochs.

use neo_kepler::SolverSettings;
use serde::Serialize;
use tracing::debug;

use crate::{CartesianPosition, OrbitError, OrbitalElements, Propagator};

/// Positions sampled at `start_jd + k * step_days`, in index order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    start_jd: f64,
    step_days: f64,
    positions: Vec<CartesianPosition>,
}

impl OrbitPath {
    pub fn start_jd(&self) -> f64 {
        self.start_jd
    }

    pub fn step_days(&self) -> f64 {
        self.step_days
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[CartesianPosition] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<CartesianPosition> {
        self.positions
    }

    /// Julian Date of sample `k`.
    pub fn epoch_at(&self, k: usize) -> f64 {
        sample_epoch(self.start_jd, self.step_days, k)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartesianPosition> {
        self.positions.iter()
    }

    /// Samples paired with their Julian Dates.
    pub fn iter_with_epochs(&self) -> impl Iterator<Item = (f64, &CartesianPosition)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(k, position)| (self.epoch_at(k), position))
    }
}

impl<'a> IntoIterator for &'a OrbitPath {
    type Item = &'a CartesianPosition;
    type IntoIter = std::slice::Iter<'a, CartesianPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[inline]
fn sample_epoch(start_jd: f64, step_days: f64, k: usize) -> f64 {
    start_jd + k as f64 * step_days
}

impl Propagator {
    /// Evaluate `step_count` epochs starting at `start_jd`.
    ///
    /// A zero count yields an empty path; negative steps walk backwards in time.
    pub fn sample(
        &self,
        start_jd: f64,
        step_days: f64,
        step_count: usize,
    ) -> Result<OrbitPath, OrbitError> {
        debug!(start_jd, step_days, step_count, "sampling orbit path");
        let positions = (0..step_count)
            .map(|k| self.position_at(sample_epoch(start_jd, step_days, k)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrbitPath {
            start_jd,
            step_days,
            positions,
        })
    }

    /// Parallel variant of [`Propagator::sample`]; the output order is unchanged.
    #[cfg(feature = "parallel")]
    pub fn sample_parallel(
        &self,
        start_jd: f64,
        step_days: f64,
        step_count: usize,
    ) -> Result<OrbitPath, OrbitError> {
        use rayon::prelude::*;

        debug!(start_jd, step_days, step_count, "sampling orbit path in parallel");
        let positions = (0..step_count)
            .into_par_iter()
            .map(|k| self.position_at(sample_epoch(start_jd, step_days, k)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrbitPath {
            start_jd,
            step_days,
            positions,
        })
    }
}

/// Sample `elements` at `start_jd + k * step_days` for `k = 0..step_count`.
pub fn sample(
    elements: &OrbitalElements,
    start_jd: f64,
    step_days: f64,
    step_count: usize,
) -> Result<OrbitPath, OrbitError> {
    Propagator::new(elements).sample(start_jd, step_days, step_count)
}

/// [`sample`] with explicit solver settings.
pub fn sample_with(
    elements: &OrbitalElements,
    start_jd: f64,
    step_days: f64,
    step_count: usize,
    settings: &SolverSettings,
) -> Result<OrbitPath, OrbitError> {
    Propagator::new(elements)
        .with_settings(*settings)
        .sample(start_jd, step_days, step_count)
}

/// One full revolution split into `step_count` evenly spaced samples.
pub fn sample_period(
    elements: &OrbitalElements,
    start_jd: f64,
    step_count: usize,
) -> Result<OrbitPath, OrbitError> {
    let propagator = Propagator::new(elements);
    let step_days = if step_count == 0 {
        0.0
    } else {
        propagator.period_days() / step_count as f64
    };
    propagator.sample(start_jd, step_days, step_count)
}

/// [`sample`] spread across the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn sample_parallel(
    elements: &OrbitalElements,
    start_jd: f64,
    step_days: f64,
    step_count: usize,
) -> Result<OrbitPath, OrbitError> {
    Propagator::new(elements).sample_parallel(start_jd, step_days, step_count)
}
