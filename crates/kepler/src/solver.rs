//! Elliptic Kepler equation `M = E - e sin E`.

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::{KeplerError, SolverSettings};

/// Solve for the eccentric anomaly using the default settings.
///
/// `mean_anomaly` is expected in `[0, 2π)`; reduce it before calling.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    solve_eccentric_anomaly_with(mean_anomaly, eccentricity, &SolverSettings::default())
}

/// Solve for the eccentric anomaly by Newton-Raphson iteration.
///
/// Returns [`KeplerError::Convergence`] when `settings.max_iterations` steps
/// do not bring the correction below `settings.tolerance`.
pub fn solve_eccentric_anomaly_with(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: &SolverSettings,
) -> Result<f64, KeplerError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(KeplerError::InvalidEccentricity { eccentricity });
    }
    settings.validate()?;

    let mut ecc_anomaly = if eccentricity < settings.high_eccentricity_threshold {
        mean_anomaly
    } else {
        PI
    };

    let mut last_step = f64::NAN;
    for iteration in 1..=settings.max_iterations {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * ecc_anomaly.cos();
        let step = f / f_prime;
        ecc_anomaly -= step;
        last_step = step;
        if step.abs() < settings.tolerance {
            trace!(iteration, ecc_anomaly, "kepler solver converged");
            return Ok(ecc_anomaly);
        }
    }

    debug!(
        mean_anomaly,
        eccentricity,
        iterations = settings.max_iterations,
        last_step,
        "kepler solver exhausted its iteration budget"
    );
    Err(KeplerError::Convergence {
        mean_anomaly,
        eccentricity,
        iterations: settings.max_iterations,
        last_step,
    })
}

/// Kepler's equation evaluated forward: mean anomaly from eccentric anomaly.
#[inline]
pub fn mean_from_eccentric(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    ecc_anomaly - eccentricity * ecc_anomaly.sin()
}

/// True anomaly from eccentric anomaly.
///
/// The half-angle `atan2` form stays well conditioned for all `0 <= e < 1`
/// and needs no quadrant fix-up.
#[inline]
pub fn true_from_eccentric(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let half = ecc_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
        .atan2((1.0 - eccentricity).sqrt() * half.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    #[test]
    fn circular_orbit_returns_mean_anomaly_exactly() {
        for m in [0.0, 0.3, 1.0, PI, 4.5, TAU - 1e-9] {
            assert_eq!(solve_eccentric_anomaly(m, 0.0).unwrap(), m);
        }
    }

    #[test]
    fn high_eccentricity_starts_from_pi() {
        let e = 0.95;
        let m = 0.2;
        let ecc = solve_eccentric_anomaly(m, e).unwrap();
        assert!((mean_from_eccentric(ecc, e) - m).abs() < 1e-10);
    }

    #[test]
    fn single_iteration_near_parabolic_fails_loudly() {
        let settings = SolverSettings::default().with_max_iterations(1);
        let err = solve_eccentric_anomaly_with(PI - 0.25, 0.999_999, &settings).unwrap_err();
        match err {
            KeplerError::Convergence {
                iterations,
                last_step,
                ..
            } => {
                assert_eq!(iterations, 1);
                assert!(last_step.abs() >= settings.tolerance);
            }
            other => panic!("expected convergence error, got {other:?}"),
        }
    }

    #[test]
    fn zero_iteration_budget_never_converges() {
        let settings = SolverSettings::default().with_max_iterations(0);
        assert!(matches!(
            solve_eccentric_anomaly_with(1.0, 0.1, &settings),
            Err(KeplerError::Convergence { .. })
        ));
    }

    #[test]
    fn rejects_unbound_eccentricities() {
        for e in [1.0, 1.5, -0.1, f64::NAN] {
            assert!(matches!(
                solve_eccentric_anomaly(1.0, e),
                Err(KeplerError::InvalidEccentricity { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let settings = SolverSettings::default().with_tolerance(0.0);
        assert!(matches!(
            solve_eccentric_anomaly_with(1.0, 0.1, &settings),
            Err(KeplerError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn true_anomaly_at_apsides() {
        assert_eq!(true_from_eccentric(0.0, 0.5), 0.0);
        assert!((true_from_eccentric(PI, 0.5) - PI).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_solution_satisfies_kepler_equation(m in 0.0..TAU, e in 0.0..0.99f64) {
            let ecc = solve_eccentric_anomaly(m, e).unwrap();
            prop_assert!((mean_from_eccentric(ecc, e) - m).abs() < 1e-10);
        }

        #[test]
        fn prop_circular_orbit_is_identity(m in 0.0..TAU) {
            prop_assert_eq!(solve_eccentric_anomaly(m, 0.0).unwrap(), m);
        }
    }
}
