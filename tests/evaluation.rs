use std::f64::consts::TAU;

use neo_orbit_kernel::orbits::{
    AnomalyReference, CartesianPosition, ElementRecord, ElementsError, OrbitError,
    OrbitalElements, PerifocalRotation, Propagator, evaluate, evaluate_record, evaluate_with,
    orbital_period_days,
};
use chrono::NaiveDate;
use neo_orbit_kernel::time::julian_date_from_datetime;
use neo_orbit_kernel::{
    KernelError, SolverSettings, evaluate_at, evaluate_at_datetime, to_julian_date, version,
};

const A: f64 = 3.158_873_42;
const E: f64 = 0.117_637_35;
const I: f64 = 7.010_628_8;
const NODE: f64 = 328.860_282;
const PERI: f64 = 308.599_079;
const M0: f64 = 298.849_797_6;
const EPOCH: f64 = 2_461_000.5;

fn reference_elements() -> OrbitalElements {
    OrbitalElements::new(A, E, I, NODE, PERI, AnomalyReference::mean_anomaly(M0, EPOCH))
        .expect("valid elements")
}

fn assert_close(actual: CartesianPosition, expected: [f64; 3], tol: f64) {
    let a = actual.to_array();
    for k in 0..3 {
        assert!(
            (a[k] - expected[k]).abs() < tol,
            "component {k}: {} vs {} ({actual:?})",
            a[k],
            expected[k]
        );
    }
}

#[test]
fn reference_scenario_matches_double_precision_values() {
    let position = evaluate(&reference_elements(), 2_460_600.5).expect("evaluate");
    assert_close(
        position,
        [-2.504_974_463_353_158_8, 2.336_200_261_654_156, 0.086_595_652_628_072],
        1e-6,
    );
}

#[test]
fn reference_scenario_at_osculation_epoch() {
    let position = evaluate(&reference_elements(), EPOCH).expect("evaluate");
    assert_close(
        position,
        [-2.751_873_706_054_072, -1.196_767_464_555_178, -0.300_962_743_374_411_87],
        1e-6,
    );
}

#[test]
fn mean_anomaly_zero_and_perihelion_passage_agree() {
    let t = 2_460_123.25;
    let by_mean = OrbitalElements::new(A, E, I, NODE, PERI, AnomalyReference::mean_anomaly(0.0, t))
        .unwrap();
    let by_tp = OrbitalElements::new(A, E, I, NODE, PERI, AnomalyReference::perihelion(t)).unwrap();
    assert_eq!(evaluate(&by_mean, t).unwrap(), evaluate(&by_tp, t).unwrap());
}

#[test]
fn mean_anomaly_wraps_after_one_period() {
    let propagator = Propagator::new(&reference_elements());
    let t = 2_460_600.5;
    let period = orbital_period_days(A);
    assert!((period - propagator.period_days()).abs() < 1e-9);

    let before = propagator.unreduced_mean_anomaly(t);
    let after = propagator.unreduced_mean_anomaly(t + period);
    let turns = (after - before) / TAU;
    assert!((turns - turns.round()).abs() < 1e-9, "turns = {turns}");
    assert!((propagator.mean_anomaly(t) - propagator.mean_anomaly(t + period)).abs() < 1e-9);
}

#[test]
fn radius_stays_between_apsides() {
    let elements = reference_elements();
    let propagator = Propagator::new(&elements);
    for k in 0..200 {
        let state = propagator.state_at(EPOCH + k as f64 * 11.0).unwrap();
        assert!(state.radius_au >= elements.perihelion_distance_au() - 1e-12);
        assert!(state.radius_au <= elements.aphelion_distance_au() + 1e-12);
        assert!((state.position.norm() - state.radius_au).abs() < 1e-12);
    }
}

#[test]
fn positions_lie_in_the_rotated_orbit_plane() {
    let elements = reference_elements();
    let normal = PerifocalRotation::from_elements(&elements).orbit_normal();
    for k in 0..50 {
        let p = evaluate(&elements, EPOCH + k as f64 * 37.0).unwrap().to_array();
        let off_plane = p[0] * normal[0] + p[1] * normal[1] + p[2] * normal[2];
        assert!(off_plane.abs() < 1e-12, "off-plane {off_plane}");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let elements = reference_elements();
    let first = evaluate(&elements, 2_460_777.125).unwrap();
    for _ in 0..10 {
        assert_eq!(evaluate(&elements, 2_460_777.125).unwrap(), first);
    }
}

#[test]
fn starved_solver_surfaces_convergence_error() {
    let elements = OrbitalElements::new(
        1.0,
        0.999_999,
        0.0,
        0.0,
        0.0,
        AnomalyReference::mean_anomaly(170.0, 2_460_000.5),
    )
    .unwrap();
    let settings = SolverSettings::default().with_max_iterations(1);
    let result = evaluate_with(&elements, 2_460_000.5, &settings);
    assert!(matches!(result, Err(OrbitError::Solver(_))), "{result:?}");
}

#[test]
fn hyperbolic_record_is_rejected_before_evaluation() {
    let record = ElementRecord {
        a: 1.2,
        e: 1.05,
        i: 0.0,
        om: 0.0,
        w: 0.0,
        tp: Some(2_460_000.5),
        ma: None,
        epoch: None,
    };
    assert_eq!(
        evaluate_record(&record, 2_460_000.5),
        Err(OrbitError::InvalidElements(
            ElementsError::EccentricityOutOfRange { value: 1.05 }
        ))
    );
}

#[test]
fn record_without_anomaly_reference_is_rejected() {
    let record = ElementRecord {
        a: 1.2,
        e: 0.1,
        i: 0.0,
        om: 0.0,
        w: 0.0,
        tp: None,
        ma: Some(10.0),
        epoch: None,
    };
    assert_eq!(
        evaluate_record(&record, 2_460_000.5),
        Err(OrbitError::InvalidElements(
            ElementsError::MissingAnomalyReference
        ))
    );
}

#[test]
fn elements_deserialize_through_database_record() {
    let json = r#"{"a": 3.15887342, "e": 0.11763735, "i": 7.0106288, "om": 328.860282,
                   "w": 308.599079, "ma": 298.8497976, "epoch": 2461000.5}"#;
    let elements: OrbitalElements = serde_json::from_str(json).expect("elements");
    assert_eq!(elements, reference_elements());

    let bad = r#"{"a": -1.0, "e": 0.1, "i": 0.0, "om": 0.0, "w": 0.0, "tp": 0.0}"#;
    let err = serde_json::from_str::<OrbitalElements>(bad).unwrap_err();
    assert!(err.to_string().contains("semi-major axis"), "{err}");
}

#[test]
fn calendar_epochs_feed_the_evaluator() {
    let elements = reference_elements();
    let jd = to_julian_date(2024, 10, 23, 0.0, 0.0, 0.0);
    assert_eq!(jd, 2_460_606.5);
    let by_string = evaluate_at(&elements, "2024-10-23").unwrap();
    assert_eq!(by_string, evaluate(&elements, jd).unwrap());
    assert!(matches!(
        evaluate_at(&elements, "someday"),
        Err(KernelError::Time(_))
    ));
}

#[test]
fn chrono_timestamps_feed_the_evaluator() {
    let elements = reference_elements();
    let datetime = NaiveDate::from_ymd_opt(2024, 10, 23)
        .unwrap()
        .and_hms_opt(17, 45, 30)
        .unwrap();
    let jd = julian_date_from_datetime(&datetime);
    assert!((jd - to_julian_date(2024, 10, 23, 17.0, 45.0, 30.0)).abs() < 1e-9);

    let position = evaluate_at_datetime(&elements, &datetime).unwrap();
    assert_eq!(position, evaluate(&elements, jd).unwrap());
    assert_ne!(position, evaluate(&elements, 2_460_606.5).unwrap());
}

#[test]
fn library_reports_package_version() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    assert!(!version().is_empty());
}
