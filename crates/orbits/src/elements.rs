//! Classical orbital elements as published by small-body databases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an element set is rejected before any propagation happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ElementsError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("semi-major axis must be positive, got {value} AU")]
    NonPositiveSemiMajorAxis { value: f64 },
    #[error("eccentricity {value} is outside [0, 1); only elliptic orbits are supported")]
    EccentricityOutOfRange { value: f64 },
    #[error("neither a perihelion passage time nor a mean anomaly with its epoch was supplied")]
    MissingAnomalyReference,
}

/// Where the body sits on its orbit at a known instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnomalyReference {
    /// Julian Date of perihelion passage (`tp`).
    PerihelionPassage { time_jd: f64 },
    /// Mean anomaly in degrees (`ma`) at the osculation epoch (JD).
    MeanAnomalyAtEpoch { mean_anomaly_deg: f64, epoch_jd: f64 },
}

impl AnomalyReference {
    pub fn perihelion(time_jd: f64) -> Self {
        AnomalyReference::PerihelionPassage { time_jd }
    }

    pub fn mean_anomaly(mean_anomaly_deg: f64, epoch_jd: f64) -> Self {
        AnomalyReference::MeanAnomalyAtEpoch {
            mean_anomaly_deg,
            epoch_jd,
        }
    }

    /// Pick the anomaly reference from optional database fields.
    ///
    /// A perihelion passage time wins when present; otherwise both the mean
    /// anomaly and its epoch are required.
    pub fn resolve(
        perihelion_jd: Option<f64>,
        mean_anomaly_deg: Option<f64>,
        epoch_jd: Option<f64>,
    ) -> Result<Self, ElementsError> {
        match (perihelion_jd, mean_anomaly_deg, epoch_jd) {
            (Some(tp), _, _) => Ok(Self::perihelion(tp)),
            (None, Some(ma), Some(epoch)) => Ok(Self::mean_anomaly(ma, epoch)),
            _ => Err(ElementsError::MissingAnomalyReference),
        }
    }

    fn check_finite(&self) -> Result<(), ElementsError> {
        match *self {
            AnomalyReference::PerihelionPassage { time_jd } => finite("tp", time_jd),
            AnomalyReference::MeanAnomalyAtEpoch {
                mean_anomaly_deg,
                epoch_jd,
            } => {
                finite("ma", mean_anomaly_deg)?;
                finite("epoch", epoch_jd)
            }
        }
    }
}

/// Database-shaped element record with the usual short field names.
///
/// Angles are in degrees, `a` in AU, `tp` and `epoch` are Julian Dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    #[serde(alias = "semi_major_axis_au")]
    pub a: f64,
    #[serde(alias = "eccentricity")]
    pub e: f64,
    #[serde(alias = "inclination_deg")]
    pub i: f64,
    #[serde(alias = "ascending_node_deg")]
    pub om: f64,
    #[serde(alias = "periapsis_argument_deg")]
    pub w: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "perihelion_jd")]
    pub tp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "mean_anomaly_deg")]
    pub ma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "epoch_jd")]
    pub epoch: Option<f64>,
}

/// Validated two-body elliptic orbit.
///
/// Construction rejects `a <= 0`, `e` outside `[0, 1)` and non-finite inputs,
/// so every value of this type can be propagated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord", into = "ElementRecord")]
pub struct OrbitalElements {
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    periapsis_argument_deg: f64,
    anomaly: AnomalyReference,
}

impl OrbitalElements {
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        periapsis_argument_deg: f64,
        anomaly: AnomalyReference,
    ) -> Result<Self, ElementsError> {
        finite("a", semi_major_axis_au)?;
        finite("e", eccentricity)?;
        finite("i", inclination_deg)?;
        finite("om", ascending_node_deg)?;
        finite("w", periapsis_argument_deg)?;
        anomaly.check_finite()?;

        if semi_major_axis_au <= 0.0 {
            return Err(ElementsError::NonPositiveSemiMajorAxis {
                value: semi_major_axis_au,
            });
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ElementsError::EccentricityOutOfRange {
                value: eccentricity,
            });
        }

        Ok(Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            ascending_node_deg,
            periapsis_argument_deg,
            anomaly,
        })
    }

    pub fn semi_major_axis_au(&self) -> f64 {
        self.semi_major_axis_au
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn ascending_node_deg(&self) -> f64 {
        self.ascending_node_deg
    }

    pub fn periapsis_argument_deg(&self) -> f64 {
        self.periapsis_argument_deg
    }

    pub fn anomaly(&self) -> AnomalyReference {
        self.anomaly
    }

    /// Perihelion distance `q = a (1 - e)` in AU.
    pub fn perihelion_distance_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a (1 + e)` in AU.
    pub fn aphelion_distance_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }
}

impl TryFrom<ElementRecord> for OrbitalElements {
    type Error = ElementsError;

    fn try_from(record: ElementRecord) -> Result<Self, Self::Error> {
        let anomaly = AnomalyReference::resolve(record.tp, record.ma, record.epoch)?;
        OrbitalElements::new(record.a, record.e, record.i, record.om, record.w, anomaly)
    }
}

impl From<OrbitalElements> for ElementRecord {
    fn from(value: OrbitalElements) -> Self {
        let (tp, ma, epoch) = match value.anomaly {
            AnomalyReference::PerihelionPassage { time_jd } => (Some(time_jd), None, None),
            AnomalyReference::MeanAnomalyAtEpoch {
                mean_anomaly_deg,
                epoch_jd,
            } => (None, Some(mean_anomaly_deg), Some(epoch_jd)),
        };
        ElementRecord {
            a: value.semi_major_axis_au,
            e: value.eccentricity,
            i: value.inclination_deg,
            om: value.ascending_node_deg,
            w: value.periapsis_argument_deg,
            tp,
            ma,
            epoch,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ElementsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ElementsError::NonFinite { field, value })
    }
}
