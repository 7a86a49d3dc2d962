//! Error definition — an injected data-quality fault on a sensor.
//!
//! Faults are part of a sensor's saved state: a scenario snapshot carries
//! them so reactivation restores the exact fault configuration.

use serde::{Deserialize, Serialize};

/// A data-quality fault injected into a sensor's readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDefinition {
    /// Spikes above or below the plausible band.
    Anomaly {
        probability_pos: f64,
        probability_neg: f64,
    },
    /// Values missing completely at random.
    Mcar { probability: f64 },
    /// The same reading reported twice.
    DuplicateData { probability: f64 },
    /// Slow unbounded offset accumulating over time.
    Drift { average_drift_rate: f64 },
}

impl std::fmt::Display for ErrorDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anomaly { .. } => f.write_str("anomaly"),
            Self::Mcar { .. } => f.write_str("mcar"),
            Self::DuplicateData { .. } => f.write_str("duplicate_data"),
            Self::Drift { .. } => f.write_str("drift"),
        }
    }
}
