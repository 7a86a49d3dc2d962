//! Trigger — a debounced predicate over a sensor reading.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::sensor::SensorKind;
use crate::time::Timestamp;

/// Minimum time between successive firings of the same trigger, in seconds.
pub const TRIGGER_DEBOUNCE_SECS: i64 = 5;

/// Inspectable condition over a numeric sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TriggerCondition {
    /// Fires when the reading exceeds the threshold.
    GreaterThan(f64),
    /// Fires when the reading drops below the threshold.
    LessThan(f64),
    /// Fires on an exact match (binary sensors).
    Equals(f64),
    /// Fires when the reading leaves the `[min, max]` band.
    OutsideRange { min: f64, max: f64 },
}

impl TriggerCondition {
    /// Evaluate the condition against a reading.
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        match self {
            Self::GreaterThan(threshold) => value > *threshold,
            Self::LessThan(threshold) => value < *threshold,
            Self::Equals(target) => (value - target).abs() < f64::EPSILON,
            Self::OutsideRange { min, max } => value < *min || value > *max,
        }
    }
}

impl std::fmt::Display for TriggerCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GreaterThan(t) => write!(f, "> {t}"),
            Self::LessThan(t) => write!(f, "< {t}"),
            Self::Equals(t) => write!(f, "== {t}"),
            Self::OutsideRange { min, max } => write!(f, "outside [{min}, {max}]"),
        }
    }
}

/// A condition over one sensor kind, rate-limited by a debounce window.
///
/// This is a **rate-limited edge trigger**: while the condition keeps
/// holding it re-fires once per debounce window, not just once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrigger {
    pub sensor_kind: SensorKind,
    pub condition: TriggerCondition,
    /// Optional filter: only readings from this device kind qualify.
    pub target_device: Option<DeviceKind>,
    /// Last successful (non-debounced) firing.
    pub last_fired: Option<Timestamp>,
}

impl EventTrigger {
    /// Create a trigger with no device filter.
    #[must_use]
    pub fn new(sensor_kind: SensorKind, condition: TriggerCondition) -> Self {
        Self {
            sensor_kind,
            condition,
            target_device: None,
            last_fired: None,
        }
    }

    /// Restrict the trigger to readings coming from one device kind.
    #[must_use]
    pub fn for_device(mut self, device: DeviceKind) -> Self {
        self.target_device = Some(device);
        self
    }

    /// Evaluate the condition; fire only when outside the debounce window.
    ///
    /// Updates `last_fired` on a successful firing.
    pub fn check(&mut self, value: f64, now: Timestamp) -> bool {
        if !self.condition.matches(value) {
            return false;
        }
        let debounced = self
            .last_fired
            .is_some_and(|last| now - last < Duration::seconds(TRIGGER_DEBOUNCE_SECS));
        if debounced {
            return false;
        }
        self.last_fired = Some(now);
        true
    }
}
