//! Scenario snapshot — saved device/sensor state for a deactivated scenario.
//!
//! A snapshot is created (or overwritten) every time a scenario is
//! deactivated and consumed read-only on every activation. The engine never
//! deletes snapshots on its own; only an explicit scenario cleanup does.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::{ContainerId, DeviceId, SensorId};
use crate::device::DeviceStatus;
use crate::sensor::ErrorDefinition;

/// Saved state of one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub last_value: Option<f64>,
    pub error_definition: Option<ErrorDefinition>,
}

/// Saved state of one device and its sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub status: DeviceStatus,
    pub sensors: HashMap<SensorId, SensorSnapshot>,
}

/// Saved state of a whole scenario's device tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub container_id: ContainerId,
    pub devices: HashMap<DeviceId, DeviceSnapshot>,
}

impl ScenarioSnapshot {
    /// Create an empty snapshot for a container.
    #[must_use]
    pub fn new(container_id: ContainerId) -> Self {
        Self {
            container_id,
            devices: HashMap::new(),
        }
    }

    /// Record a device's status, returning its snapshot for sensor entries.
    pub fn record_device(&mut self, device_id: DeviceId, status: DeviceStatus) -> &mut DeviceSnapshot {
        self.devices.entry(device_id).or_insert_with(|| DeviceSnapshot {
            status,
            sensors: HashMap::new(),
        })
    }
}
