//! Device — a grouping of sensors placed in a room.

use serde::{Deserialize, Serialize};

use crate::error::{HomesimError, ValidationError};
use crate::id::{ContainerId, DeviceId};
use crate::room::RoomKind;

/// The device archetypes a room template can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    EnvironmentalMonitor,
    LightControl,
    SecuritySystem,
    SafetyMonitor,
}

impl DeviceKind {
    /// Human-readable label, also used when composing device names.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnvironmentalMonitor => "Environmental Monitor",
            Self::LightControl => "Light Control",
            Self::SecuritySystem => "Security System",
            Self::SafetyMonitor => "Safety Monitor",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Run status of a device; part of the state saved into scenario snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Running,
    #[default]
    Stopped,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}

/// A simulated device belonging to a scenario container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub container_id: ContainerId,
    pub name: String,
    pub kind: DeviceKind,
    pub room: RoomKind,
    pub status: DeviceStatus,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HomesimError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    container_id: Option<ContainerId>,
    name: Option<String>,
    kind: Option<DeviceKind>,
    room: Option<RoomKind>,
    status: Option<DeviceStatus>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn container_id(mut self, container_id: ContainerId) -> Self {
        self.container_id = Some(container_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn room(mut self, room: RoomKind) -> Self {
        self.room = Some(room);
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Device, HomesimError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            container_id: self.container_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or(DeviceKind::EnvironmentalMonitor),
            room: self.room.unwrap_or(RoomKind::LivingRoom),
            status: self.status.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}
