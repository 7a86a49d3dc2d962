//! Sensor — a single simulated measurement channel on a device.

mod error_definition;

pub use error_definition::ErrorDefinition;

use serde::{Deserialize, Serialize};

use crate::error::{HomesimError, ValidationError};
use crate::id::{DeviceId, SensorId};

/// The measurement kinds the simulator knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Brightness,
    ColorTemperature,
    Motion,
    DoorContact,
    WindowContact,
    Smoke,
    CarbonMonoxide,
}

impl SensorKind {
    /// Unit string attached to readings of this kind.
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity | Self::Brightness | Self::Motion | Self::Smoke => "%",
            Self::ColorTemperature => "K",
            Self::DoorContact | Self::WindowContact => "binary",
            Self::CarbonMonoxide => "ppm",
        }
    }

    /// Declared valid range; computed values are clamped into it.
    #[must_use]
    pub fn valid_range(&self) -> (f64, f64) {
        match self {
            Self::Temperature => (-10.0, 50.0),
            Self::Humidity | Self::Brightness | Self::Motion | Self::Smoke => (0.0, 100.0),
            Self::ColorTemperature => (2700.0, 6500.0),
            Self::DoorContact | Self::WindowContact => (0.0, 1.0),
            Self::CarbonMonoxide => (0.0, 1000.0),
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => f.write_str("temperature"),
            Self::Humidity => f.write_str("humidity"),
            Self::Brightness => f.write_str("brightness"),
            Self::ColorTemperature => f.write_str("color_temperature"),
            Self::Motion => f.write_str("motion"),
            Self::DoorContact => f.write_str("door_contact"),
            Self::WindowContact => f.write_str("window_contact"),
            Self::Smoke => f.write_str("smoke"),
            Self::CarbonMonoxide => f.write_str("carbon_monoxide"),
        }
    }
}

/// A single simulated sensor attached to a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub device_id: DeviceId,
    pub name: String,
    pub kind: SensorKind,
    /// Starting value handed to the generator when no baseline is cached.
    pub base_value: f64,
    /// Half-width of the uniform noise band.
    pub variation_range: f64,
    /// Maximum change per simulation step.
    pub change_rate: f64,
    /// Sampling interval in seconds.
    pub interval: u32,
    /// Most recent computed value, if any reading has happened yet.
    pub last_value: Option<f64>,
    /// Optional injected data-quality fault.
    pub error_definition: Option<ErrorDefinition>,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `variation_range` is negative ([`ValidationError::NegativeVariation`])
    pub fn validate(&self) -> Result<(), HomesimError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.variation_range < 0.0 {
            return Err(ValidationError::NegativeVariation.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Sensor`].
#[derive(Debug, Default)]
pub struct SensorBuilder {
    id: Option<SensorId>,
    device_id: Option<DeviceId>,
    name: Option<String>,
    kind: Option<SensorKind>,
    base_value: Option<f64>,
    variation_range: Option<f64>,
    change_rate: Option<f64>,
    interval: Option<u32>,
    error_definition: Option<ErrorDefinition>,
}

impl SensorBuilder {
    #[must_use]
    pub fn id(mut self, id: SensorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: SensorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn base_value(mut self, base_value: f64) -> Self {
        self.base_value = Some(base_value);
        self
    }

    #[must_use]
    pub fn variation_range(mut self, variation_range: f64) -> Self {
        self.variation_range = Some(variation_range);
        self
    }

    #[must_use]
    pub fn change_rate(mut self, change_rate: f64) -> Self {
        self.change_rate = Some(change_rate);
        self
    }

    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn error_definition(mut self, error_definition: ErrorDefinition) -> Self {
        self.error_definition = Some(error_definition);
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] if required fields are missing
    /// or invalid.
    pub fn build(self) -> Result<Sensor, HomesimError> {
        let kind = self.kind.unwrap_or(SensorKind::Temperature);
        let sensor = Sensor {
            id: self.id.unwrap_or_default(),
            device_id: self.device_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind,
            base_value: self.base_value.unwrap_or_else(|| kind.valid_range().0),
            variation_range: self.variation_range.unwrap_or(1.0),
            change_rate: self.change_rate.unwrap_or(0.1),
            interval: self.interval.unwrap_or(5),
            last_value: None,
            error_definition: self.error_definition,
        };
        sensor.validate()?;
        Ok(sensor)
    }
}
