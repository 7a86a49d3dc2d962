//! Simulation templates — the pure data scenarios are instantiated from.
//!
//! Templates are read at scenario-creation time only. They can be
//! deserialized from configuration, and [`SimulationConfig::builtin`]
//! carries a complete default set so no file is required.

use std::collections::HashMap;

use serde::Deserialize;

use homesim_domain::device::DeviceKind;
use homesim_domain::room::RoomKind;
use homesim_domain::sensor::SensorKind;

/// Blueprint for one sensor on a device template.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorTemplate {
    pub name: String,
    pub kind: SensorKind,
    pub base_value: f64,
    pub variation_range: f64,
    pub change_rate: f64,
    /// Sampling interval in seconds.
    pub interval: u32,
}

/// Blueprint for one device archetype and its sensors.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceTemplate {
    pub kind: DeviceKind,
    pub description: String,
    pub sensors: Vec<SensorTemplate>,
}

/// Which device archetypes a room gets by default.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomTemplate {
    pub room: RoomKind,
    pub devices: Vec<DeviceKind>,
}

/// A named environment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioTemplate {
    pub name: String,
    pub description: String,
    /// Per-kind offsets added to generated values while this scenario is
    /// active.
    #[serde(default)]
    pub adjustments: HashMap<SensorKind, f64>,
    /// Per-room device list overriding the room template.
    #[serde(default)]
    pub room_overrides: HashMap<RoomKind, Vec<DeviceKind>>,
}

/// The full template set: devices, rooms, scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub device_templates: Vec<DeviceTemplate>,
    pub room_templates: Vec<RoomTemplate>,
    pub scenario_templates: Vec<ScenarioTemplate>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SimulationConfig {
    /// Look up the device template for a kind.
    #[must_use]
    pub fn device_template(&self, kind: DeviceKind) -> Option<&DeviceTemplate> {
        self.device_templates.iter().find(|t| t.kind == kind)
    }

    /// Look up a scenario template by name.
    #[must_use]
    pub fn scenario_template(&self, name: &str) -> Option<&ScenarioTemplate> {
        self.scenario_templates.iter().find(|t| t.name == name)
    }

    /// Scenario offset for a sensor kind; 0.0 when the scenario or the kind
    /// has no entry.
    #[must_use]
    pub fn scenario_offset(&self, scenario: &str, kind: SensorKind) -> f64 {
        self.scenario_template(scenario)
            .and_then(|t| t.adjustments.get(&kind))
            .copied()
            .unwrap_or(0.0)
    }

    /// Device kinds for a room, honoring a scenario's override when present.
    #[must_use]
    pub fn devices_for_room(&self, scenario: Option<&str>, room: RoomKind) -> &[DeviceKind] {
        if let Some(template) = scenario.and_then(|name| self.scenario_template(name)) {
            if let Some(devices) = template.room_overrides.get(&room) {
                return devices;
            }
        }
        self.room_templates
            .iter()
            .find(|t| t.room == room)
            .map_or(&[], |t| &t.devices)
    }

    /// Noise band half-width for a sensor kind, taken from the first device
    /// template carrying that kind; 1.0 when no template declares it.
    #[must_use]
    pub fn variation_for(&self, kind: SensorKind) -> f64 {
        self.device_templates
            .iter()
            .flat_map(|d| &d.sensors)
            .find(|s| s.kind == kind)
            .map_or(1.0, |s| s.variation_range)
    }

    /// The built-in template set: four device archetypes across six rooms
    /// and six scenarios.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        let device_templates = vec![
            DeviceTemplate {
                kind: DeviceKind::EnvironmentalMonitor,
                description: "Monitors environmental conditions".to_string(),
                sensors: vec![
                    SensorTemplate {
                        name: "Temperature".to_string(),
                        kind: SensorKind::Temperature,
                        base_value: 21.0,
                        variation_range: 2.0,
                        change_rate: 0.5,
                        interval: 5,
                    },
                    SensorTemplate {
                        name: "Humidity".to_string(),
                        kind: SensorKind::Humidity,
                        base_value: 45.0,
                        variation_range: 5.0,
                        change_rate: 1.0,
                        interval: 5,
                    },
                ],
            },
            DeviceTemplate {
                kind: DeviceKind::LightControl,
                description: "Smart lighting system".to_string(),
                sensors: vec![
                    SensorTemplate {
                        name: "Brightness".to_string(),
                        kind: SensorKind::Brightness,
                        base_value: 40.0,
                        variation_range: 10.0,
                        change_rate: 5.0,
                        interval: 2,
                    },
                    SensorTemplate {
                        name: "Color Temperature".to_string(),
                        kind: SensorKind::ColorTemperature,
                        base_value: 4000.0,
                        variation_range: 100.0,
                        change_rate: 50.0,
                        interval: 2,
                    },
                ],
            },
            DeviceTemplate {
                kind: DeviceKind::SecuritySystem,
                description: "Monitors home security".to_string(),
                sensors: vec![
                    SensorTemplate {
                        name: "Motion".to_string(),
                        kind: SensorKind::Motion,
                        base_value: 5.0,
                        variation_range: 10.0,
                        change_rate: 50.0,
                        interval: 1,
                    },
                    SensorTemplate {
                        name: "Door Status".to_string(),
                        kind: SensorKind::DoorContact,
                        base_value: 0.0,
                        variation_range: 1.0,
                        change_rate: 1.0,
                        interval: 1,
                    },
                    SensorTemplate {
                        name: "Window Status".to_string(),
                        kind: SensorKind::WindowContact,
                        base_value: 0.0,
                        variation_range: 1.0,
                        change_rate: 1.0,
                        interval: 1,
                    },
                ],
            },
            DeviceTemplate {
                kind: DeviceKind::SafetyMonitor,
                description: "Monitors safety conditions".to_string(),
                sensors: vec![
                    SensorTemplate {
                        name: "Smoke Level".to_string(),
                        kind: SensorKind::Smoke,
                        base_value: 2.0,
                        variation_range: 5.0,
                        change_rate: 2.0,
                        interval: 5,
                    },
                    SensorTemplate {
                        name: "CO Level".to_string(),
                        kind: SensorKind::CarbonMonoxide,
                        base_value: 5.0,
                        variation_range: 10.0,
                        change_rate: 5.0,
                        interval: 5,
                    },
                ],
            },
        ];

        let room_templates = vec![
            RoomTemplate {
                room: RoomKind::LivingRoom,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SecuritySystem,
                ],
            },
            RoomTemplate {
                room: RoomKind::Kitchen,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SafetyMonitor,
                ],
            },
            RoomTemplate {
                room: RoomKind::Bedroom,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SecuritySystem,
                ],
            },
            RoomTemplate {
                room: RoomKind::Bathroom,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SafetyMonitor,
                ],
            },
            RoomTemplate {
                room: RoomKind::Office,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SecuritySystem,
                ],
            },
            RoomTemplate {
                room: RoomKind::Garage,
                devices: vec![
                    DeviceKind::EnvironmentalMonitor,
                    DeviceKind::LightControl,
                    DeviceKind::SecuritySystem,
                    DeviceKind::SafetyMonitor,
                ],
            },
        ];

        let scenario_templates = vec![
            ScenarioTemplate {
                name: "Normal Day".to_string(),
                description: "Baseline daytime settings".to_string(),
                adjustments: HashMap::new(),
                room_overrides: HashMap::new(),
            },
            ScenarioTemplate {
                name: "Hot Day".to_string(),
                description: "Heat wave conditions".to_string(),
                adjustments: HashMap::from([
                    (SensorKind::Temperature, 5.0),
                    (SensorKind::Brightness, 10.0),
                    (SensorKind::Motion, -0.1),
                ]),
                room_overrides: HashMap::new(),
            },
            ScenarioTemplate {
                name: "Cold Night".to_string(),
                description: "Late-night low-activity conditions".to_string(),
                adjustments: HashMap::from([
                    (SensorKind::Temperature, -5.0),
                    (SensorKind::Brightness, -20.0),
                    (SensorKind::Motion, -0.2),
                ]),
                room_overrides: HashMap::new(),
            },
            ScenarioTemplate {
                name: "Party Mode".to_string(),
                description: "Bright, busy, slightly warmer".to_string(),
                adjustments: HashMap::from([
                    (SensorKind::Temperature, 2.0),
                    (SensorKind::Brightness, 20.0),
                    (SensorKind::Motion, 0.5),
                ]),
                room_overrides: HashMap::new(),
            },
            ScenarioTemplate {
                name: "Away Mode".to_string(),
                description: "Nobody home; security-focused".to_string(),
                adjustments: HashMap::from([
                    (SensorKind::Temperature, -2.0),
                    (SensorKind::Brightness, -30.0),
                    (SensorKind::Motion, -0.4),
                ]),
                room_overrides: HashMap::from([(
                    RoomKind::Garage,
                    vec![DeviceKind::SecuritySystem, DeviceKind::SafetyMonitor],
                )]),
            },
            ScenarioTemplate {
                name: "Morning".to_string(),
                description: "Gradual wake-up settings".to_string(),
                adjustments: HashMap::from([
                    (SensorKind::Temperature, -2.0),
                    (SensorKind::Brightness, 5.0),
                    (SensorKind::Motion, 0.2),
                ]),
                room_overrides: HashMap::new(),
            },
        ];

        Self {
            device_templates,
            room_templates,
            scenario_templates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_carry_four_device_archetypes_in_builtin_set() {
        let config = SimulationConfig::builtin();
        assert_eq!(config.device_templates.len(), 4);
        assert!(config.device_template(DeviceKind::SafetyMonitor).is_some());
    }

    #[test]
    fn should_cover_every_room_kind_in_builtin_set() {
        let config = SimulationConfig::builtin();
        for room in RoomKind::ALL {
            assert!(
                !config.devices_for_room(None, room).is_empty(),
                "no devices for {room}"
            );
        }
    }

    #[test]
    fn should_return_scenario_offset_when_declared() {
        let config = SimulationConfig::builtin();
        let offset = config.scenario_offset("Hot Day", SensorKind::Temperature);
        assert!((offset - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_return_zero_offset_for_unknown_scenario_or_kind() {
        let config = SimulationConfig::builtin();
        assert!(config.scenario_offset("Nonexistent", SensorKind::Temperature) == 0.0);
        assert!(config.scenario_offset("Hot Day", SensorKind::Smoke) == 0.0);
    }

    #[test]
    fn should_prefer_room_override_when_scenario_declares_one() {
        let config = SimulationConfig::builtin();
        let devices = config.devices_for_room(Some("Away Mode"), RoomKind::Garage);
        assert_eq!(
            devices,
            &[DeviceKind::SecuritySystem, DeviceKind::SafetyMonitor]
        );
        // Rooms without an override keep the default list.
        let kitchen = config.devices_for_room(Some("Away Mode"), RoomKind::Kitchen);
        assert_eq!(kitchen.len(), 3);
    }

    #[test]
    fn should_look_up_variation_by_sensor_kind() {
        let config = SimulationConfig::builtin();
        assert!((config.variation_for(SensorKind::Temperature) - 2.0).abs() < f64::EPSILON);
        assert!((config.variation_for(SensorKind::Smoke) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_deserialize_minimal_config_from_json() {
        let json = r#"{
            "device_templates": [{
                "kind": "safety_monitor",
                "description": "Smoke only",
                "sensors": [{
                    "name": "Smoke Level",
                    "kind": "smoke",
                    "base_value": 2.0,
                    "variation_range": 5.0,
                    "change_rate": 2.0,
                    "interval": 5
                }]
            }],
            "room_templates": [{ "room": "kitchen", "devices": ["safety_monitor"] }],
            "scenario_templates": [{
                "name": "Test",
                "description": "Test scenario",
                "adjustments": { "smoke": 1.5 }
            }]
        }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.scenario_offset("Test", SensorKind::Smoke), 1.5);
        assert_eq!(
            config.devices_for_room(None, RoomKind::Kitchen),
            &[DeviceKind::SafetyMonitor]
        );
    }
}
