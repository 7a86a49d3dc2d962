//! Scenario lifecycle — create, activate, deactivate, snapshot, restore.
//!
//! At most one scenario is active at a time. Activating a scenario first
//! deactivates the current one (saving its state), then restores the target
//! scenario's saved state if it has any. Snapshots live in memory for the
//! lifetime of the manager; the persisted entities live behind the
//! repository ports.

use std::collections::HashMap;

use homesim_domain::container::Container;
use homesim_domain::device::DeviceStatus;
use homesim_domain::error::{HomesimError, NotFoundError};
use homesim_domain::scenario::{ScenarioSnapshot, SensorSnapshot};
use homesim_domain::sensor::Sensor;

use crate::config::SimulationConfig;
use crate::ports::{ContainerRepository, DeviceRepository, SensorRepository};

/// Container name used for a scenario.
#[must_use]
pub fn container_name(scenario: &str) -> String {
    format!("Smart Home - {scenario}")
}

/// One row of [`ScenarioManager::list_scenarios`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub description: String,
    /// Whether a container has been created for this scenario.
    pub is_created: bool,
    pub is_active: bool,
    /// Devices materialized for this scenario; 0 when not created.
    pub device_count: usize,
    /// Sensors materialized for this scenario; 0 when not created.
    pub sensor_count: usize,
}

/// Orchestrates scenario containers and their saved state.
pub struct ScenarioManager<CR, DR, SR> {
    containers: CR,
    devices: DR,
    sensors: SR,
    config: SimulationConfig,
    active: Option<String>,
    snapshots: HashMap<String, ScenarioSnapshot>,
}

impl<CR, DR, SR> ScenarioManager<CR, DR, SR>
where
    CR: ContainerRepository,
    DR: DeviceRepository,
    SR: SensorRepository,
{
    pub fn new(containers: CR, devices: DR, sensors: SR, config: SimulationConfig) -> Self {
        Self {
            containers,
            devices,
            sensors,
            config,
            active: None,
            snapshots: HashMap::new(),
        }
    }

    /// Name of the currently active scenario, if any.
    #[must_use]
    pub fn active_scenario(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Create the container, devices, and sensors for a scenario from its
    /// template. Idempotent: an existing container is returned untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] when no template carries the name,
    /// or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn create_scenario(&self, scenario: &str) -> Result<Container, HomesimError> {
        let name = container_name(scenario);
        if let Some(existing) = self.containers.find_by_name(&name).await? {
            return Ok(existing);
        }
        let template = self.config.scenario_template(scenario).ok_or_else(|| {
            NotFoundError {
                entity: "scenario",
                id: scenario.to_string(),
            }
        })?;

        let container = Container::builder()
            .name(name)
            .description(template.description.clone())
            .build()?;
        let container = self.containers.create(container).await?;

        for room_template in &self.config.room_templates {
            let room = room_template.room;
            for kind in self.config.devices_for_room(Some(scenario), room) {
                let Some(device_template) = self.config.device_template(*kind) else {
                    tracing::warn!(kind = %kind, "no device template; skipping");
                    continue;
                };
                let device = homesim_domain::device::Device::builder()
                    .container_id(container.id)
                    .name(format!("{} {}", room.label(), kind.label()))
                    .kind(*kind)
                    .room(room)
                    .status(DeviceStatus::Running)
                    .build()?;
                let device = self.devices.create(device).await?;

                for sensor_template in &device_template.sensors {
                    let sensor = Sensor::builder()
                        .device_id(device.id)
                        .name(sensor_template.name.clone())
                        .kind(sensor_template.kind)
                        .base_value(sensor_template.base_value)
                        .variation_range(sensor_template.variation_range)
                        .change_rate(sensor_template.change_rate)
                        .interval(sensor_template.interval)
                        .build()?;
                    self.sensors.create(sensor).await?;
                }
            }
        }

        tracing::info!(scenario, container = %container.id, "scenario created");
        Ok(container)
    }

    /// Activate a scenario, deactivating the current one first.
    ///
    /// Re-activating the already-active scenario runs the full
    /// deactivate-then-activate cycle, so its state is saved and restored.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] when the scenario has neither a
    /// template nor an existing container; in that case nothing is mutated.
    #[tracing::instrument(skip(self))]
    pub async fn activate_scenario(&mut self, scenario: &str) -> Result<(), HomesimError> {
        let known = self.config.scenario_template(scenario).is_some()
            || self
                .containers
                .find_by_name(&container_name(scenario))
                .await?
                .is_some();
        if !known {
            return Err(NotFoundError {
                entity: "scenario",
                id: scenario.to_string(),
            }
            .into());
        }

        self.deactivate_current_scenario().await?;

        let mut container = self.create_scenario(scenario).await?;
        if !container.is_active {
            container.is_active = true;
            container = self.containers.update(container).await?;
        }
        self.restore_snapshot(scenario, &container).await?;
        self.active = Some(scenario.to_string());
        tracing::info!(scenario, "scenario activated");
        Ok(())
    }

    /// Deactivate the active scenario, saving its state into a snapshot.
    /// Returns the name of the scenario that was deactivated, if any.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_current_scenario(&mut self) -> Result<Option<String>, HomesimError> {
        let Some(scenario) = self.active.take() else {
            return Ok(None);
        };
        let Some(mut container) = self
            .containers
            .find_by_name(&container_name(&scenario))
            .await?
        else {
            // Container deleted out from under us; nothing left to save.
            return Ok(Some(scenario));
        };

        let snapshot = self.save_snapshot(&container).await?;
        self.snapshots.insert(scenario.clone(), snapshot);

        if container.is_active {
            container.is_active = false;
            self.containers.update(container).await?;
        }
        tracing::info!(scenario, "scenario deactivated");
        Ok(Some(scenario))
    }

    /// Delete a scenario's container (cascading to devices and sensors) and
    /// drop its snapshot. Deactivates it first when it is the active one.
    #[tracing::instrument(skip(self))]
    pub async fn cleanup_scenario(&mut self, scenario: &str) -> Result<(), HomesimError> {
        if self.active.as_deref() == Some(scenario) {
            self.deactivate_current_scenario().await?;
        }
        if let Some(container) = self
            .containers
            .find_by_name(&container_name(scenario))
            .await?
        {
            self.containers.delete(container.id).await?;
        }
        self.snapshots.remove(scenario);
        tracing::info!(scenario, "scenario cleaned up");
        Ok(())
    }

    /// Every templated scenario with its creation and activation state.
    pub async fn list_scenarios(&self) -> Result<Vec<ScenarioSummary>, HomesimError> {
        let containers = self.containers.get_all().await?;
        let mut summaries = Vec::with_capacity(self.config.scenario_templates.len());
        for template in &self.config.scenario_templates {
            let name = container_name(&template.name);
            let container = containers.iter().find(|c| c.name == name);
            let (device_count, sensor_count) = match container {
                Some(container) => {
                    let devices = self.devices.find_by_container(container.id).await?;
                    let mut sensors = 0;
                    for device in &devices {
                        sensors += self.sensors.find_by_device(device.id).await?.len();
                    }
                    (devices.len(), sensors)
                }
                None => (0, 0),
            };
            summaries.push(ScenarioSummary {
                name: template.name.clone(),
                description: template.description.clone(),
                is_created: container.is_some(),
                is_active: self.active.as_deref() == Some(template.name.as_str()),
                device_count,
                sensor_count,
            });
        }
        Ok(summaries)
    }

    /// Capture the current device and sensor state of a container.
    async fn save_snapshot(
        &self,
        container: &Container,
    ) -> Result<ScenarioSnapshot, HomesimError> {
        let mut snapshot = ScenarioSnapshot::new(container.id);
        for device in self.devices.find_by_container(container.id).await? {
            let sensors = self.sensors.find_by_device(device.id).await?;
            let entry = snapshot.record_device(device.id, device.status);
            for sensor in sensors {
                entry.sensors.insert(
                    sensor.id,
                    SensorSnapshot {
                        last_value: sensor.last_value,
                        error_definition: sensor.error_definition,
                    },
                );
            }
        }
        Ok(snapshot)
    }

    /// Write a saved snapshot back into the repositories. A missing snapshot
    /// is a no-op; entities deleted since the snapshot was taken are skipped.
    async fn restore_snapshot(
        &self,
        scenario: &str,
        container: &Container,
    ) -> Result<(), HomesimError> {
        let Some(snapshot) = self.snapshots.get(scenario) else {
            return Ok(());
        };
        if snapshot.container_id != container.id {
            tracing::warn!(scenario, "snapshot refers to a deleted container; skipping");
            return Ok(());
        }
        for (device_id, device_snapshot) in &snapshot.devices {
            let Some(mut device) = self.devices.get_by_id(*device_id).await? else {
                continue;
            };
            if device.status != device_snapshot.status {
                device.status = device_snapshot.status;
                self.devices.update(device).await?;
            }
            for (sensor_id, sensor_snapshot) in &device_snapshot.sensors {
                let Some(mut sensor) = self.sensors.get_by_id(*sensor_id).await? else {
                    continue;
                };
                sensor.last_value = sensor_snapshot.last_value;
                sensor.error_definition = sensor_snapshot.error_definition.clone();
                self.sensors.update(sensor).await?;
            }
        }
        Ok(())
    }
}
