//! # homesim-adapter-storage-memory
//!
//! In-memory implementation of the storage ports. All three repositories are
//! served by one [`MemoryStore`]; cloning it is cheap and every clone shares
//! the same underlying tables, so the manager and the engine can each hold
//! their own handle.
//!
//! Deletes cascade downward: container → devices → sensors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use homesim_app::ports::{ContainerRepository, DeviceRepository, SensorRepository};
use homesim_domain::container::Container;
use homesim_domain::device::Device;
use homesim_domain::error::{HomesimError, StorageError};
use homesim_domain::id::{ContainerId, DeviceId, SensorId};
use homesim_domain::sensor::Sensor;

#[derive(Debug, Default)]
struct Tables {
    containers: Mutex<HashMap<ContainerId, Container>>,
    devices: Mutex<HashMap<DeviceId, Device>>,
    sensors: Mutex<HashMap<SensorId, Sensor>>,
}

/// Hash-map-backed storage shared between clones.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn containers(&self) -> Result<MutexGuard<'_, HashMap<ContainerId, Container>>, HomesimError> {
        self.inner
            .containers
            .lock()
            .map_err(|_| StorageError::Backend("container table poisoned".to_string()).into())
    }

    fn devices(&self) -> Result<MutexGuard<'_, HashMap<DeviceId, Device>>, HomesimError> {
        self.inner
            .devices
            .lock()
            .map_err(|_| StorageError::Backend("device table poisoned".to_string()).into())
    }

    fn sensors(&self) -> Result<MutexGuard<'_, HashMap<SensorId, Sensor>>, HomesimError> {
        self.inner
            .sensors
            .lock()
            .map_err(|_| StorageError::Backend("sensor table poisoned".to_string()).into())
    }

    fn delete_device_tree(&self, device_ids: &[DeviceId]) -> Result<(), HomesimError> {
        self.sensors()?
            .retain(|_, sensor| !device_ids.contains(&sensor.device_id));
        let mut devices = self.devices()?;
        for id in device_ids {
            devices.remove(id);
        }
        Ok(())
    }
}

impl ContainerRepository for MemoryStore {
    async fn create(&self, container: Container) -> Result<Container, HomesimError> {
        container.validate()?;
        self.containers()?.insert(container.id, container.clone());
        Ok(container)
    }

    async fn get_by_id(&self, id: ContainerId) -> Result<Option<Container>, HomesimError> {
        Ok(self.containers()?.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Container>, HomesimError> {
        Ok(self
            .containers()?
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Container>, HomesimError> {
        Ok(self.containers()?.values().cloned().collect())
    }

    async fn update(&self, container: Container) -> Result<Container, HomesimError> {
        container.validate()?;
        self.containers()?.insert(container.id, container.clone());
        Ok(container)
    }

    async fn delete(&self, id: ContainerId) -> Result<(), HomesimError> {
        let device_ids: Vec<DeviceId> = self
            .devices()?
            .values()
            .filter(|d| d.container_id == id)
            .map(|d| d.id)
            .collect();
        self.delete_device_tree(&device_ids)?;
        self.containers()?.remove(&id);
        Ok(())
    }
}

impl DeviceRepository for MemoryStore {
    async fn create(&self, device: Device) -> Result<Device, HomesimError> {
        device.validate()?;
        self.devices()?.insert(device.id, device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, HomesimError> {
        Ok(self.devices()?.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Device>, HomesimError> {
        Ok(self.devices()?.values().cloned().collect())
    }

    async fn find_by_container(
        &self,
        container_id: ContainerId,
    ) -> Result<Vec<Device>, HomesimError> {
        Ok(self
            .devices()?
            .values()
            .filter(|d| d.container_id == container_id)
            .cloned()
            .collect())
    }

    async fn update(&self, device: Device) -> Result<Device, HomesimError> {
        device.validate()?;
        self.devices()?.insert(device.id, device.clone());
        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), HomesimError> {
        self.delete_device_tree(&[id])
    }
}

impl SensorRepository for MemoryStore {
    async fn create(&self, sensor: Sensor) -> Result<Sensor, HomesimError> {
        sensor.validate()?;
        self.sensors()?.insert(sensor.id, sensor.clone());
        Ok(sensor)
    }

    async fn get_by_id(&self, id: SensorId) -> Result<Option<Sensor>, HomesimError> {
        Ok(self.sensors()?.get(&id).cloned())
    }

    async fn find_by_device(&self, device_id: DeviceId) -> Result<Vec<Sensor>, HomesimError> {
        Ok(self
            .sensors()?
            .values()
            .filter(|s| s.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn update(&self, sensor: Sensor) -> Result<Sensor, HomesimError> {
        sensor.validate()?;
        self.sensors()?.insert(sensor.id, sensor.clone());
        Ok(sensor)
    }

    async fn delete(&self, id: SensorId) -> Result<(), HomesimError> {
        self.sensors()?.remove(&id);
        Ok(())
    }
}
