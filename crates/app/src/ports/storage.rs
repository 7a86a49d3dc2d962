//! Storage ports — repository traits for the persistence collaborator.
//!
//! Deletion cascades downward: removing a container removes its devices,
//! removing a device removes its sensors. The cascade is the adapter's
//! responsibility; the engines never bypass it.

use std::future::Future;

use homesim_domain::container::Container;
use homesim_domain::device::Device;
use homesim_domain::error::HomesimError;
use homesim_domain::id::{ContainerId, DeviceId, SensorId};
use homesim_domain::sensor::Sensor;

/// CRUD for scenario containers.
pub trait ContainerRepository {
    fn create(
        &self,
        container: Container,
    ) -> impl Future<Output = Result<Container, HomesimError>> + Send;

    fn get_by_id(
        &self,
        id: ContainerId,
    ) -> impl Future<Output = Result<Option<Container>, HomesimError>> + Send;

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Container>, HomesimError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Container>, HomesimError>> + Send;

    fn update(
        &self,
        container: Container,
    ) -> impl Future<Output = Result<Container, HomesimError>> + Send;

    /// Delete a container and, by cascade, its devices and their sensors.
    fn delete(&self, id: ContainerId) -> impl Future<Output = Result<(), HomesimError>> + Send;
}

/// CRUD for devices.
pub trait DeviceRepository {
    fn create(&self, device: Device)
    -> impl Future<Output = Result<Device, HomesimError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HomesimError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HomesimError>> + Send;

    fn find_by_container(
        &self,
        container_id: ContainerId,
    ) -> impl Future<Output = Result<Vec<Device>, HomesimError>> + Send;

    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, HomesimError>> + Send;

    /// Delete a device and, by cascade, its sensors.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HomesimError>> + Send;
}

/// CRUD for sensors.
pub trait SensorRepository {
    fn create(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, HomesimError>> + Send;

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, HomesimError>> + Send;

    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, HomesimError>> + Send;

    fn update(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, HomesimError>> + Send;

    fn delete(&self, id: SensorId) -> impl Future<Output = Result<(), HomesimError>> + Send;
}
