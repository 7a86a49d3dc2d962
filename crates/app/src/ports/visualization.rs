//! Visualization port — push computed values and alerts to a UI collaborator.
//!
//! The core owns no rendering logic. Implementations must treat unknown
//! room/device/sensor keys as no-ops, and the engines never propagate a
//! visualization failure to their callers — the `Result` exists so that the
//! event engine can record per-action outcomes before swallowing them.

use std::future::Future;

use homesim_domain::device::Device;
use homesim_domain::error::HomesimError;
use homesim_domain::room::RoomKind;
use homesim_domain::sensor::Sensor;
use homesim_domain::time::Timestamp;

/// Receives room layouts, live values, and alerts.
pub trait Visualization {
    /// Replace the rendered layout of one room.
    fn update_room_data(
        &self,
        room: RoomKind,
        devices: Vec<Device>,
        sensors: Vec<Sensor>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send;

    /// Push one computed sensor value.
    fn update_sensor_value(
        &self,
        room: RoomKind,
        device_name: String,
        sensor_name: String,
        value: f64,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send;

    /// Display an alert for a room.
    fn add_alert(
        &self,
        room: RoomKind,
        message: String,
        timestamp: Timestamp,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send;

    /// Clear alerts for one room, or everywhere when `room` is `None`.
    fn clear_alerts(
        &self,
        room: Option<RoomKind>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send;
}

impl<T: Visualization + Send + Sync> Visualization for std::sync::Arc<T> {
    fn update_room_data(
        &self,
        room: RoomKind,
        devices: Vec<Device>,
        sensors: Vec<Sensor>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        (**self).update_room_data(room, devices, sensors)
    }

    fn update_sensor_value(
        &self,
        room: RoomKind,
        device_name: String,
        sensor_name: String,
        value: f64,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        (**self).update_sensor_value(room, device_name, sensor_name, value)
    }

    fn add_alert(
        &self,
        room: RoomKind,
        message: String,
        timestamp: Timestamp,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        (**self).add_alert(room, message, timestamp)
    }

    fn clear_alerts(
        &self,
        room: Option<RoomKind>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        (**self).clear_alerts(room)
    }
}

/// Visualization that drops everything — used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisualization;

impl Visualization for NoopVisualization {
    fn update_room_data(
        &self,
        _room: RoomKind,
        _devices: Vec<Device>,
        _sensors: Vec<Sensor>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        async { Ok(()) }
    }

    fn update_sensor_value(
        &self,
        _room: RoomKind,
        _device_name: String,
        _sensor_name: String,
        _value: f64,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        async { Ok(()) }
    }

    fn add_alert(
        &self,
        _room: RoomKind,
        _message: String,
        _timestamp: Timestamp,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        async { Ok(()) }
    }

    fn clear_alerts(
        &self,
        _room: Option<RoomKind>,
    ) -> impl Future<Output = Result<(), HomesimError>> + Send {
        async { Ok(()) }
    }
}
