//! Log-based visualization — renders readings and alerts as tracing events.
//!
//! The daemon has no graphical frontend; this adapter makes the simulation
//! observable through the log stream instead.

use homesim_app::ports::Visualization;
use homesim_domain::device::Device;
use homesim_domain::error::HomesimError;
use homesim_domain::room::RoomKind;
use homesim_domain::sensor::Sensor;
use homesim_domain::time::Timestamp;

/// Visualization that writes everything to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingVisualization;

impl Visualization for TracingVisualization {
    async fn update_room_data(
        &self,
        room: RoomKind,
        devices: Vec<Device>,
        sensors: Vec<Sensor>,
    ) -> Result<(), HomesimError> {
        tracing::debug!(
            %room,
            devices = devices.len(),
            sensors = sensors.len(),
            "room layout updated"
        );
        Ok(())
    }

    async fn update_sensor_value(
        &self,
        room: RoomKind,
        device_name: String,
        sensor_name: String,
        value: f64,
    ) -> Result<(), HomesimError> {
        tracing::debug!(%room, device = %device_name, sensor = %sensor_name, value, "reading");
        Ok(())
    }

    async fn add_alert(
        &self,
        room: RoomKind,
        message: String,
        timestamp: Timestamp,
    ) -> Result<(), HomesimError> {
        tracing::warn!(%room, %message, %timestamp, "ALERT");
        Ok(())
    }

    async fn clear_alerts(&self, room: Option<RoomKind>) -> Result<(), HomesimError> {
        match room {
            Some(room) => tracing::info!(%room, "alerts cleared"),
            None => tracing::info!("all alerts cleared"),
        }
        Ok(())
    }
}
