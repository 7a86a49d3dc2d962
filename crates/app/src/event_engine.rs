//! Event engine — evaluates readings against registered events.
//!
//! The engine keeps two ordered lists: normal events and emergency events.
//! Every reading is evaluated against both lists in registration order,
//! normal events first. A fired event executes its actions in order; one
//! failing action is logged and skipped without aborting the rest, and no
//! action failure ever propagates to the caller of
//! [`EventEngine::process_sensor_update`].

use homesim_domain::device::{DeviceKind, DeviceStatus};
use homesim_domain::event::{
    EventAction, EventTrigger, Severity, SmartHomeEvent, TriggerCondition,
};
use homesim_domain::room::RoomKind;
use homesim_domain::sensor::SensorKind;
use homesim_domain::time::Timestamp;

use crate::ports::{DeviceRepository, Visualization};

/// The always-on safety rules every engine starts with: high smoke, high
/// carbon monoxide, and temperature outside the habitable band.
#[must_use]
pub fn builtin_emergencies() -> Vec<SmartHomeEvent> {
    let smoke = SmartHomeEvent::builder()
        .name("Smoke detected")
        .description("Smoke concentration above the alarm threshold")
        .severity(Severity::Emergency)
        .trigger(EventTrigger::new(
            SensorKind::Smoke,
            TriggerCondition::GreaterThan(50.0),
        ))
        .action(EventAction::RaiseAlert {
            room: None,
            message: "Smoke detected! Possible fire hazard.".to_string(),
        })
        .build();

    let carbon_monoxide = SmartHomeEvent::builder()
        .name("Carbon monoxide detected")
        .description("CO concentration above the alarm threshold")
        .severity(Severity::Emergency)
        .trigger(EventTrigger::new(
            SensorKind::CarbonMonoxide,
            TriggerCondition::GreaterThan(30.0),
        ))
        .action(EventAction::RaiseAlert {
            room: None,
            message: "Dangerous CO level detected!".to_string(),
        })
        .build();

    let temperature = SmartHomeEvent::builder()
        .name("Extreme temperature")
        .description("Temperature outside the habitable band")
        .severity(Severity::Emergency)
        .trigger(EventTrigger::new(
            SensorKind::Temperature,
            TriggerCondition::OutsideRange {
                min: 5.0,
                max: 35.0,
            },
        ))
        .action(EventAction::RaiseAlert {
            room: None,
            message: "Extreme temperature detected!".to_string(),
        })
        .build();

    // The builders only fail on empty names or action lists, and the
    // definitions above are static.
    [smoke, carbon_monoxide, temperature]
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}

/// One sensor reading in its physical context, as seen by the engine.
#[derive(Debug, Clone, Copy)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: f64,
    pub device_kind: DeviceKind,
    pub room: RoomKind,
}

/// Evaluates readings against normal and emergency events.
pub struct EventEngine<DR, V> {
    device_repository: DR,
    visualization: V,
    events: Vec<SmartHomeEvent>,
    emergencies: Vec<SmartHomeEvent>,
}

impl<DR, V> EventEngine<DR, V>
where
    DR: DeviceRepository,
    V: Visualization,
{
    /// Create an engine with the built-in safety emergencies pre-registered.
    pub fn new(device_repository: DR, visualization: V) -> Self {
        Self {
            device_repository,
            visualization,
            events: Vec::new(),
            emergencies: builtin_emergencies(),
        }
    }

    /// Create an engine with no events at all, not even the built-in
    /// emergencies.
    pub fn empty(device_repository: DR, visualization: V) -> Self {
        Self {
            device_repository,
            visualization,
            events: Vec::new(),
            emergencies: Vec::new(),
        }
    }

    /// Register a normal event. It is evaluated after all previously
    /// registered normal events and before every emergency.
    pub fn add_event(&mut self, event: SmartHomeEvent) {
        self.events.push(event);
    }

    /// Register an emergency event. Its severity is forced to
    /// [`Severity::Emergency`] regardless of how it was built.
    pub fn add_emergency(&mut self, mut event: SmartHomeEvent) {
        event.severity = Severity::Emergency;
        self.emergencies.push(event);
    }

    /// Emergencies that have fired and not yet expired.
    #[must_use]
    pub fn get_active_emergencies(&self) -> Vec<&SmartHomeEvent> {
        self.emergencies.iter().filter(|e| e.is_active).collect()
    }

    /// Evaluate one reading against every registered event.
    ///
    /// Normal events are checked first, then emergencies, each list in
    /// registration order. Returns the names of the events that fired.
    #[tracing::instrument(skip(self), fields(kind = %reading.kind, value = reading.value))]
    pub async fn process_sensor_update(
        &mut self,
        reading: SensorReading,
        now: Timestamp,
    ) -> Vec<String> {
        let mut fired = Vec::new();
        for event in self.events.iter_mut().chain(self.emergencies.iter_mut()) {
            let hit = event.triggers.iter_mut().any(|trigger| {
                trigger.sensor_kind == reading.kind
                    && trigger
                        .target_device
                        .is_none_or(|target| target == reading.device_kind)
                    && trigger.check(reading.value, now)
            });
            if !hit {
                continue;
            }
            event.mark_triggered(now);
            tracing::info!(
                event = %event.name,
                severity = %event.severity,
                room = %reading.room,
                "event fired"
            );
            run_actions(
                &self.device_repository,
                &self.visualization,
                event,
                reading.room,
                now,
            )
            .await;
            fired.push(event.name.clone());
        }
        fired
    }

    /// Expire events that have been active longer than the expiry window.
    /// Returns the names of the events that expired on this call.
    pub fn cleanup_expired_events(&mut self, now: Timestamp) -> Vec<String> {
        let mut expired = Vec::new();
        for event in self.events.iter_mut().chain(self.emergencies.iter_mut()) {
            if event.check_expiration(now) {
                tracing::info!(event = %event.name, "event expired");
                expired.push(event.name.clone());
            }
        }
        expired
    }
}

/// Execute a fired event's actions in order.
///
/// A failing action is logged and skipped; the remaining actions still run.
async fn run_actions<DR, V>(
    device_repository: &DR,
    visualization: &V,
    event: &SmartHomeEvent,
    room: RoomKind,
    now: Timestamp,
) where
    DR: DeviceRepository,
    V: Visualization,
{
    for action in &event.actions {
        let outcome = run_action(device_repository, visualization, action, room, now).await;
        if let Err(error) = outcome {
            tracing::warn!(
                event = %event.name,
                action = %action,
                %error,
                "event action failed"
            );
        }
    }
}

async fn run_action<DR, V>(
    device_repository: &DR,
    visualization: &V,
    action: &EventAction,
    room: RoomKind,
    now: Timestamp,
) -> Result<(), homesim_domain::error::HomesimError>
where
    DR: DeviceRepository,
    V: Visualization,
{
    match action {
        EventAction::RaiseAlert {
            room: target,
            message,
        } => {
            visualization
                .add_alert(target.unwrap_or(room), message.clone(), now)
                .await
        }
        EventAction::ClearAlerts { room: target } => visualization.clear_alerts(*target).await,
        EventAction::SetDeviceStatus {
            device_kind,
            status,
        } => set_status_for_kind(device_repository, *device_kind, *status).await,
        EventAction::Log { message } => {
            tracing::info!(%message, "event log action");
            Ok(())
        }
    }
}

async fn set_status_for_kind<DR: DeviceRepository>(
    device_repository: &DR,
    kind: DeviceKind,
    status: DeviceStatus,
) -> Result<(), homesim_domain::error::HomesimError> {
    let devices = device_repository.get_all().await?;
    for mut device in devices {
        if device.kind == kind && device.status != status {
            device.status = status;
            device_repository.update(device).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Duration;

    use homesim_domain::device::Device;
    use homesim_domain::error::{HomesimError, StorageError};
    use homesim_domain::event::EVENT_EXPIRY_SECS;
    use homesim_domain::id::{ContainerId, DeviceId};
    use homesim_domain::sensor::Sensor;
    use homesim_domain::time::now;

    use crate::ports::NoopVisualization;

    use super::*;

    #[derive(Debug, Default, Clone)]
    struct FakeDeviceRepository {
        devices: Arc<Mutex<Vec<Device>>>,
    }

    impl FakeDeviceRepository {
        fn with(devices: Vec<Device>) -> Self {
            Self {
                devices: Arc::new(Mutex::new(devices)),
            }
        }

        fn snapshot(&self) -> Vec<Device> {
            self.devices.lock().unwrap().clone()
        }
    }

    impl DeviceRepository for FakeDeviceRepository {
        async fn create(&self, device: Device) -> Result<Device, HomesimError> {
            self.devices.lock().unwrap().push(device.clone());
            Ok(device)
        }

        async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, HomesimError> {
            Ok(self
                .devices
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id == id)
                .cloned())
        }

        async fn get_all(&self) -> Result<Vec<Device>, HomesimError> {
            Ok(self.devices.lock().unwrap().clone())
        }

        async fn find_by_container(
            &self,
            container_id: ContainerId,
        ) -> Result<Vec<Device>, HomesimError> {
            Ok(self
                .devices
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.container_id == container_id)
                .cloned()
                .collect())
        }

        async fn update(&self, device: Device) -> Result<Device, HomesimError> {
            let mut devices = self.devices.lock().unwrap();
            if let Some(existing) = devices.iter_mut().find(|d| d.id == device.id) {
                *existing = device.clone();
            }
            Ok(device)
        }

        async fn delete(&self, id: DeviceId) -> Result<(), HomesimError> {
            self.devices.lock().unwrap().retain(|d| d.id != id);
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone)]
    struct RecordingVisualization {
        alerts: Arc<Mutex<Vec<(RoomKind, String)>>>,
        cleared: Arc<Mutex<Vec<Option<RoomKind>>>>,
        fail_alerts: bool,
    }

    impl Visualization for RecordingVisualization {
        async fn update_room_data(
            &self,
            _room: RoomKind,
            _devices: Vec<Device>,
            _sensors: Vec<Sensor>,
        ) -> Result<(), HomesimError> {
            Ok(())
        }

        async fn update_sensor_value(
            &self,
            _room: RoomKind,
            _device_name: String,
            _sensor_name: String,
            _value: f64,
        ) -> Result<(), HomesimError> {
            Ok(())
        }

        async fn add_alert(
            &self,
            room: RoomKind,
            message: String,
            _timestamp: Timestamp,
        ) -> Result<(), HomesimError> {
            if self.fail_alerts {
                return Err(StorageError::Backend("display offline".to_string()).into());
            }
            self.alerts.lock().unwrap().push((room, message));
            Ok(())
        }

        async fn clear_alerts(&self, room: Option<RoomKind>) -> Result<(), HomesimError> {
            self.cleared.lock().unwrap().push(room);
            Ok(())
        }
    }

    fn reading(kind: SensorKind, value: f64) -> SensorReading {
        SensorReading {
            kind,
            value,
            device_kind: DeviceKind::SafetyMonitor,
            room: RoomKind::Kitchen,
        }
    }

    #[tokio::test]
    async fn should_fire_builtin_smoke_emergency_and_alert_triggering_room() {
        let viz = RecordingVisualization::default();
        let mut engine = EventEngine::new(FakeDeviceRepository::default(), viz.clone());

        let fired = engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), now())
            .await;
        assert_eq!(fired, vec!["Smoke detected".to_string()]);

        let alerts = viz.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, RoomKind::Kitchen);
    }

    #[tokio::test]
    async fn should_debounce_refire_within_five_seconds() {
        let mut engine =
            EventEngine::new(FakeDeviceRepository::default(), NoopVisualization);
        let start = now();

        let first = engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), start)
            .await;
        assert_eq!(first.len(), 1);

        // 2 s later, even a stronger reading is suppressed.
        let second = engine
            .process_sensor_update(
                reading(SensorKind::Smoke, 90.0),
                start + Duration::seconds(2),
            )
            .await;
        assert!(second.is_empty());

        // After the window it fires again.
        let third = engine
            .process_sensor_update(
                reading(SensorKind::Smoke, 90.0),
                start + Duration::seconds(6),
            )
            .await;
        assert_eq!(third.len(), 1);
    }

    #[tokio::test]
    async fn should_check_normal_events_before_emergencies() {
        let mut engine =
            EventEngine::new(FakeDeviceRepository::default(), NoopVisualization);
        engine.add_event(
            SmartHomeEvent::builder()
                .name("Smoke log")
                .trigger(EventTrigger::new(
                    SensorKind::Smoke,
                    TriggerCondition::GreaterThan(40.0),
                ))
                .action(EventAction::Log {
                    message: "smoke rising".to_string(),
                })
                .build()
                .unwrap(),
        );

        let fired = engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), now())
            .await;
        assert_eq!(
            fired,
            vec!["Smoke log".to_string(), "Smoke detected".to_string()]
        );
        // Only the emergency shows up in the emergencies view, even though
        // the normal event is also active.
        let active = engine.get_active_emergencies();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Smoke detected");
    }

    #[tokio::test]
    async fn should_force_emergency_severity_when_adding_emergency() {
        let mut engine =
            EventEngine::empty(FakeDeviceRepository::default(), NoopVisualization);
        engine.add_emergency(
            SmartHomeEvent::builder()
                .name("Gas leak")
                .trigger(EventTrigger::new(
                    SensorKind::CarbonMonoxide,
                    TriggerCondition::GreaterThan(10.0),
                ))
                .action(EventAction::Log {
                    message: "gas".to_string(),
                })
                .build()
                .unwrap(),
        );

        engine
            .process_sensor_update(reading(SensorKind::CarbonMonoxide, 20.0), now())
            .await;
        let active = engine.get_active_emergencies();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Emergency);
    }

    #[tokio::test]
    async fn should_skip_trigger_when_device_filter_does_not_match() {
        let mut engine =
            EventEngine::empty(FakeDeviceRepository::default(), NoopVisualization);
        engine.add_event(
            SmartHomeEvent::builder()
                .name("Safety monitor smoke")
                .trigger(
                    EventTrigger::new(
                        SensorKind::Smoke,
                        TriggerCondition::GreaterThan(40.0),
                    )
                    .for_device(DeviceKind::SafetyMonitor),
                )
                .action(EventAction::Log {
                    message: "smoke".to_string(),
                })
                .build()
                .unwrap(),
        );

        let mut other = reading(SensorKind::Smoke, 85.0);
        other.device_kind = DeviceKind::EnvironmentalMonitor;
        let fired = engine.process_sensor_update(other, now()).await;
        assert!(fired.is_empty());

        let fired = engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), now())
            .await;
        assert_eq!(fired.len(), 1);
    }

    #[tokio::test]
    async fn should_run_remaining_actions_when_one_fails() {
        let viz = RecordingVisualization {
            fail_alerts: true,
            ..RecordingVisualization::default()
        };
        let mut engine = EventEngine::empty(FakeDeviceRepository::default(), viz.clone());
        engine.add_event(
            SmartHomeEvent::builder()
                .name("Alert then clear")
                .trigger(EventTrigger::new(
                    SensorKind::Smoke,
                    TriggerCondition::GreaterThan(40.0),
                ))
                .action(EventAction::RaiseAlert {
                    room: None,
                    message: "will fail".to_string(),
                })
                .action(EventAction::ClearAlerts { room: None })
                .build()
                .unwrap(),
        );

        let fired = engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), now())
            .await;
        // The event still counts as fired and the second action still ran.
        assert_eq!(fired.len(), 1);
        assert_eq!(viz.cleared.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_set_status_on_every_device_of_the_kind() {
        let container_id = ContainerId::new();
        let device = |name: &str, kind: DeviceKind| {
            Device::builder()
                .container_id(container_id)
                .name(name)
                .kind(kind)
                .room(RoomKind::Kitchen)
                .status(DeviceStatus::Running)
                .build()
                .unwrap()
        };
        let repo = FakeDeviceRepository::with(vec![
            device("Kitchen Lights", DeviceKind::LightControl),
            device("Office Lights", DeviceKind::LightControl),
            device("Kitchen Safety", DeviceKind::SafetyMonitor),
        ]);
        let mut engine = EventEngine::empty(repo.clone(), NoopVisualization);
        engine.add_event(
            SmartHomeEvent::builder()
                .name("Lights out")
                .trigger(EventTrigger::new(
                    SensorKind::Motion,
                    TriggerCondition::LessThan(1.0),
                ))
                .action(EventAction::SetDeviceStatus {
                    device_kind: DeviceKind::LightControl,
                    status: DeviceStatus::Stopped,
                })
                .build()
                .unwrap(),
        );

        let mut low_motion = reading(SensorKind::Motion, 0.0);
        low_motion.device_kind = DeviceKind::SecuritySystem;
        engine.process_sensor_update(low_motion, now()).await;

        for device in repo.snapshot() {
            if device.kind == DeviceKind::LightControl {
                assert_eq!(device.status, DeviceStatus::Stopped);
            } else {
                assert_eq!(device.status, DeviceStatus::Running);
            }
        }
    }

    #[tokio::test]
    async fn should_expire_events_after_the_expiry_window() {
        let mut engine =
            EventEngine::new(FakeDeviceRepository::default(), NoopVisualization);
        let start = now();
        engine
            .process_sensor_update(reading(SensorKind::Smoke, 85.0), start)
            .await;
        assert_eq!(engine.get_active_emergencies().len(), 1);

        let before = engine.cleanup_expired_events(start + Duration::seconds(60));
        assert!(before.is_empty());

        let after =
            engine.cleanup_expired_events(start + Duration::seconds(EVENT_EXPIRY_SECS + 1));
        assert_eq!(after, vec!["Smoke detected".to_string()]);
        assert!(engine.get_active_emergencies().is_empty());
    }
}
