//! Full-stack wiring test: in-memory store, scenario manager, generator,
//! and event engine working together the way the daemon assembles them.

use chrono::Duration;

use homesim_adapter_storage_memory::MemoryStore;
use homesim_app::config::SimulationConfig;
use homesim_app::event_engine::{EventEngine, SensorReading};
use homesim_app::generator::SensorValueGenerator;
use homesim_app::ports::{DeviceRepository, NoopVisualization, SensorRepository};
use homesim_app::scenario_manager::ScenarioManager;
use homesim_domain::device::DeviceStatus;
use homesim_domain::time::now;

fn manager(store: &MemoryStore) -> ScenarioManager<MemoryStore, MemoryStore, MemoryStore> {
    ScenarioManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        SimulationConfig::builtin(),
    )
}

/// One simulation pass over every running device, mirroring the daemon's
/// tick loop.
async fn tick(store: &MemoryStore, generator: &mut SensorValueGenerator) {
    let ts = now();
    for device in DeviceRepository::get_all(store).await.unwrap() {
        if device.status != DeviceStatus::Running {
            continue;
        }
        for mut sensor in store.find_by_device(device.id).await.unwrap() {
            sensor.last_value = Some(generator.next_value(&sensor, ts));
            SensorRepository::update(store, sensor).await.unwrap();
        }
    }
}

#[tokio::test]
async fn should_generate_in_range_readings_for_a_full_scenario() {
    let store = MemoryStore::new();
    let mut manager = manager(&store);
    let mut generator = SensorValueGenerator::new(SimulationConfig::builtin());

    manager.activate_scenario("Normal Day").await.unwrap();
    generator.set_scenario(Some("Normal Day".to_string()), now());

    tick(&store, &mut generator).await;

    let devices = DeviceRepository::get_all(&store).await.unwrap();
    assert!(!devices.is_empty());
    for device in devices {
        for sensor in store.find_by_device(device.id).await.unwrap() {
            let value = sensor.last_value.expect("sensor never read");
            let (min, max) = sensor.kind.valid_range();
            assert!(
                (min..=max).contains(&value),
                "{} out of range: {value}",
                sensor.name
            );
        }
    }
}

#[tokio::test]
async fn should_raise_and_expire_emergency_through_the_whole_stack() {
    let store = MemoryStore::new();
    let mut manager = manager(&store);
    manager.activate_scenario("Normal Day").await.unwrap();

    let mut engine = EventEngine::new(store.clone(), NoopVisualization);
    let device = DeviceRepository::get_all(&store)
        .await
        .unwrap()
        .into_iter()
        .find(|d| d.name == "Kitchen Safety Monitor")
        .unwrap();

    let start = now();
    let fired = engine
        .process_sensor_update(
            SensorReading {
                kind: homesim_domain::sensor::SensorKind::Smoke,
                value: 85.0,
                device_kind: device.kind,
                room: device.room,
            },
            start,
        )
        .await;
    assert_eq!(fired, vec!["Smoke detected".to_string()]);
    assert_eq!(engine.get_active_emergencies().len(), 1);

    let expired = engine.cleanup_expired_events(start + Duration::seconds(301));
    assert_eq!(expired, vec!["Smoke detected".to_string()]);
    assert!(engine.get_active_emergencies().is_empty());
}

#[tokio::test]
async fn should_preserve_readings_across_scenario_switches() {
    let store = MemoryStore::new();
    let mut manager = manager(&store);
    let mut generator = SensorValueGenerator::new(SimulationConfig::builtin());

    manager.activate_scenario("Normal Day").await.unwrap();
    generator.set_scenario(Some("Normal Day".to_string()), now());
    tick(&store, &mut generator).await;

    let saved: Vec<_> = {
        let mut readings = Vec::new();
        for device in DeviceRepository::get_all(&store).await.unwrap() {
            for sensor in store.find_by_device(device.id).await.unwrap() {
                readings.push((sensor.id, sensor.last_value));
            }
        }
        readings
    };

    manager.activate_scenario("Away Mode").await.unwrap();
    generator.set_scenario(Some("Away Mode".to_string()), now());
    tick(&store, &mut generator).await;

    manager.activate_scenario("Normal Day").await.unwrap();
    generator.set_scenario(Some("Normal Day".to_string()), now());

    for (sensor_id, expected) in saved {
        let sensor = SensorRepository::get_by_id(&store, sensor_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sensor.last_value, expected);
    }
}

#[tokio::test]
async fn should_leave_no_orphans_after_cleanup() {
    let store = MemoryStore::new();
    let mut manager = manager(&store);
    manager.activate_scenario("Party Mode").await.unwrap();
    manager.activate_scenario("Hot Day").await.unwrap();

    manager.cleanup_scenario("Party Mode").await.unwrap();
    manager.cleanup_scenario("Hot Day").await.unwrap();

    assert!(DeviceRepository::get_all(&store).await.unwrap().is_empty());
    assert!(manager.active_scenario().is_none());
}
