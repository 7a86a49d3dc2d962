//! # homesimd — smart-home simulation daemon
//!
//! Composition root that wires the storage adapter and the simulation
//! engines together and drives the tick loop.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Construct the in-memory store and the engines
//! - Activate the startup scenario
//! - Tick: generate readings, persist them, evaluate events, expire events
//! - Handle graceful shutdown (SIGINT), deactivating the active scenario
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod viz;

use std::collections::BTreeMap;

use homesim_adapter_storage_memory::MemoryStore;
use homesim_app::config::SimulationConfig;
use homesim_app::event_engine::{EventEngine, SensorReading};
use homesim_app::generator::SensorValueGenerator;
use homesim_app::ports::{DeviceRepository, SensorRepository, Visualization};
use homesim_app::scenario_manager::ScenarioManager;
use homesim_domain::device::DeviceStatus;
use homesim_domain::error::HomesimError;

use crate::config::Config;
use crate::viz::TracingVisualization;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let store = MemoryStore::new();
    let viz = TracingVisualization;
    let mut manager = ScenarioManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        SimulationConfig::builtin(),
    );
    let mut generator = SensorValueGenerator::new(SimulationConfig::builtin());
    let mut engine = EventEngine::new(store.clone(), viz);

    let scenario = config.simulation.scenario.clone();
    manager.activate_scenario(&scenario).await?;
    generator.set_scenario(Some(scenario.clone()), homesim_domain::time::now());
    push_room_layouts(&store, &viz).await?;
    tracing::info!(scenario = %scenario, "simulation started");

    let mut ticker =
        tokio::time::interval(std::time::Duration::from_secs(config.simulation.tick_interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(error) = run_tick(&store, &viz, &mut generator, &mut engine).await {
                    tracing::error!(%error, "tick failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    manager.deactivate_current_scenario().await?;
    tracing::info!("simulation stopped");
    Ok(())
}

/// One simulation step: read every sensor of every running device, persist
/// the new value, and feed it to the event engine.
async fn run_tick(
    store: &MemoryStore,
    viz: &TracingVisualization,
    generator: &mut SensorValueGenerator,
    engine: &mut EventEngine<MemoryStore, TracingVisualization>,
) -> Result<(), HomesimError> {
    let now = homesim_domain::time::now();
    for device in DeviceRepository::get_all(store).await? {
        if device.status != DeviceStatus::Running {
            continue;
        }
        for mut sensor in store.find_by_device(device.id).await? {
            let value = generator.next_value(&sensor, now);
            sensor.last_value = Some(value);
            let sensor = SensorRepository::update(store, sensor).await?;

            if let Err(error) = viz
                .update_sensor_value(device.room, device.name.clone(), sensor.name.clone(), value)
                .await
            {
                tracing::warn!(%error, "visualization update failed");
            }

            let reading = SensorReading {
                kind: sensor.kind,
                value,
                device_kind: device.kind,
                room: device.room,
            };
            engine.process_sensor_update(reading, now).await;
        }
    }
    engine.cleanup_expired_events(now);
    Ok(())
}

/// Send every room's device and sensor lists to the visualization.
async fn push_room_layouts(
    store: &MemoryStore,
    viz: &TracingVisualization,
) -> Result<(), HomesimError> {
    let mut by_room = BTreeMap::new();
    for device in DeviceRepository::get_all(store).await? {
        let sensors = store.find_by_device(device.id).await?;
        let (devices, room_sensors) = by_room
            .entry(device.room.label())
            .or_insert_with(|| (Vec::new(), Vec::new()));
        room_sensors.extend(sensors);
        devices.push(device);
    }
    for (devices, sensors) in by_room.into_values() {
        let room = devices[0].room;
        if let Err(error) = viz.update_room_data(room, devices, sensors).await {
            tracing::warn!(%error, %room, "room layout update failed");
        }
    }
    Ok(())
}
