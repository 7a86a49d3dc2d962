//! # homesim-app
//!
//! Application layer — simulation engines and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ContainerRepository` / `DeviceRepository` / `SensorRepository` — CRUD
//!     for the persisted scenario entities
//!   - `Visualization` — push computed values and alerts to a UI collaborator
//! - Provide the simulation core:
//!   - `SensorValueGenerator` — time- and scenario-dependent readings
//!   - `ScenarioManager` — single active scenario, snapshots, restore
//!   - `EventEngine` — debounced triggers, expiring events, emergencies
//! - Carry the template configuration the scenario manager instantiates from
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only. Never imports adapter crates; adapters
//! depend on *this* crate, not the reverse.

pub mod config;
pub mod event_engine;
pub mod generator;
pub mod ports;
pub mod scenario_manager;
