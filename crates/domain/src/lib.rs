//! # homesim-domain
//!
//! Pure domain model for the homesim smart-home environment simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sensors** (kind, baseline, variation range, error definition)
//! - Define **Devices** (grouped sensors with a room and a run status)
//! - Define **Containers** (the persisted root entity of one scenario)
//! - Define **Events** (debounced triggers + ordered actions, normal and
//!   emergency severity)
//! - Define **Snapshots** (saved device/sensor state restored on scenario
//!   reactivation)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod container;
pub mod device;
pub mod event;
pub mod room;
pub mod scenario;
pub mod sensor;
