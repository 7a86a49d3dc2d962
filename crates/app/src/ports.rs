//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the engine layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod storage;
pub mod visualization;

pub use storage::{ContainerRepository, DeviceRepository, SensorRepository};
pub use visualization::{NoopVisualization, Visualization};
