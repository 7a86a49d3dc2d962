//! Sensor value generation — baseline, diurnal drift, scenario offset, noise.
//!
//! A generated value is the sum of four components, clamped to the sensor
//! kind's valid range:
//!
//! ```text
//! value = baseline + time_of_day(hour) + scenario_offset + noise
//! ```
//!
//! The baseline is cached per sensor kind on first use and held for the
//! lifetime of the active scenario: the first base value observed for a kind
//! anchors every later reading of that kind, so values drift around a stable
//! center instead of re-anchoring every tick. Switching scenarios clears the
//! cache, letting each kind re-anchor under the new conditions.

use std::collections::HashMap;

use chrono::Timelike;
use rand::Rng;

use homesim_domain::sensor::{Sensor, SensorKind};
use homesim_domain::time::Timestamp;

use crate::config::SimulationConfig;

/// Diurnal offset for a sensor kind at a given hour (0..=23).
///
/// Only kinds with a meaningful daily rhythm get one; everything else
/// reads 0.0.
#[must_use]
pub fn time_of_day_offset(kind: SensorKind, hour: u32) -> f64 {
    match kind {
        SensorKind::Temperature => match hour {
            0..=5 => -2.0,
            6..=11 => 0.0,
            12..=17 => 2.0,
            _ => 0.0,
        },
        SensorKind::Brightness => {
            if (6..=17).contains(&hour) {
                50.0
            } else {
                -30.0
            }
        }
        SensorKind::Motion => {
            if (8..=21).contains(&hour) {
                0.3
            } else {
                -0.3
            }
        }
        _ => 0.0,
    }
}

/// Produces plausible sensor readings for the active scenario.
#[derive(Debug)]
pub struct SensorValueGenerator {
    config: SimulationConfig,
    scenario: Option<String>,
    scenario_started: Option<Timestamp>,
    baselines: HashMap<SensorKind, f64>,
}

impl SensorValueGenerator {
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            scenario: None,
            scenario_started: None,
            baselines: HashMap::new(),
        }
    }

    /// The scenario whose adjustments currently apply, if any.
    #[must_use]
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    /// When the current scenario was set.
    #[must_use]
    pub fn scenario_started(&self) -> Option<Timestamp> {
        self.scenario_started
    }

    /// Switch the active scenario and clear every cached baseline.
    ///
    /// Clearing forces each sensor kind to re-anchor on the next base value
    /// it observes, instead of carrying the previous scenario's center into
    /// the new one.
    pub fn set_scenario(&mut self, scenario: Option<String>, now: Timestamp) {
        self.scenario_started = scenario.is_some().then_some(now);
        self.scenario = scenario;
        self.baselines.clear();
    }

    /// Generate the next reading for a sensor at `now`.
    ///
    /// The first call for a kind caches `sensor.base_value` as that kind's
    /// baseline; later calls reuse the cached baseline and ignore the
    /// sensor's own base value. The result is always within the kind's valid
    /// range, even when the summed components fall outside it.
    pub fn next_value(&mut self, sensor: &Sensor, now: Timestamp) -> f64 {
        let baseline = *self
            .baselines
            .entry(sensor.kind)
            .or_insert(sensor.base_value);
        let diurnal = time_of_day_offset(sensor.kind, now.hour());
        let scenario = self
            .scenario
            .as_deref()
            .map_or(0.0, |name| self.config.scenario_offset(name, sensor.kind));
        let noise = if sensor.variation_range > 0.0 {
            rand::thread_rng().gen_range(-sensor.variation_range..=sensor.variation_range)
        } else {
            0.0
        };

        let (min, max) = sensor.kind.valid_range();
        (baseline + diurnal + scenario + noise).clamp(min, max)
    }
}
