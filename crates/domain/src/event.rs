//! Smart-home events — debounced triggers plus ordered actions.
//!
//! An event watches one or more sensor kinds through [`EventTrigger`]s and,
//! when any trigger fires, runs its [`EventAction`]s in order. Events carry
//! a severity: emergency events live in a separately tracked list inside the
//! engine and are queryable through an active-emergencies view.

mod action;
mod trigger;

pub use action::EventAction;
pub use trigger::{EventTrigger, TriggerCondition, TRIGGER_DEBOUNCE_SECS};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{HomesimError, ValidationError};
use crate::id::EventId;
use crate::time::Timestamp;

/// How long a triggered event stays active before it auto-expires, in seconds.
pub const EVENT_EXPIRY_SECS: i64 = 300;

/// Severity class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Emergency,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Emergency => f.write_str("emergency"),
        }
    }
}

/// A rule that reacts to sensor readings by executing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartHomeEvent {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub triggers: Vec<EventTrigger>,
    pub actions: Vec<EventAction>,
    pub is_active: bool,
    pub start_time: Option<Timestamp>,
    pub severity: Severity,
}

impl SmartHomeEvent {
    /// Create a builder for constructing a [`SmartHomeEvent`].
    #[must_use]
    pub fn builder() -> SmartHomeEventBuilder {
        SmartHomeEventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    pub fn validate(&self) -> Result<(), HomesimError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        Ok(())
    }

    /// Record that this event fired: active from `now` until expiry.
    pub fn mark_triggered(&mut self, now: Timestamp) {
        self.is_active = true;
        self.start_time = Some(now);
    }

    /// Deactivate the event if it has been active longer than
    /// [`EVENT_EXPIRY_SECS`]. Returns `true` when the event expired on this
    /// call.
    pub fn check_expiration(&mut self, now: Timestamp) -> bool {
        if self.is_active {
            if let Some(start) = self.start_time {
                if now - start > Duration::seconds(EVENT_EXPIRY_SECS) {
                    self.is_active = false;
                    self.start_time = None;
                    return true;
                }
            }
        }
        false
    }
}

/// Step-by-step builder for [`SmartHomeEvent`].
#[derive(Debug, Default)]
pub struct SmartHomeEventBuilder {
    id: Option<EventId>,
    name: Option<String>,
    description: Option<String>,
    triggers: Vec<EventTrigger>,
    actions: Vec<EventAction>,
    severity: Option<Severity>,
}

impl SmartHomeEventBuilder {
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: EventTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: EventAction) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Consume the builder, validate, and return a [`SmartHomeEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<SmartHomeEvent, HomesimError> {
        let event = SmartHomeEvent {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            triggers: self.triggers,
            actions: self.actions,
            is_active: false,
            start_time: None,
            severity: self.severity.unwrap_or_default(),
        };
        event.validate()?;
        Ok(event)
    }
}
