//! Container — the persisted root entity grouping one scenario's devices.
//!
//! Deleting a container cascades to its devices and their sensors; that
//! cascade is the storage adapter's responsibility.

use serde::{Deserialize, Serialize};

use crate::error::{HomesimError, ValidationError};
use crate::id::ContainerId;

/// Root entity for one scenario's device tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl Container {
    /// Create a builder for constructing a [`Container`].
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HomesimError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Container`].
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    id: Option<ContainerId>,
    name: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
}

impl ContainerBuilder {
    #[must_use]
    pub fn id(mut self, id: ContainerId) -> Self {
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
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Consume the builder, validate, and return a [`Container`].
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Container, HomesimError> {
        let container = Container {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(false),
        };
        container.validate()?;
        Ok(container)
    }
}
