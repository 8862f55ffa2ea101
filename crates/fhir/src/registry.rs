//! The resource type registry.
//!
//! Maps resource type names to their collection base path and their
//! declared search parameters. The registry is built once, shared
//! read-only, and consulted when a search is rendered into a URL.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{SearchParamDef, SearchParamType};

/// Errors raised by registry lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The resource type is not registered.
    #[error("unknown resource type: {type_name}")]
    UnknownResourceType {
        /// The type name that was looked up.
        type_name: String,
    },

    /// A resource type was registered twice.
    #[error("resource type already registered: {type_name}")]
    DuplicateResourceType {
        /// The type name that was registered twice.
        type_name: String,
    },
}

/// The definition of one resource type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// The resource type name (e.g. "Patient").
    type_name: String,

    /// The path segment under the server base URL that addresses the
    /// type's collection. Conventionally equal to the type name.
    base_segment: String,

    /// Declared search parameters, in declaration order.
    params: Vec<SearchParamDef>,
}

impl ResourceDefinition {
    /// Creates a definition whose base segment equals the type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            base_segment: type_name.clone(),
            type_name,
            params: Vec::new(),
        }
    }

    /// Declares a search parameter on this definition.
    pub fn with_param(mut self, name: impl Into<String>, param_type: SearchParamType) -> Self {
        self.params.push(SearchParamDef::new(name, param_type));
        self
    }

    /// Returns the resource type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the collection path segment.
    pub fn base_segment(&self) -> &str {
        &self.base_segment
    }

    /// Looks up a declared search parameter by name.
    pub fn search_param(&self, name: &str) -> Option<&SearchParamDef> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns all declared search parameters.
    pub fn search_params(&self) -> &[SearchParamDef] {
        &self.params
    }
}

/// Registry of resource definitions, keyed by type name.
///
/// Replaces ambient static lookups: callers construct a registry, register
/// the types their server supports, and inject it into the client.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    definitions: HashMap<String, ResourceDefinition>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the core resource types the
    /// client is commonly pointed at.
    pub fn with_core_types() -> Self {
        let mut registry = Self::new();

        for definition in core_definitions() {
            // Core definitions are distinct by construction.
            let _ = registry.register(definition);
        }

        registry
    }

    /// Registers a resource definition.
    pub fn register(&mut self, definition: ResourceDefinition) -> Result<(), RegistryError> {
        let type_name = definition.type_name().to_string();
        if self.definitions.contains_key(&type_name) {
            return Err(RegistryError::DuplicateResourceType { type_name });
        }
        self.definitions.insert(type_name, definition);
        Ok(())
    }

    /// Looks up a resource definition by type name.
    pub fn definition(&self, type_name: &str) -> Result<&ResourceDefinition, RegistryError> {
        self.definitions
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// Returns the collection path segment for a resource type.
    pub fn base_path_for(&self, type_name: &str) -> Result<&str, RegistryError> {
        self.definition(type_name).map(|d| d.base_segment())
    }

    /// Returns true if the type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.definitions.contains_key(type_name)
    }
}

/// Definitions for the core resource types.
fn core_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition::new("Patient")
            .with_param("name", SearchParamType::String)
            .with_param("family", SearchParamType::String)
            .with_param("given", SearchParamType::String)
            .with_param("identifier", SearchParamType::Token)
            .with_param("gender", SearchParamType::Token)
            .with_param("birthdate", SearchParamType::Date)
            .with_param("provider", SearchParamType::Reference)
            .with_param("organization", SearchParamType::Reference),
        ResourceDefinition::new("Organization")
            .with_param("name", SearchParamType::String)
            .with_param("identifier", SearchParamType::Token)
            .with_param("partof", SearchParamType::Reference),
        ResourceDefinition::new("Practitioner")
            .with_param("name", SearchParamType::String)
            .with_param("identifier", SearchParamType::Token)
            .with_param("organization", SearchParamType::Reference),
        ResourceDefinition::new("Observation")
            .with_param("code", SearchParamType::Token)
            .with_param("date", SearchParamType::Date)
            .with_param("subject", SearchParamType::Reference)
            .with_param("value-quantity", SearchParamType::Quantity),
    ]
}
