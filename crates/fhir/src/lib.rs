//! # lumen-fhir - FHIR Resource Type Model
//!
//! This crate provides the resource type model shared by the Lumen FHIR
//! client: the resource registry (which resource types exist, where their
//! collections live relative to the server base URL, and which search
//! parameters they declare), the search parameter kinds, and the wire-format
//! media types used for content negotiation.
//!
//! The registry is an explicit, injectable value rather than ambient global
//! state: construct one (or use [`ResourceRegistry::with_core_types`]),
//! share it behind an `Arc`, and hand it to whatever builds requests. It is
//! read-only at search time and safe to share between concurrent searches
//! without locking.
//!
//! ## Modules
//!
//! - [`registry`] - Resource definitions and the registry
//! - [`params`] - Search parameter kinds and definitions
//! - [`format`] - Wire formats and media type parsing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod format;
pub mod params;
pub mod registry;

pub use format::{ContentType, WireFormat};
pub use params::{SearchParamDef, SearchParamType};
pub use registry::{RegistryError, ResourceDefinition, ResourceRegistry};
