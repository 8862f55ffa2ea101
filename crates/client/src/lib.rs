//! # Lumen FHIR Search Client
//!
//! A typed client library for the FHIR search interaction: fluent
//! construction of search requests, deterministic URL rendering, and
//! decoding of the feed documents servers answer with.
//!
//! ## Architecture
//!
//! - [`client`] - The [`FhirClient`] façade and [`SearchBuilder`]
//! - [`search`] - Typed predicates, query accumulation, URL rendering
//! - [`bundle`] - Feed decoding (Atom XML and its JSON rendition)
//! - [`parser`] - The wire-format parser boundary
//! - [`transport`] - The transport boundary and the reqwest default
//! - [`config`] - Client configuration
//! - [`error`] - The error taxonomy, organized by search phase
//!
//! ## Example
//!
//! ```rust,no_run
//! use lumen_client::{ClientConfig, FhirClient, StringParam};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FhirClient::new(ClientConfig::new("http://example.com/fhir"))?;
//!
//! let bundle = client
//!     .search("Patient")
//!     .matching(StringParam::new("name").matches("james"))
//!     .sort_ascending("name")
//!     .limit_to(50)?
//!     .execute()
//!     .await?;
//!
//! for resource in &bundle.resources {
//!     println!("{}", resource.resource_type);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod bundle;
pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod search;
pub mod transport;

pub use bundle::Bundle;
pub use client::{FhirClient, SearchBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ParseError, QueryError, TransportError};
pub use parser::{ResourceParser, ResourcePayload, TypedResource, ValueParser};
pub use search::{
    DateParam, Modifier, Predicate, QuerySpec, ReferenceParam, SortDirection, StringParam,
    TokenParam,
};
pub use transport::{Transport, TransportRequest, TransportResponse};

// Re-exported so callers need only this crate for the common path.
pub use lumen_fhir::{ResourceDefinition, ResourceRegistry, WireFormat};

/// Initialize the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lumen_client={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
