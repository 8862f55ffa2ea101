//! The client façade.
//!
//! [`FhirClient`] wires the collaborators together: the resource
//! registry resolves type names to collection paths, the transport
//! completes the exchange, and the parser decodes embedded resources.
//! [`FhirClient::search`] starts a [`SearchBuilder`], a thin fluent
//! layer over [`QuerySpec`] that ends in [`SearchBuilder::execute`].
//!
//! Each builder owns its query spec as a plain value, so concurrent
//! searches on one shared client never contend.

use std::sync::Arc;

use tracing::debug;

use lumen_fhir::ResourceRegistry;

use crate::bundle::{self, Bundle};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, QueryError, TransportError};
use crate::parser::{ResourceParser, ValueParser};
use crate::search::{Predicate, QuerySpec};
use crate::transport::{HttpTransport, Transport, TransportRequest};

/// A search client bound to one server base URL.
///
/// Cheap to clone; clones share the registry, transport, and parser.
#[derive(Clone)]
pub struct FhirClient {
    base_url: String,
    registry: Arc<ResourceRegistry>,
    transport: Arc<dyn Transport>,
    parser: Arc<dyn ResourceParser>,
}

impl FhirClient {
    /// Creates a client from configuration, with the default transport,
    /// parser, and core type registry.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_parts(
            config.base_url,
            ResourceRegistry::with_core_types(),
            Arc::new(transport),
            Arc::new(ValueParser),
        )
    }

    /// Creates a client from explicit collaborators.
    ///
    /// This is the injection seam: tests hand in a canned transport and
    /// observe the URLs the client dispatches.
    pub fn with_parts(
        base_url: impl Into<String>,
        registry: ResourceRegistry,
        transport: Arc<dyn Transport>,
        parser: Arc<dyn ResourceParser>,
    ) -> ClientResult<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|_| {
            ClientError::Transport(TransportError::InvalidUrl {
                url: base_url.clone(),
            })
        })?;

        Ok(Self {
            base_url,
            registry: Arc::new(registry),
            transport,
            parser,
        })
    }

    /// The server base URL searches are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a search over the given resource type.
    ///
    /// The type is validated against the registry when the search
    /// executes, not here, so builder chains stay infallible until a
    /// contract is actually violated.
    pub fn search(&self, resource_type: impl Into<String>) -> SearchBuilder<'_> {
        SearchBuilder {
            client: self,
            spec: QuerySpec::new(resource_type),
        }
    }
}

impl std::fmt::Debug for FhirClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FhirClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// A search in construction, bound to the client that will execute it.
#[derive(Debug, Clone)]
pub struct SearchBuilder<'a> {
    client: &'a FhirClient,
    spec: QuerySpec,
}

impl SearchBuilder<'_> {
    /// Adds a predicate. All predicates are AND-joined.
    pub fn matching(mut self, predicate: Predicate) -> Self {
        self.spec = self.spec.matching(predicate);
        self
    }

    /// Adds a further predicate; reads better mid-chain.
    pub fn and(self, predicate: Predicate) -> Self {
        self.matching(predicate)
    }

    /// Adds an include directive (e.g. `Patient.managingOrganization`).
    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.spec = self.spec.include(path);
        self
    }

    /// Adds an ascending sort directive.
    pub fn sort_ascending(mut self, parameter: impl Into<String>) -> Self {
        self.spec = self.spec.sort_ascending(parameter);
        self
    }

    /// Adds a descending sort directive.
    pub fn sort_descending(mut self, parameter: impl Into<String>) -> Self {
        self.spec = self.spec.sort_descending(parameter);
        self
    }

    /// Requests the JSON rendition of the response.
    pub fn encoded_json(mut self) -> Self {
        self.spec = self.spec.encoded_json();
        self
    }

    /// Caps the number of returned results. Zero is rejected here,
    /// before any network activity.
    pub fn limit_to(mut self, count: u32) -> ClientResult<Self> {
        self.spec = self.spec.limit_to(count).map_err(ClientError::from)?;
        Ok(self)
    }

    /// The accumulated query spec.
    pub fn query(&self) -> &QuerySpec {
        &self.spec
    }

    /// Executes the search: renders the URL, completes one exchange, and
    /// decodes the feed.
    ///
    /// Any failure is terminal for this search; the client never retries.
    pub async fn execute(self) -> ClientResult<Bundle> {
        let base_segment = self
            .client
            .registry
            .base_path_for(self.spec.resource_type())
            .map_err(|e| ClientError::InvalidQuery(QueryError::from(e)))?;

        let url = self.spec.render_url(&self.client.base_url, base_segment);
        debug!(resource_type = self.spec.resource_type(), url = %url, "dispatching search");

        let response = self
            .client
            .transport
            .execute(TransportRequest::get(&url))
            .await?;

        if !response.is_success() {
            debug!(status = response.status, "search rejected by server");
            return Err(ClientError::UnsupportedStatus {
                status: response.status,
                body: response.body,
            });
        }

        let bundle = bundle::decode(
            &response.body,
            response.content_type.as_deref(),
            self.spec.expected_format(),
            self.client.parser.as_ref(),
        )?;

        debug!(
            feed_id = %bundle.feed_id,
            resources = bundle.len(),
            "search complete"
        );

        Ok(bundle)
    }
}
