//! Fake transport and client construction for testing.
//!
//! The fake transport is a hand-written double: it records every URL the
//! client dispatches and answers from a queue of canned responses, so
//! tests assert on the exact rendered URL without any network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use lumen_client::{
    FhirClient, ResourceRegistry, Transport, TransportError, TransportRequest, TransportResponse,
    ValueParser,
};

/// The base URL every test client is bound to.
pub const BASE_URL: &str = "http://example.com/fhir";

/// A transport double with canned responses and captured requests.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    /// Creates a fake with no canned responses; any exchange fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a canned response.
    pub fn push_response(&self, response: TransportResponse) {
        self.responses
            .lock()
            .unwrap()
            .push_back(response);
    }

    /// URLs dispatched so far, in order.
    pub fn dispatched_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// The single dispatched URL; panics unless exactly one was sent.
    pub fn single_url(&self) -> String {
        let urls = self.dispatched_urls();
        assert_eq!(urls.len(), 1, "expected exactly one dispatched request");
        urls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.url);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other {
                message: "no canned response queued".to_string(),
            })
    }
}

/// A transport that always fails, for exercising the dispatch error path.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn execute(
        &self,
        _request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Other {
            message: "connection refused".to_string(),
        })
    }
}

/// A client bound to [`BASE_URL`] over the given fake transport.
pub fn client_with(transport: Arc<FakeTransport>) -> FhirClient {
    FhirClient::with_parts(
        BASE_URL,
        ResourceRegistry::with_core_types(),
        transport,
        Arc::new(ValueParser),
    )
    .expect("test client construction")
}

/// A client and its fake transport, with one canned response queued.
pub fn client_answering(response: TransportResponse) -> (FhirClient, Arc<FakeTransport>) {
    let transport = Arc::new(FakeTransport::new());
    transport.push_response(response);
    (client_with(Arc::clone(&transport)), transport)
}
