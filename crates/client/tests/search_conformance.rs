//! End-to-end search conformance tests.
//!
//! Each test drives the full path: fluent construction, URL rendering,
//! dispatch through a fake transport, and feed decoding. Assertions pin
//! the exact dispatched URL, since downstream consumers depend on the
//! rendered encoding and pair order.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use lumen_client::{
    ClientError, DateParam, QueryError, ReferenceParam, StringParam, TokenParam, TransportError,
};

use common::fixtures::{error_response, json_response, xml_response, JSON_FEED, SINGLE_ENTRY_FEED};
use common::harness::{client_answering, client_with, FailingTransport, FakeTransport};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_search_by_string() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    let bundle = client
        .search("Patient")
        .matching(StringParam::new("name").matches("james"))
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?name=james"
    );
    assert_eq!(bundle.feed_id, "d039f91a-cc3c-4013-988e-af4d8d0614bd");
    assert_eq!(bundle.total, Some(1));
    assert_eq!(bundle.resources[0].resource_type, "Patient");
}

#[tokio::test]
async fn test_search_by_string_exact() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    client
        .search("Patient")
        .matching(StringParam::new("name").matches_exactly("james"))
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?name%3Aexact=james"
    );
}

#[tokio::test]
async fn test_search_by_token() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    client
        .search("Patient")
        .matching(TokenParam::new("identifier").system_and_code("urn:mrns", "253345"))
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?identifier=urn%3Amrns%7C253345"
    );
}

#[tokio::test]
async fn test_search_by_token_bare_code() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    client
        .search("Patient")
        .matching(TokenParam::new("gender").code("male"))
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?gender=male"
    );
}

#[tokio::test]
async fn test_search_by_chained_reference() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    client
        .search("Patient")
        .matching(
            ReferenceParam::new("provider").has_chained(StringParam::new("name").matches("ORG0")),
        )
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?provider.name=ORG0"
    );
}

#[tokio::test]
async fn test_search_with_all_options() {
    let (client, transport) = client_answering(json_response(JSON_FEED));

    let birthdate = DateParam::new("birthdate");
    let bundle = client
        .search("Patient")
        .encoded_json()
        .matching(birthdate.before_or_equals().day(day(2012, 1, 22)))
        .and(birthdate.after().day(day(2011, 1, 1)))
        .include("Patient.managingOrganization")
        .sort_ascending("birthdate")
        .sort_descending("name")
        .limit_to(123)
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Patient?birthdate=%3C%3D2012-01-22&birthdate=%3E2011-01-01\
         &_include=Patient.managingOrganization&_sort%3Aasc=birthdate&_sort%3Adesc=name\
         &_format=json&_count=123"
    );
    assert_eq!(bundle.resources[0].resource_type, "Patient");
}

#[tokio::test]
async fn test_unsupported_status_preserves_body() {
    let (client, _transport) = client_answering(error_response(404, "simulated not found"));

    let err = client
        .search("Patient")
        .matching(StringParam::new("name").matches("james"))
        .execute()
        .await
        .unwrap_err();

    match err {
        ClientError::UnsupportedStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, b"simulated not found");
        }
        other => panic!("expected UnsupportedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_surfaces() {
    let client = lumen_client::FhirClient::with_parts(
        common::harness::BASE_URL,
        lumen_client::ResourceRegistry::with_core_types(),
        Arc::new(FailingTransport),
        Arc::new(lumen_client::ValueParser),
    )
    .unwrap();

    let err = client.search("Patient").execute().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Other { .. })
    ));
}

#[tokio::test]
async fn test_zero_count_never_dispatches() {
    let transport = Arc::new(FakeTransport::new());
    let client = client_with(Arc::clone(&transport));

    let err = client.search("Patient").limit_to(0).unwrap_err();

    assert!(matches!(
        err,
        ClientError::InvalidQuery(QueryError::InvalidCountLimit { count: 0 })
    ));
    assert!(transport.dispatched_urls().is_empty());
}

#[tokio::test]
async fn test_unknown_resource_type_never_dispatches() {
    let transport = Arc::new(FakeTransport::new());
    let client = client_with(Arc::clone(&transport));

    let err = client.search("Starship").execute().await.unwrap_err();

    match err {
        ClientError::InvalidQuery(QueryError::UnknownResourceType { type_name }) => {
            assert_eq!(type_name, "Starship");
        }
        other => panic!("expected UnknownResourceType, got {:?}", other),
    }
    assert!(transport.dispatched_urls().is_empty());
}

#[tokio::test]
async fn test_search_without_predicates() {
    let (client, transport) = client_answering(xml_response(SINGLE_ENTRY_FEED));

    client.search("Organization").execute().await.unwrap();

    assert_eq!(
        transport.single_url(),
        "http://example.com/fhir/Organization"
    );
}
