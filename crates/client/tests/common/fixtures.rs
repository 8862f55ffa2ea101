//! Canned feed documents for client testing.

use lumen_client::TransportResponse;

/// An Atom feed with one embedded Patient, the shape a DSTU-era server
/// answers a search with.
pub const SINGLE_ENTRY_FEED: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<title>Search results</title>
<id>d039f91a-cc3c-4013-988e-af4d8d0614bd</id>
<link rel="self" href="http://example.com/fhir/Patient?name=james"/>
<os:totalResults xmlns:os="http://a9.com/-/spec/opensearch/1.1/">1</os:totalResults>
<author><name>example-server</name></author>
<entry>
<title>Patient 123</title>
<id>http://example.com/fhir/Patient/123</id>
<content type="text/xml"><Patient xmlns="http://hl7.org/fhir"><identifier><system value="urn:mrns"/><value value="253345"/></identifier><name><family value="Cardinal"/><given value="John"/></name><active value="true"/></Patient></content>
</entry>
</feed>"#;

/// A well-formed feed with no entries.
pub const EMPTY_FEED: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<id>urn:uuid:empty-feed</id>
<os:totalResults xmlns:os="http://a9.com/-/spec/opensearch/1.1/">0</os:totalResults>
</feed>"#;

/// A feed missing its mandatory id.
pub const FEED_WITHOUT_ID: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
<title>no id here</title>
</feed>"#;

/// The JSON rendition of a one-entry feed.
pub const JSON_FEED: &str = r#"{
    "id": "d039f91a-cc3c-4013-988e-af4d8d0614bd",
    "totalResults": 1,
    "entry": [
        {
            "id": "http://example.com/fhir/Patient/123",
            "content": {
                "resourceType": "Patient",
                "id": "123",
                "name": [{"family": ["Cardinal"], "given": ["John"]}]
            }
        }
    ]
}"#;

/// A 200 response declaring the XML feed content type.
pub fn xml_response(feed: &str) -> TransportResponse {
    TransportResponse {
        status: 200,
        content_type: Some("application/fhir+xml; charset=UTF-8".to_string()),
        body: feed.as_bytes().to_vec(),
    }
}

/// A 200 response declaring the JSON feed content type.
pub fn json_response(feed: &str) -> TransportResponse {
    TransportResponse {
        status: 200,
        content_type: Some("application/fhir+json; charset=UTF-8".to_string()),
        body: feed.as_bytes().to_vec(),
    }
}

/// A non-2xx response with a plain-text body.
pub fn error_response(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        content_type: Some("text/plain".to_string()),
        body: body.as_bytes().to_vec(),
    }
}
