//! The wire-format parser boundary.
//!
//! Decoding resource bodies is the job of a collaborator behind the
//! [`ResourceParser`] trait, kept narrow so test doubles are plain
//! hand-written fakes. The resource type is always read from the payload's
//! own type tag (the XML root element or the JSON `resourceType` field),
//! never assumed from the request that produced it.
//!
//! [`ValueParser`] is the default implementation: it tags the payload and
//! keeps the body generic (a `serde_json::Value` for JSON, the raw
//! document for XML) rather than materializing version-specific resource
//! structs.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::Value;

use lumen_fhir::WireFormat;

use crate::error::ParseError;

/// A decoded resource, tagged with its own declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedResource {
    /// The resource type name read from the payload (e.g. "Patient").
    pub resource_type: String,
    /// The decoded payload.
    pub payload: ResourcePayload,
}

/// The body of a decoded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePayload {
    /// A parsed JSON resource body.
    Json(Value),
    /// A well-formed XML resource document, kept verbatim.
    Xml(String),
}

impl TypedResource {
    /// Returns the JSON body, if the resource was decoded from JSON.
    pub fn json(&self) -> Option<&Value> {
        match &self.payload {
            ResourcePayload::Json(value) => Some(value),
            ResourcePayload::Xml(_) => None,
        }
    }
}

/// Decodes one embedded resource payload into a typed resource.
pub trait ResourceParser: Send + Sync {
    /// Parses a payload in the given wire format.
    fn parse(&self, payload: &str, format: WireFormat) -> Result<TypedResource, ParseError>;
}

/// The default, type-model-agnostic parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueParser;

impl ResourceParser for ValueParser {
    fn parse(&self, payload: &str, format: WireFormat) -> Result<TypedResource, ParseError> {
        match format {
            WireFormat::Json => parse_json(payload),
            WireFormat::Xml => parse_xml(payload),
        }
    }
}

fn parse_json(payload: &str) -> Result<TypedResource, ParseError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| ParseError::Unparseable {
        format: "json",
        message: e.to_string(),
    })?;

    let resource_type = value
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingTypeTag)?
        .to_string();

    Ok(TypedResource {
        resource_type,
        payload: ResourcePayload::Json(value),
    })
}

fn parse_xml(payload: &str) -> Result<TypedResource, ParseError> {
    let mut reader = Reader::from_str(payload);
    reader.config_mut().trim_text(true);

    let mut resource_type: Option<String> = None;

    // Walk the whole document: the first start tag names the resource,
    // and reading to Eof proves the payload is well-formed.
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if resource_type.is_none() {
                    let local = e.local_name();
                    let name = std::str::from_utf8(local.as_ref())
                        .map_err(|e| ParseError::Unparseable {
                            format: "xml",
                            message: e.to_string(),
                        })?
                        .to_string();
                    resource_type = Some(name);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::Unparseable {
                    format: "xml",
                    message: e.to_string(),
                });
            }
        }
    }

    let resource_type = resource_type.ok_or(ParseError::MissingTypeTag)?;

    Ok(TypedResource {
        resource_type,
        payload: ResourcePayload::Xml(payload.to_string()),
    })
}
