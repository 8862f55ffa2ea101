//! Feed decoding.
//!
//! A successful search returns a feed document: an Atom feed for the
//! default XML format, or its JSON rendition (`id`, `totalResults`,
//! `entry[].content`). The decoder validates the declared content type
//! first — a mismatch is [`ClientError::UnsupportedFormat`] before any
//! byte of the body is parsed — then walks the feed structure and hands
//! each embedded resource payload to the [`ResourceParser`] collaborator.
//!
//! Structural problems surface as [`ClientError::MalformedResponse`],
//! carrying the feed id whenever it had already been read.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::Value;

use lumen_fhir::{ContentType, WireFormat};

use crate::error::{ClientError, ClientResult};
use crate::parser::{ResourceParser, TypedResource};

/// A decoded search result: feed metadata plus the embedded resources,
/// in feed order.
///
/// Bundles are plain values owned by the caller; they keep no reference
/// to the search that produced them.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// The feed id.
    pub feed_id: String,
    /// The declared total result count, when the server sent one.
    pub total: Option<u32>,
    /// The decoded resources, in feed order.
    pub resources: Vec<TypedResource>,
}

impl Bundle {
    /// Number of resources in the bundle.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true when the bundle holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Decodes a response body into a [`Bundle`].
///
/// `content_type` is the declared Content-Type header value; it must
/// match `expected` (allowing a trailing `charset` parameter) or the
/// decode fails with `UnsupportedFormat` before parsing.
pub fn decode(
    body: &[u8],
    content_type: Option<&str>,
    expected: WireFormat,
    parser: &dyn ResourceParser,
) -> ClientResult<Bundle> {
    let declared = content_type.ok_or_else(|| ClientError::UnsupportedFormat {
        content_type: "(none)".to_string(),
    })?;

    let parsed = ContentType::parse(declared).ok_or_else(|| ClientError::UnsupportedFormat {
        content_type: declared.to_string(),
    })?;

    if parsed.format != expected || !parsed.charset_supported() {
        return Err(ClientError::UnsupportedFormat {
            content_type: declared.to_string(),
        });
    }

    let text = std::str::from_utf8(body)
        .map_err(|_| ClientError::malformed("response body is not valid utf-8"))?;

    match expected {
        WireFormat::Xml => decode_xml_feed(text, parser),
        WireFormat::Json => decode_json_feed(text, parser),
    }
}

/// A `MalformedResponse` carrying whatever feed context is available.
fn malformed_in(feed_id: &Option<String>, message: impl Into<String>) -> ClientError {
    ClientError::MalformedResponse {
        message: message.into(),
        feed_id: feed_id.clone(),
    }
}

fn decode_xml_feed(text: &str, parser: &dyn ResourceParser) -> ClientResult<Bundle> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    // Locate the root element, skipping the prolog.
    let root = loop {
        match reader
            .read_event()
            .map_err(|e| ClientError::malformed(e.to_string()))?
        {
            Event::Start(e) => break e,
            Event::Empty(e) => {
                // A childless root cannot carry the mandatory feed id.
                return Err(if local_name(&e)? == "feed" {
                    ClientError::malformed("feed is missing its id")
                } else {
                    ClientError::malformed("root element is not an Atom feed")
                });
            }
            Event::Eof => return Err(ClientError::malformed("empty response document")),
            _ => continue,
        }
    };

    if local_name(&root)? != "feed" {
        return Err(ClientError::malformed("root element is not an Atom feed"));
    }

    let mut feed_id: Option<String> = None;
    let mut total: Option<u32> = None;
    let mut resources: Vec<TypedResource> = Vec::new();

    // Every Start seen here is a direct child of <feed>: entries are
    // consumed by decode_xml_entry and unknown children are skipped whole.
    loop {
        match reader
            .read_event()
            .map_err(|e| malformed_in(&feed_id, e.to_string()))?
        {
            Event::Start(e) => match local_name(&e)?.as_str() {
                "id" => {
                    let end = e.to_end().into_owned();
                    let text = reader
                        .read_text(end.name())
                        .map_err(|e| malformed_in(&feed_id, e.to_string()))?;
                    feed_id = Some(text.trim().to_string());
                }
                "totalResults" => {
                    let end = e.to_end().into_owned();
                    let text = reader
                        .read_text(end.name())
                        .map_err(|e| malformed_in(&feed_id, e.to_string()))?;
                    let count = text.trim().parse::<u32>().map_err(|_| {
                        malformed_in(&feed_id, "totalResults is not a non-negative integer")
                    })?;
                    total = Some(count);
                }
                "entry" => {
                    let resource = decode_xml_entry(&mut reader, parser, &feed_id)?;
                    resources.push(resource);
                }
                _ => {
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end(end.name())
                        .map_err(|e| malformed_in(&feed_id, e.to_string()))?;
                }
            },
            Event::Empty(_) => {}
            Event::End(_) => break,
            Event::Eof => return Err(malformed_in(&feed_id, "unexpected end of feed document")),
            _ => {}
        }
    }

    let feed_id = feed_id.ok_or_else(|| ClientError::malformed("feed is missing its id"))?;

    Ok(Bundle {
        feed_id,
        total,
        resources,
    })
}

/// Decodes one `<entry>`: finds its `<content>`, hands the raw embedded
/// document to the parser, and consumes the rest of the entry.
fn decode_xml_entry(
    reader: &mut Reader<&[u8]>,
    parser: &dyn ResourceParser,
    feed_id: &Option<String>,
) -> ClientResult<TypedResource> {
    let mut resource: Option<TypedResource> = None;

    loop {
        match reader
            .read_event()
            .map_err(|e| malformed_in(feed_id, e.to_string()))?
        {
            Event::Start(e) => {
                if local_name(&e)? == "content" {
                    let end = e.to_end().into_owned();
                    let raw = reader
                        .read_text(end.name())
                        .map_err(|e| malformed_in(feed_id, e.to_string()))?;
                    let raw = raw.trim();
                    if raw.is_empty() {
                        return Err(malformed_in(feed_id, "entry content is empty"));
                    }
                    let parsed = parser
                        .parse(raw, WireFormat::Xml)
                        .map_err(|e| malformed_in(feed_id, e.to_string()))?;
                    resource = Some(parsed);
                } else {
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end(end.name())
                        .map_err(|e| malformed_in(feed_id, e.to_string()))?;
                }
            }
            Event::Empty(_) => {}
            Event::End(_) => break,
            Event::Eof => return Err(malformed_in(feed_id, "unexpected end of feed document")),
            _ => {}
        }
    }

    resource.ok_or_else(|| malformed_in(feed_id, "entry has no content"))
}

/// Element name with any namespace prefix stripped.
fn local_name(start: &BytesStart<'_>) -> Result<String, ClientError> {
    std::str::from_utf8(start.local_name().as_ref())
        .map(str::to_string)
        .map_err(|_| ClientError::malformed("element name is not valid utf-8"))
}

fn decode_json_feed(text: &str, parser: &dyn ResourceParser) -> ClientResult<Bundle> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ClientError::malformed(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ClientError::malformed("feed document is not an object"))?;

    let feed_id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::malformed("feed is missing its id"))?
        .to_string();
    let feed_ctx = Some(feed_id.clone());

    let total = match obj.get("totalResults") {
        None | Some(Value::Null) => None,
        Some(value) => Some(json_count(value).ok_or_else(|| {
            malformed_in(&feed_ctx, "totalResults is not a non-negative integer")
        })?),
    };

    let mut resources: Vec<TypedResource> = Vec::new();

    match obj.get("entry") {
        None | Some(Value::Null) => {}
        Some(Value::Array(entries)) => {
            for entry in entries {
                let content = entry
                    .get("content")
                    .ok_or_else(|| malformed_in(&feed_ctx, "entry has no content"))?;
                let payload = serde_json::to_string(content)
                    .map_err(|e| malformed_in(&feed_ctx, e.to_string()))?;
                let parsed = parser
                    .parse(&payload, WireFormat::Json)
                    .map_err(|e| malformed_in(&feed_ctx, e.to_string()))?;
                resources.push(parsed);
            }
        }
        Some(_) => return Err(malformed_in(&feed_ctx, "entry is not an array")),
    }

    Ok(Bundle {
        feed_id,
        total,
        resources,
    })
}

/// Reads a count that servers send either as a number or a numeric string.
fn json_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
