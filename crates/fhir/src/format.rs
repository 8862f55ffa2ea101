//! Wire formats and media type handling.
//!
//! FHIR exchanges resources as XML (the default) or JSON. This module
//! parses and renders the media types used for content negotiation,
//! including the optional `; charset=` parameter servers attach to
//! response content types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The wire formats a FHIR endpoint can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// XML format (application/fhir+xml). The protocol default.
    Xml,
    /// JSON format (application/fhir+json).
    Json,
}

impl WireFormat {
    /// Returns the MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            WireFormat::Xml => "application/fhir+xml",
            WireFormat::Json => "application/fhir+json",
        }
    }

    /// Returns the `_format` query parameter value for this format.
    pub fn format_param(&self) -> &'static str {
        match self {
            WireFormat::Xml => "xml",
            WireFormat::Json => "json",
        }
    }

    /// Parses a bare media type string into a format.
    ///
    /// Accepts both the FHIR-specific media types and the generic
    /// `application/xml` / `application/json` forms some servers emit.
    pub fn parse(media_type: &str) -> Option<Self> {
        let mt = media_type.trim().to_lowercase();

        if mt == "application/fhir+json" || mt == "application/json" || mt == "application/json+fhir"
        {
            Some(WireFormat::Json)
        } else if mt == "application/fhir+xml"
            || mt == "application/xml"
            || mt == "application/xml+fhir"
            || mt == "application/atom+xml"
        {
            Some(WireFormat::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// A parsed response content type: a wire format plus an optional charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// The wire format.
    pub format: WireFormat,
    /// The declared charset, lowercased, if any (e.g. "utf-8").
    pub charset: Option<String>,
}

impl ContentType {
    /// Creates a content type with no charset parameter.
    pub fn new(format: WireFormat) -> Self {
        Self {
            format,
            charset: None,
        }
    }

    /// Parses a Content-Type header value.
    ///
    /// Example: `application/fhir+xml; charset=UTF-8`
    pub fn parse(content_type: &str) -> Option<Self> {
        let mut parts = content_type.split(';').map(str::trim);

        let format = WireFormat::parse(parts.next()?)?;

        let charset = parts.find_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"').to_lowercase())
            } else {
                None
            }
        });

        Some(Self { format, charset })
    }

    /// Returns true if the declared charset can be decoded.
    ///
    /// UTF-8 is assumed when no charset is declared; US-ASCII is a strict
    /// subset of UTF-8 and accepted as well.
    pub fn charset_supported(&self) -> bool {
        match self.charset.as_deref() {
            None => true,
            Some("utf-8" | "utf8" | "us-ascii" | "ascii") => true,
            Some(_) => false,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.charset {
            Some(cs) => write!(f, "{}; charset={}", self.format.mime_type(), cs),
            None => f.write_str(self.format.mime_type()),
        }
    }
}
