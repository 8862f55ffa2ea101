//! FHIR search parameter kinds.
//!
//! Defines the search parameter types a resource definition can declare.
//! See: https://build.fhir.org/search.html#ptypes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// FHIR search parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchParamType {
    /// A simple string, like a name or description.
    String,
    /// A code from a code system, optionally qualified by its system.
    Token,
    /// A reference to another resource.
    Reference,
    /// A search for a date, dateTime, or period.
    Date,
    /// A search for a number.
    Number,
    /// A quantity, with a number and units.
    Quantity,
    /// A search against a URI.
    Uri,
}

impl fmt::Display for SearchParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchParamType::String => write!(f, "string"),
            SearchParamType::Token => write!(f, "token"),
            SearchParamType::Reference => write!(f, "reference"),
            SearchParamType::Date => write!(f, "date"),
            SearchParamType::Number => write!(f, "number"),
            SearchParamType::Quantity => write!(f, "quantity"),
            SearchParamType::Uri => write!(f, "uri"),
        }
    }
}

impl FromStr for SearchParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(SearchParamType::String),
            "token" => Ok(SearchParamType::Token),
            "reference" => Ok(SearchParamType::Reference),
            "date" => Ok(SearchParamType::Date),
            "number" => Ok(SearchParamType::Number),
            "quantity" => Ok(SearchParamType::Quantity),
            "uri" => Ok(SearchParamType::Uri),
            _ => Err(format!("unknown search parameter type: {}", s)),
        }
    }
}

/// A search parameter declared by a resource definition.
///
/// Parameter names are unique within one resource definition and immutable
/// once defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParamDef {
    /// The parameter name as it appears in query strings (e.g. "name").
    pub name: String,

    /// The parameter type.
    pub param_type: SearchParamType,
}

impl SearchParamDef {
    /// Creates a new parameter definition.
    pub fn new(name: impl Into<String>, param_type: SearchParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}
