//! Query accumulation and URL rendering.
//!
//! A [`QuerySpec`] is the full accumulated state of one search: predicates
//! (AND-joined, insertion order preserved), include directives, sort
//! directives, an optional result-count limit, and an optional response
//! format override. Builder calls consume and return the spec, so each
//! search owns its spec as a plain value and concurrent searches never
//! share mutable state.
//!
//! Rendering is a pure function of the spec, emitting pairs in a fixed
//! order that downstream consumers depend on:
//!
//! 1. predicate pairs, in predicate addition order
//! 2. `_include=` pairs
//! 3. `_sort%3Aasc=` / `_sort%3Adesc=` pairs
//! 4. `_format=json` (only when the JSON override was requested)
//! 5. `_count=`

use lumen_fhir::WireFormat;

use crate::error::QueryError;
use crate::search::predicate::Predicate;

/// Sort direction for a sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// Returns the `_sort` suffix for this direction.
    fn suffix(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A sort directive: parameter name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// The parameter to sort by.
    pub parameter: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// The accumulated state of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    resource_type: String,
    predicates: Vec<Predicate>,
    includes: Vec<String>,
    sorts: Vec<SortDirective>,
    limit: Option<u32>,
    format: Option<WireFormat>,
}

impl QuerySpec {
    /// Creates an empty spec for a resource type.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            predicates: Vec::new(),
            includes: Vec::new(),
            sorts: Vec::new(),
            limit: None,
            format: None,
        }
    }

    /// Adds a predicate. All predicates are AND-joined.
    pub fn matching(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a further predicate. Alias of [`QuerySpec::matching`] for
    /// fluent chains (`.matching(a).and(b)`).
    pub fn and(self, predicate: Predicate) -> Self {
        self.matching(predicate)
    }

    /// Adds an include directive, a dotted path naming a reference field
    /// to expand in the response (e.g. `Patient.managingOrganization`).
    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.includes.push(path.into());
        self
    }

    /// Adds an ascending sort directive.
    pub fn sort_ascending(mut self, parameter: impl Into<String>) -> Self {
        self.sorts.push(SortDirective {
            parameter: parameter.into(),
            direction: SortDirection::Ascending,
        });
        self
    }

    /// Adds a descending sort directive.
    pub fn sort_descending(mut self, parameter: impl Into<String>) -> Self {
        self.sorts.push(SortDirective {
            parameter: parameter.into(),
            direction: SortDirection::Descending,
        });
        self
    }

    /// Requests the JSON rendition of the response instead of the default
    /// XML one.
    pub fn encoded_json(mut self) -> Self {
        self.format = Some(WireFormat::Json);
        self
    }

    /// Caps the number of returned results. The limit must be positive;
    /// zero is rejected here, before any network activity.
    pub fn limit_to(mut self, count: u32) -> Result<Self, QueryError> {
        if count == 0 {
            return Err(QueryError::InvalidCountLimit { count });
        }
        self.limit = Some(count);
        Ok(self)
    }

    /// Returns the resource type this spec searches.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the wire format the response is expected in.
    pub fn expected_format(&self) -> WireFormat {
        self.format.unwrap_or(WireFormat::Xml)
    }

    /// Renders the query string, without the leading `?`. Empty when the
    /// spec holds no constraints or options.
    pub fn render_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();

        for predicate in &self.predicates {
            for (name, value) in predicate.pairs() {
                pairs.push(format!("{}={}", name, encode(&value)));
            }
        }

        for path in &self.includes {
            pairs.push(format!("_include={}", encode(path)));
        }

        for sort in &self.sorts {
            pairs.push(format!(
                "_sort%3A{}={}",
                sort.direction.suffix(),
                encode(&sort.parameter)
            ));
        }

        if self.format == Some(WireFormat::Json) {
            pairs.push("_format=json".to_string());
        }

        if let Some(limit) = self.limit {
            pairs.push(format!("_count={}", limit));
        }

        pairs.join("&")
    }

    /// Renders the full search URL against a server base URL and the
    /// resource collection segment supplied by the registry.
    pub fn render_url(&self, base_url: &str, base_segment: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let query = self.render_query();
        if query.is_empty() {
            format!("{}/{}", base, base_segment)
        } else {
            format!("{}/{}?{}", base, base_segment, query)
        }
    }
}

/// Percent-encodes one value segment using query-component escaping.
///
/// Space encodes to `+`; `:`, `|`, `/` and friends to their `%XX` forms.
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
