//! Typed search parameter handles.
//!
//! Handles give fluent, type-checked predicate construction: a
//! [`StringParam`] only builds string predicates, a [`DateParam`] only
//! date predicates, and so on. Handles are cheap values naming one search
//! parameter of a resource type; construct them once and reuse them.
//!
//! ```
//! use lumen_client::search::{ReferenceParam, StringParam};
//!
//! let name = StringParam::new("name");
//! let provider = ReferenceParam::new("provider");
//!
//! let by_name = name.matches("james");
//! let by_org = provider.has_chained(StringParam::new("name").matches("ORG0"));
//! ```

use chrono::NaiveDate;

use crate::search::predicate::{Modifier, Predicate};
use crate::search::value::{DatePrefix, ParamValue};

/// Handle for a string search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringParam {
    name: String,
}

impl StringParam {
    /// Creates a handle for the named parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Builds a default (whole-word) string match predicate.
    pub fn matches(&self, value: impl Into<String>) -> Predicate {
        Predicate::leaf(&self.name, ParamValue::string(value))
    }

    /// Builds an exact string match predicate (`:exact` modifier).
    pub fn matches_exactly(&self, value: impl Into<String>) -> Predicate {
        self.matches(value).with_modifier(Modifier::Exact)
    }
}

/// Handle for a token search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParam {
    name: String,
}

impl TokenParam {
    /// Creates a handle for the named parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Builds a predicate matching a bare code, any system.
    pub fn code(&self, code: impl Into<String>) -> Predicate {
        Predicate::leaf(&self.name, ParamValue::code(code))
    }

    /// Builds a predicate matching a `system|code` pair. The system is
    /// emitted exactly as supplied.
    pub fn system_and_code(
        &self,
        system: impl Into<String>,
        code: impl Into<String>,
    ) -> Predicate {
        Predicate::leaf(&self.name, ParamValue::token(system, code))
    }
}

/// Handle for a reference search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceParam {
    name: String,
}

impl ReferenceParam {
    /// Creates a handle for the named parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Builds a predicate matching the referenced resource by id.
    pub fn has_id(&self, id: impl Into<String>) -> Predicate {
        Predicate::leaf(&self.name, ParamValue::reference(id))
    }

    /// Builds a chained predicate constraining a search parameter of the
    /// referenced resource type.
    pub fn has_chained(&self, inner: Predicate) -> Predicate {
        Predicate::chained(&self.name, inner)
    }
}

/// Handle for a date search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParam {
    name: String,
}

/// A date comparison awaiting its day, produced by [`DateParam`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateClause {
    name: String,
    prefix: DatePrefix,
}

impl DateParam {
    /// Creates a handle for the named parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn clause(&self, prefix: DatePrefix) -> DateClause {
        DateClause {
            name: self.name.clone(),
            prefix,
        }
    }

    /// Matches dates equal to the day.
    pub fn on(&self) -> DateClause {
        self.clause(DatePrefix::Eq)
    }

    /// Matches dates strictly before the day (`<`).
    pub fn before(&self) -> DateClause {
        self.clause(DatePrefix::Lt)
    }

    /// Matches dates on or before the day (`<=`).
    pub fn before_or_equals(&self) -> DateClause {
        self.clause(DatePrefix::Le)
    }

    /// Matches dates strictly after the day (`>`).
    pub fn after(&self) -> DateClause {
        self.clause(DatePrefix::Gt)
    }

    /// Matches dates on or after the day (`>=`).
    pub fn on_or_after(&self) -> DateClause {
        self.clause(DatePrefix::Ge)
    }
}

impl DateClause {
    /// Completes the clause with a calendar day.
    pub fn day(self, day: NaiveDate) -> Predicate {
        Predicate::leaf(self.name, ParamValue::date(self.prefix, day))
    }
}
