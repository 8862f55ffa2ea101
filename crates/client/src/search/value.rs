//! Search parameter values.
//!
//! A [`ParamValue`] is the typed value side of one search constraint. Each
//! variant knows how to render itself to the raw text that goes into a
//! query pair; rendering is pure and total, and never escapes — the query
//! assembler percent-encodes rendered values as a whole.

use std::fmt;

use chrono::NaiveDate;

/// Comparison prefixes for date values.
///
/// The prefix symbol is concatenated immediately before the ISO day with
/// no separator (e.g. `<=2012-01-22`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatePrefix {
    /// Equal (default). Renders as the bare day.
    #[default]
    Eq,
    /// Strictly after.
    Gt,
    /// On or after.
    Ge,
    /// Strictly before.
    Lt,
    /// On or before.
    Le,
}

impl DatePrefix {
    /// Returns the comparison symbol, empty for the default prefix.
    pub fn symbol(&self) -> &'static str {
        match self {
            DatePrefix::Eq => "",
            DatePrefix::Gt => ">",
            DatePrefix::Ge => ">=",
            DatePrefix::Lt => "<",
            DatePrefix::Le => "<=",
        }
    }
}

/// A typed search parameter value.
///
/// Values are constructed already valid, so rendering has no error case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A string match value.
    String(String),
    /// A token, optionally qualified by its code system.
    Token {
        /// The code system URI, if any.
        system: Option<String>,
        /// The code itself.
        code: String,
    },
    /// A reference to another resource, by id.
    Reference(String),
    /// A calendar day with a comparison prefix.
    Date {
        /// The comparison prefix.
        prefix: DatePrefix,
        /// The day being compared against.
        day: NaiveDate,
    },
}

impl ParamValue {
    /// Creates a string value.
    pub fn string(value: impl Into<String>) -> Self {
        ParamValue::String(value.into())
    }

    /// Creates a token value with a system qualifier.
    pub fn token(system: impl Into<String>, code: impl Into<String>) -> Self {
        ParamValue::Token {
            system: Some(system.into()),
            code: code.into(),
        }
    }

    /// Creates a bare token value without a system.
    pub fn code(code: impl Into<String>) -> Self {
        ParamValue::Token {
            system: None,
            code: code.into(),
        }
    }

    /// Creates a reference value by resource id.
    pub fn reference(id: impl Into<String>) -> Self {
        ParamValue::Reference(id.into())
    }

    /// Creates a date value.
    pub fn date(prefix: DatePrefix, day: NaiveDate) -> Self {
        ParamValue::Date { prefix, day }
    }

    /// Renders the value to its raw, unescaped query text.
    pub fn render(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Token { system, code } => match system {
                Some(system) => format!("{}|{}", system, code),
                None => code.clone(),
            },
            ParamValue::Reference(id) => id.clone(),
            ParamValue::Date { prefix, day } => {
                format!("{}{}", prefix.symbol(), day.format("%Y-%m-%d"))
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
