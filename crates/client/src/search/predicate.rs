//! Search predicates.
//!
//! A [`Predicate`] binds a parameter name to one or more values, or chains
//! through a reference parameter into a predicate on the referenced
//! resource type. Each predicate renders to one query pair per value;
//! chained predicates render with dot-joined names (`provider.name=ORG0`).

use crate::search::value::ParamValue;

/// A modifier altering match semantics of a predicate.
///
/// Attached as a `:`-suffix on the parameter name; the colon is emitted
/// percent-encoded in the final URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Exact match (string and token parameters).
    Exact,
}

impl Modifier {
    /// Returns the suffix text, without the leading colon.
    pub fn suffix(&self) -> &'static str {
        match self {
            Modifier::Exact => "exact",
        }
    }
}

/// One search constraint.
///
/// A predicate is either a leaf (values on a named parameter) or a chain
/// (a nested predicate on the resource referenced by a named reference
/// parameter) — never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    name: String,
    modifier: Option<Modifier>,
    body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Leaf(Vec<ParamValue>),
    Chained(Box<Predicate>),
}

impl Predicate {
    /// Creates a leaf predicate with a single value.
    pub fn leaf(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            modifier: None,
            body: Body::Leaf(vec![value]),
        }
    }

    /// Creates a chained predicate through a reference parameter.
    ///
    /// Chained predicates carry no independent modifier; the innermost
    /// leaf's modifier, if any, is the one emitted.
    pub fn chained(name: impl Into<String>, inner: Predicate) -> Self {
        Self {
            name: name.into(),
            modifier: None,
            body: Body::Chained(Box::new(inner)),
        }
    }

    /// Attaches a modifier to a leaf predicate.
    ///
    /// Chained predicates carry no modifier of their own and are returned
    /// unchanged; attach the modifier to the innermost leaf instead.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if matches!(self.body, Body::Leaf(_)) {
            self.modifier = Some(modifier);
        }
        self
    }

    /// Adds another value to a leaf predicate. Each value is emitted as
    /// its own query pair under the same name (repeated-key semantics).
    pub fn and_value(mut self, value: ParamValue) -> Self {
        if let Body::Leaf(values) = &mut self.body {
            values.push(value);
        }
        self
    }

    /// Returns the parameter name, without chain joins or modifier suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the emitted pair name: chain segments dot-joined down to
    /// the innermost leaf, whose modifier suffix (if any) is appended with
    /// a percent-encoded colon.
    pub fn pair_name(&self) -> String {
        match &self.body {
            Body::Leaf(_) => match self.modifier {
                Some(modifier) => format!("{}%3A{}", self.name, modifier.suffix()),
                None => self.name.clone(),
            },
            Body::Chained(inner) => format!("{}.{}", self.name, inner.pair_name()),
        }
    }

    /// Renders the predicate to (name, raw value) pairs, one per leaf
    /// value and in value addition order. Values are unescaped; the query
    /// assembler percent-encodes them.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let name = self.pair_name();
        self.leaf_values()
            .iter()
            .map(|value| (name.clone(), value.render()))
            .collect()
    }

    /// Resolves the values of the innermost leaf.
    fn leaf_values(&self) -> &[ParamValue] {
        match &self.body {
            Body::Leaf(values) => values,
            Body::Chained(inner) => inner.leaf_values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::search::value::DatePrefix;

    #[test]
    fn test_leaf_pair() {
        let predicate = Predicate::leaf("name", ParamValue::string("james"));
        assert_eq!(
            predicate.pairs(),
            vec![("name".to_string(), "james".to_string())]
        );
    }

    #[test]
    fn test_exact_modifier_name() {
        let predicate =
            Predicate::leaf("name", ParamValue::string("james")).with_modifier(Modifier::Exact);
        assert_eq!(predicate.pair_name(), "name%3Aexact");
    }

    #[test]
    fn test_repeated_values_emit_one_pair_each() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let predicate = Predicate::leaf(
            "birthdate",
            ParamValue::date(DatePrefix::Le, day(2012, 1, 22)),
        )
        .and_value(ParamValue::date(DatePrefix::Gt, day(2011, 1, 1)));

        assert_eq!(
            predicate.pairs(),
            vec![
                ("birthdate".to_string(), "<=2012-01-22".to_string()),
                ("birthdate".to_string(), ">2011-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_chained_name_join() {
        let inner = Predicate::leaf("name", ParamValue::string("ORG0"));
        let predicate = Predicate::chained("provider", inner);

        assert_eq!(
            predicate.pairs(),
            vec![("provider.name".to_string(), "ORG0".to_string())]
        );
    }

    #[test]
    fn test_modifier_on_chain_attaches_to_leaf_only() {
        let inner =
            Predicate::leaf("name", ParamValue::string("ORG0")).with_modifier(Modifier::Exact);
        let chained = Predicate::chained("provider", inner).with_modifier(Modifier::Exact);

        // The outer call is a no-op; only the leaf's modifier is emitted.
        assert_eq!(chained.pair_name(), "provider.name%3Aexact");
        assert_eq!(chained, chained.clone().with_modifier(Modifier::Exact));
    }

    #[test]
    fn test_chain_nests_arbitrarily_deep() {
        let leaf = Predicate::leaf("name", ParamValue::string("ACME"));
        let mid = Predicate::chained("organization", leaf);
        let outer = Predicate::chained("provider", mid);

        assert_eq!(outer.pair_name(), "provider.organization.name");
        assert_eq!(outer.pairs()[0].1, "ACME");
    }
}
