//! Search request construction.
//!
//! The search module turns chains of typed predicates into one
//! well-formed, percent-encoded query URL:
//!
//! - [`value`] - Typed parameter values and their rendering
//! - [`predicate`] - Predicates (leaf and chained) and pair rendering
//! - [`param`] - Typed parameter handles for fluent construction
//! - [`builder`] - The [`QuerySpec`] accumulator and URL assembly

pub mod builder;
pub mod param;
pub mod predicate;
pub mod value;

pub use builder::{QuerySpec, SortDirection, SortDirective};
pub use param::{DateClause, DateParam, ReferenceParam, StringParam, TokenParam};
pub use predicate::{Modifier, Predicate};
pub use value::{DatePrefix, ParamValue};
