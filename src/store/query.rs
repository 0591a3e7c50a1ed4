//! Filter construction from request inputs
//!
//! [`build_filter`] turns a free-text search term, a field list, or an
//! identifier value into a [`Filter`]. An empty value always yields
//! [`Filter::All`], which is what makes search parameters optional for
//! callers.

use serde_json::Value;
use uuid::Uuid;

use super::filter::Filter;

/// Document field holding the primary identifier
pub const ID_FIELD: &str = "id";

/// Target of a filter: one field, or several combined by an operator.
///
/// Being an enum, the "exactly one of field/fields" precondition cannot be
/// violated; the only remaining misuse is an empty field list, which fails
/// loudly as a [`QueryError`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

/// Boolean operator joining multi-field clauses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operator {
    #[default]
    Or,
    And,
}

/// Options controlling clause construction
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Coerce the value to the store's identifier type
    pub identifier: bool,
    /// Operator joining clauses when several fields are targeted
    pub operator: Operator,
    /// Case-insensitive substring match instead of exact equality
    pub substring: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            identifier: false,
            operator: Operator::Or,
            substring: true,
        }
    }
}

impl QueryOptions {
    /// Coerce values to document identifiers
    pub fn identifier() -> Self {
        Self {
            identifier: true,
            ..Self::default()
        }
    }

    /// Exact equality instead of substring matching
    pub fn exact() -> Self {
        Self {
            substring: false,
            ..Self::default()
        }
    }
}

/// Caller programming errors in filter construction.
///
/// These indicate a bug in the calling code, not bad user input, and are
/// never converted into validation failures.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("a non-empty field list must be provided")]
    NoFields,

    #[error("value '{0}' is not a valid document identifier")]
    InvalidIdentifier(String),
}

/// Build a filter targeting `field` with `value`.
///
/// An empty `value` matches everything. Identifier-typed comparison applies
/// when requested or when the field is the primary identifier field;
/// otherwise a case-insensitive substring match (the default) or exact
/// equality.
pub fn build_filter(field: Field, value: &str, options: &QueryOptions) -> Result<Filter, QueryError> {
    if value.is_empty() {
        return Ok(Filter::All);
    }

    let clause = |name: &str| -> Result<Filter, QueryError> {
        if options.identifier || name == ID_FIELD {
            let id = Uuid::parse_str(value)
                .map_err(|_| QueryError::InvalidIdentifier(value.to_string()))?;
            return Ok(Filter::IdEq(name.to_string(), id));
        }

        if options.substring {
            Ok(Filter::Contains(name.to_string(), value.to_string()))
        } else {
            Ok(Filter::Eq(name.to_string(), Value::String(value.to_string())))
        }
    };

    match field {
        Field::One(name) => clause(name),
        Field::Any([]) => Err(QueryError::NoFields),
        Field::Any(names) => {
            let clauses = names
                .iter()
                .map(|name| clause(name))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(match options.operator {
                Operator::Or => Filter::Or(clauses),
                Operator::And => Filter::And(clauses),
            })
        }
    }
}
