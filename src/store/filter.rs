//! Composable filter predicates over documents
//!
//! A [`Filter`] is an opaque boolean expression over document fields. Filters
//! compose with [`Filter::and`]/[`Filter::or`] and are evaluated either by a
//! real document database (translated by the store implementation) or
//! directly against in-memory documents via [`Filter::matches`].

use serde_json::Value;
use uuid::Uuid;

use super::Document;

/// A composable boolean predicate over document fields
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document (the empty predicate)
    All,
    /// Matches no document
    Nothing,
    /// Field equals the given value exactly
    Eq(String, Value),
    /// Field differs from the given value
    Ne(String, Value),
    /// Field holds the given document identifier
    IdEq(String, Uuid),
    /// Field holds one of the given document identifiers
    IdIn(String, Vec<Uuid>),
    /// Field contains the given text, case-insensitively
    Contains(String, String),
    /// Every inner predicate matches
    And(Vec<Filter>),
    /// At least one inner predicate matches
    Or(Vec<Filter>),
}

impl Filter {
    /// Field equality
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Field inequality
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ne(field.into(), value.into())
    }

    /// Identifier equality
    pub fn id_eq(field: impl Into<String>, id: Uuid) -> Self {
        Filter::IdEq(field.into(), id)
    }

    /// Case-insensitive substring match
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains(field.into(), needle.into())
    }

    /// Conjunction. Role scoping composes through here, so a scope can only
    /// ever narrow the base filter.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::Nothing, _) | (_, Filter::Nothing) => Filter::Nothing,
            (Filter::And(mut a), Filter::And(b)) => {
                a.extend(b);
                Filter::And(a)
            }
            (Filter::And(mut a), f) => {
                a.push(f);
                Filter::And(a)
            }
            (f, Filter::And(mut b)) => {
                b.insert(0, f);
                Filter::And(b)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Disjunction
    pub fn or(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::Nothing, f) | (f, Filter::Nothing) => f,
            (Filter::All, _) | (_, Filter::All) => Filter::All,
            (Filter::Or(mut a), Filter::Or(b)) => {
                a.extend(b);
                Filter::Or(a)
            }
            (Filter::Or(mut a), f) => {
                a.push(f);
                Filter::Or(a)
            }
            (f, Filter::Or(mut b)) => {
                b.insert(0, f);
                Filter::Or(b)
            }
            (a, b) => Filter::Or(vec![a, b]),
        }
    }

    /// Evaluate the predicate against a document
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Nothing => false,
            Filter::Eq(field, value) => field_value(doc, field) == value,
            Filter::Ne(field, value) => field_value(doc, field) != value,
            Filter::IdEq(field, id) => field_id(doc, field) == Some(*id),
            Filter::IdIn(field, ids) => {
                field_id(doc, field).is_some_and(|found| ids.contains(&found))
            }
            Filter::Contains(field, needle) => match field_text(doc, field) {
                Some(text) => text.to_lowercase().contains(&needle.to_lowercase()),
                None => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Missing fields compare as null, mirroring document-store semantics
fn field_value<'a>(doc: &'a Document, field: &str) -> &'a Value {
    doc.get(field).unwrap_or(&Value::Null)
}

fn field_id(doc: &Document, field: &str) -> Option<Uuid> {
    doc.get(field)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn field_text(doc: &Document, field: &str) -> Option<String> {
    match doc.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_all_and_nothing() {
        let d = doc(json!({"title": "Indoor navigation"}));
        assert!(Filter::All.matches(&d));
        assert!(!Filter::Nothing.matches(&d));
    }

    #[test]
    fn test_eq_treats_missing_as_null() {
        let d = doc(json!({"title": "Indoor navigation"}));
        assert!(Filter::eq("memberTwo", Value::Null).matches(&d));
        assert!(!Filter::ne("memberTwo", Value::Null).matches(&d));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let d = doc(json!({"title": "Indoor Navigation"}));
        assert!(Filter::contains("title", "navigation").matches(&d));
        assert!(Filter::contains("title", "DOOR").matches(&d));
        assert!(!Filter::contains("title", "outdoor").matches(&d));
    }

    #[test]
    fn test_id_eq() {
        let id = Uuid::new_v4();
        let d = doc(json!({"lead": id.to_string()}));
        assert!(Filter::id_eq("lead", id).matches(&d));
        assert!(!Filter::id_eq("lead", Uuid::new_v4()).matches(&d));
    }

    #[test]
    fn test_and_identity_and_absorption() {
        let f = Filter::eq("status", "accepted");
        assert_eq!(Filter::All.and(f.clone()), f);
        assert_eq!(f.clone().and(Filter::All), f);
        assert_eq!(f.clone().and(Filter::Nothing), Filter::Nothing);
        assert_eq!(Filter::Nothing.and(f), Filter::Nothing);
    }

    #[test]
    fn test_or_identity_and_absorption() {
        let f = Filter::eq("status", "accepted");
        assert_eq!(Filter::Nothing.or(f.clone()), f);
        assert_eq!(f.clone().or(Filter::All), Filter::All);
    }

    #[test]
    fn test_composed_predicates() {
        let id = Uuid::new_v4();
        let d = doc(json!({"lead": id.to_string(), "status": "accepted"}));

        let scoped = Filter::id_eq("lead", id).and(Filter::eq("status", "accepted"));
        assert!(scoped.matches(&d));

        let other = Filter::id_eq("lead", Uuid::new_v4()).and(Filter::eq("status", "accepted"));
        assert!(!other.matches(&d));
    }
}
