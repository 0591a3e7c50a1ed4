//! Rule library
//!
//! Each rule is a stateless predicate answering "does this value satisfy rule
//! X with these parameters?". Rules are a closed enum, so an unknown rule
//! name is a compile-time error rather than a runtime surprise.
//!
//! The storage-backed rules (`unique`, `exists`) issue exactly one count
//! query per invocation. Validating a batch of payloads therefore costs one
//! query per storage-backed rule per payload (N+1); they are best-effort,
//! time-of-check checks and do not replace persistence-layer constraints.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::store::{DocumentStore, Filter, StoreError};
use crate::utils::time::parse_datetime;

static STRING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?([\w.-]+)\.([a-z]{2,})(/\S*)?$").unwrap());
static ROLL_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[a-zA-Z]{2}[0-9]{3}$").unwrap());
static CNIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{13}$").unwrap());
static PROJECT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}-[0-9]{3}$").unwrap());

/// Evaluation context shared by all rules of one validation pass
pub struct RuleContext<'a> {
    /// The full request payload, for cross-field rules
    pub payload: &'a Map<String, Value>,
    /// Read-only store handle for the storage-backed rules
    pub store: &'a dyn DocumentStore,
}

/// A named, parameterized validation predicate
#[derive(Debug, Clone)]
pub enum Rule {
    /// Marker: skip the remaining rules for this field when the value is empty
    Optional,
    /// The value must be present and truthy
    Required,

    // Shape
    /// Letters and spaces only
    Str,
    /// Digits only
    Number,
    /// Minimum character length
    Min(usize),
    /// Maximum character length
    Max(usize),
    /// Exact character length
    Size(usize),
    /// Exactly this many digits
    Digits(usize),
    /// Digits only, at least this many
    MinDigits(usize),
    /// Digits only, at most this many
    MaxDigits(usize),
    /// Whitespace-tokenized word count within bounds (inclusive)
    Word { min: Option<usize>, max: Option<usize> },
    /// Arbitrary pattern match
    Pattern(Regex),

    // Format
    Email,
    /// At least 8 characters with upper, lower, digit and special
    Password,
    /// 10-digit phone number
    Phone,
    Url,
    /// Date, optionally required to be strictly in the future
    Date { future: bool },
    /// Roll number code, e.g. 21SW066
    RollNo,
    /// 13-digit national identity card number
    Cnic,
    /// Project code, e.g. SW-001
    ProjectCode,

    // Comparison
    /// Equality to another payload field's value
    Same(String),
    /// Exact match to a literal
    Matches(String),
    /// Membership in an enumerated set
    In(Vec<String>),
    /// Exclusion from a list of values; falsy entries are ignored
    Exclude(Vec<Value>),

    // Identity
    /// Well-formed document identifier
    Id,

    // Storage-backed
    /// No document in `collection` may already hold this value in `field`,
    /// except the one identified by `ignore` (edit-in-place)
    Unique {
        collection: &'static str,
        field: &'static str,
        ignore: Option<(&'static str, Value)>,
    },
    /// Some document in `collection` must hold this value in `field`
    Exists {
        collection: &'static str,
        field: &'static str,
    },

    // Files (value is a descriptor object `{name, extension, size}`)
    /// Extension whitelist
    Extension(Vec<String>),
    /// Maximum size in kilobytes, as reported by the upload layer
    FileSize(u64),
}

impl Rule {
    pub fn unique(collection: &'static str, field: &'static str) -> Self {
        Rule::Unique {
            collection,
            field,
            ignore: None,
        }
    }

    pub fn unique_ignoring(
        collection: &'static str,
        field: &'static str,
        ignore_field: &'static str,
        ignore_value: impl Into<Value>,
    ) -> Self {
        Rule::Unique {
            collection,
            field,
            ignore: Some((ignore_field, ignore_value.into())),
        }
    }

    pub fn exists(collection: &'static str, field: &'static str) -> Self {
        Rule::Exists { collection, field }
    }

    pub fn in_list(values: &[&str]) -> Self {
        Rule::In(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn extensions(values: &[&str]) -> Self {
        Rule::Extension(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn word(min: usize, max: usize) -> Self {
        Rule::Word {
            min: Some(min),
            max: Some(max),
        }
    }

    /// The rule's wire name, used for message template lookup
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Optional => "optional",
            Rule::Required => "required",
            Rule::Str => "string",
            Rule::Number => "number",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Size(_) => "size",
            Rule::Digits(_) => "digits",
            Rule::MinDigits(_) => "minDigit",
            Rule::MaxDigits(_) => "maxDigit",
            Rule::Word { .. } => "word",
            Rule::Pattern(_) => "regex",
            Rule::Email => "email",
            Rule::Password => "password",
            Rule::Phone => "phone",
            Rule::Url => "url",
            Rule::Date { .. } => "date",
            Rule::RollNo => "rollNo",
            Rule::Cnic => "cnic",
            Rule::ProjectCode => "pid",
            Rule::Same(_) => "same",
            Rule::Matches(_) => "match",
            Rule::In(_) => "in",
            Rule::Exclude(_) => "exclude",
            Rule::Id => "id",
            Rule::Unique { .. } => "unique",
            Rule::Exists { .. } => "exists",
            Rule::Extension(_) => "extension",
            Rule::FileSize(_) => "filesize",
        }
    }

    /// Evaluate the rule against a value.
    ///
    /// Returns `Ok(false)` for ordinary rule failures; `Err` only for
    /// infrastructure failures during storage-backed checks.
    pub async fn evaluate(&self, value: &Value, ctx: &RuleContext<'_>) -> Result<bool, StoreError> {
        let ok = match self {
            Rule::Optional => true,
            Rule::Required => !is_empty_value(value),

            Rule::Str => matches_text(value, &STRING_RE),
            Rule::Number => matches_text(value, &NUMBER_RE),
            Rule::Min(min) => text_len(value).is_some_and(|len| len >= *min),
            Rule::Max(max) => text_len(value).is_some_and(|len| len <= *max),
            Rule::Size(size) => text_len(value).is_some_and(|len| len == *size),
            Rule::Digits(digits) => {
                matches_text(value, &NUMBER_RE) && text_len(value) == Some(*digits)
            }
            Rule::MinDigits(min) => {
                matches_text(value, &NUMBER_RE) && text_len(value).is_some_and(|len| len >= *min)
            }
            Rule::MaxDigits(max) => {
                matches_text(value, &NUMBER_RE) && text_len(value).is_some_and(|len| len <= *max)
            }
            Rule::Word { min, max } => match text(value) {
                Some(text) => {
                    let words = text.split_whitespace().count();
                    min.is_none_or(|min| words >= min) && max.is_none_or(|max| words <= max)
                }
                None => false,
            },
            Rule::Pattern(re) => matches_text(value, re),

            Rule::Email => matches_text(value, &EMAIL_RE),
            Rule::Password => is_strong_password(value),
            Rule::Phone => matches_text(value, &PHONE_RE),
            Rule::Url => matches_text(value, &URL_RE),
            Rule::Date { future } => match text(value).and_then(|t| parse_datetime(&t)) {
                Some(date) => !future || date > chrono::Utc::now(),
                None => false,
            },
            Rule::RollNo => matches_text(value, &ROLL_NO_RE),
            Rule::Cnic => matches_text(value, &CNIC_RE),
            Rule::ProjectCode => matches_text(value, &PROJECT_CODE_RE),

            Rule::Same(field) => {
                let other = ctx.payload.get(field).unwrap_or(&Value::Null);
                loosely_equal(value, other)
            }
            Rule::Matches(literal) => text(value).is_some_and(|t| t == literal.as_str()),
            Rule::In(options) => {
                text(value).is_some_and(|t| options.iter().any(|o| o == t.as_ref()))
            }
            Rule::Exclude(others) => !others
                .iter()
                .filter(|other| !is_empty_value(other))
                .any(|other| loosely_equal(value, other)),

            Rule::Id => text(value).is_some_and(|t| uuid::Uuid::parse_str(&t).is_ok()),

            Rule::Unique {
                collection,
                field,
                ignore,
            } => {
                let mut filter = Filter::Eq(field.to_string(), value.clone());
                if let Some((ignore_field, ignore_value)) = ignore {
                    filter = filter.and(Filter::Ne(ignore_field.to_string(), ignore_value.clone()));
                }
                ctx.store.count(collection, &filter).await? == 0
            }
            Rule::Exists { collection, field } => {
                let filter = Filter::Eq(field.to_string(), value.clone());
                ctx.store.count(collection, &filter).await? > 0
            }

            Rule::Extension(allowed) => file_field(value, "extension")
                .is_some_and(|ext| allowed.iter().any(|a| a == ext.as_ref())),
            Rule::FileSize(max_kb) => match value.get("size") {
                Some(Value::Number(size)) => size.as_f64().is_some_and(|kb| kb <= *max_kb as f64),
                Some(Value::String(size)) => size
                    .parse::<f64>()
                    .is_ok_and(|kb| kb <= *max_kb as f64),
                _ => false,
            },
        };

        Ok(ok)
    }
}

/// Truthiness check mirrored from the original payload semantics:
/// absent, null, empty string, zero and false all count as empty
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        _ => false,
    }
}

/// Textual view of a scalar value; numbers coerce to their decimal form
fn text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn text_len(value: &Value) -> Option<usize> {
    text(value).map(|t| t.chars().count())
}

fn matches_text(value: &Value, re: &Regex) -> bool {
    text(value).is_some_and(|t| re.is_match(&t))
}

fn file_field<'a>(value: &'a Value, field: &str) -> Option<Cow<'a, str>> {
    value.get(field).and_then(text)
}

/// Equality with numeric/string coercion, so `"1"` compares equal to `1`
fn loosely_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (text(a), text(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn is_strong_password(value: &Value) -> bool {
    let Some(password) = text(value) else {
        return false;
    };
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    async fn check(rule: Rule, value: Value) -> bool {
        let store = MemoryStore::new();
        let payload = Map::new();
        let ctx = RuleContext {
            payload: &payload,
            store: &store,
        };
        rule.evaluate(&value, &ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_shape_rules() {
        assert!(check(Rule::Str, json!("Indoor Navigation")).await);
        assert!(!check(Rule::Str, json!("year 2026")).await);

        assert!(check(Rule::Number, json!("0123")).await);
        assert!(check(Rule::Number, json!(123)).await);
        assert!(!check(Rule::Number, json!("12a")).await);

        assert!(check(Rule::Min(3), json!("abc")).await);
        assert!(!check(Rule::Min(4), json!("abc")).await);
        assert!(check(Rule::Max(3), json!("abc")).await);
        assert!(!check(Rule::Max(2), json!("abc")).await);
        assert!(check(Rule::Size(7), json!("21SW066")).await);

        assert!(check(Rule::Digits(13), json!("4210112345671")).await);
        assert!(!check(Rule::Digits(13), json!("42101")).await);
        assert!(check(Rule::MinDigits(3), json!("1234")).await);
        assert!(!check(Rule::MaxDigits(3), json!("1234")).await);
    }

    #[tokio::test]
    async fn test_word_count_bounds_are_inclusive() {
        assert!(check(Rule::word(2, 3), json!("alpha beta")).await);
        assert!(check(Rule::word(2, 3), json!("alpha  beta\tgamma")).await);
        assert!(!check(Rule::word(2, 3), json!("alpha")).await);
        assert!(!check(Rule::word(2, 3), json!("a b c d")).await);
    }

    #[tokio::test]
    async fn test_format_rules() {
        assert!(check(Rule::Email, json!("lead@uni.edu.pk")).await);
        assert!(!check(Rule::Email, json!("lead@uni")).await);

        assert!(check(Rule::Phone, json!("3001234567")).await);
        assert!(!check(Rule::Phone, json!("300123")).await);

        assert!(check(Rule::Url, json!("https://meet.example.com/room/1")).await);
        assert!(check(Rule::Url, json!("example.com")).await);
        assert!(!check(Rule::Url, json!("not a url")).await);

        assert!(check(Rule::RollNo, json!("21SW066")).await);
        assert!(!check(Rule::RollNo, json!("2SW066")).await);

        assert!(check(Rule::Cnic, json!("4210112345671")).await);
        assert!(check(Rule::ProjectCode, json!("SW-001")).await);
        assert!(!check(Rule::ProjectCode, json!("SW001")).await);
    }

    #[tokio::test]
    async fn test_password_strength() {
        assert!(check(Rule::Password, json!("Passw0rd!")).await);
        assert!(!check(Rule::Password, json!("password1!")).await);
        assert!(!check(Rule::Password, json!("PASSWORD1!")).await);
        assert!(!check(Rule::Password, json!("Password!")).await);
        assert!(!check(Rule::Password, json!("Passw0rd")).await);
        assert!(!check(Rule::Password, json!("Pw0!")).await);
    }

    #[tokio::test]
    async fn test_date_rule() {
        assert!(check(Rule::Date { future: false }, json!("2026-01-15T10:00:00Z")).await);
        assert!(!check(Rule::Date { future: false }, json!("monday next week")).await);

        assert!(check(Rule::Date { future: true }, json!("2099-01-01T00:00:00Z")).await);
        assert!(!check(Rule::Date { future: true }, json!("2001-01-01T00:00:00Z")).await);
    }

    #[tokio::test]
    async fn test_comparison_rules() {
        let store = MemoryStore::new();
        let payload = json!({"password": "Secret1!"});
        let ctx = RuleContext {
            payload: payload.as_object().unwrap(),
            store: &store,
        };

        let same = Rule::Same("password".to_string());
        assert!(same.evaluate(&json!("Secret1!"), &ctx).await.unwrap());
        assert!(!same.evaluate(&json!("different"), &ctx).await.unwrap());

        assert!(check(Rule::Matches("completed".into()), json!("completed")).await);
        assert!(!check(Rule::Matches("completed".into()), json!("pending")).await);

        let role = Rule::in_list(&["supervisor", "student"]);
        assert!(check(role.clone(), json!("student")).await);
        assert!(!check(role, json!("admin")).await);
    }

    #[tokio::test]
    async fn test_exclude_ignores_falsy_entries() {
        let lead = json!("11111111-1111-1111-1111-111111111111");
        let rule = Rule::Exclude(vec![lead.clone(), Value::Null, json!("")]);

        assert!(!check(rule.clone(), lead).await);
        assert!(check(rule, json!("22222222-2222-2222-2222-222222222222")).await);
    }

    #[tokio::test]
    async fn test_identifier_rule() {
        assert!(check(Rule::Id, json!(uuid::Uuid::new_v4().to_string())).await);
        assert!(!check(Rule::Id, json!("not-an-id")).await);
    }

    #[tokio::test]
    async fn test_unique_rule_with_self_exclusion() {
        let store = MemoryStore::new();
        let stored = store
            .insert_one(
                "users",
                json!({"email": "lead@uni.edu.pk"}).as_object().unwrap().clone(),
            )
            .await
            .unwrap();
        let own_id = stored.get("id").unwrap().clone();

        let payload = Map::new();
        let ctx = RuleContext {
            payload: &payload,
            store: &store,
        };

        // Taken by an existing record: fails
        let taken = Rule::unique("users", "email");
        assert!(!taken.evaluate(&json!("lead@uni.edu.pk"), &ctx).await.unwrap());

        // Editing the same record: its own value is not a conflict
        let editing = Rule::Unique {
            collection: "users",
            field: "email",
            ignore: Some(("id", own_id)),
        };
        assert!(editing.evaluate(&json!("lead@uni.edu.pk"), &ctx).await.unwrap());

        // A fresh value always passes
        assert!(
            Rule::unique("users", "email")
                .evaluate(&json!("new@uni.edu.pk"), &ctx)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_exists_rule() {
        let store = MemoryStore::new();
        let stored = store
            .insert_one("users", Map::new())
            .await
            .unwrap();
        let id = stored.get("id").unwrap().clone();

        let payload = Map::new();
        let ctx = RuleContext {
            payload: &payload,
            store: &store,
        };

        let rule = Rule::exists("users", "id");
        assert!(rule.evaluate(&id, &ctx).await.unwrap());
        assert!(
            !rule
                .evaluate(&json!(uuid::Uuid::new_v4().to_string()), &ctx)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_file_rules() {
        let upload = json!({"name": "proposal.pdf", "extension": "pdf", "size": 2048});

        assert!(check(Rule::extensions(&["pdf", "docx"]), upload.clone()).await);
        assert!(!check(Rule::extensions(&["jpg"]), upload.clone()).await);

        assert!(check(Rule::FileSize(10240), upload.clone()).await);
        assert!(!check(Rule::FileSize(1024), upload).await);

        // Size reported as a numeric string by some upload layers
        let stringly = json!({"name": "a.png", "extension": "png", "size": "512.5"});
        assert!(check(Rule::FileSize(1024), stringly).await);
    }

    #[test]
    fn test_empty_value_truthiness() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!(1)));
        assert!(!is_empty_value(&json!({"name": "a.png"})));
    }
}
