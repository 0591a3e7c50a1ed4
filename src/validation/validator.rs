//! Schema validation orchestration
//!
//! Applies an ordered field -> rule-set schema to a request payload.
//! Evaluation order is deterministic: fields in declaration order, rules in
//! declaration order within a field. The first failing rule records the
//! field's single error message and short-circuits the rest of that field's
//! rules; `required` is the only rule that fires on an empty value.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::store::{DocumentStore, StoreError};

use super::messages;
use super::rules::{Rule, RuleContext, is_empty_value};

/// An ordered field -> rule-set mapping for one endpoint's payload
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Vec<Rule>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field with its ordered rules
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name.into(), rules.into_iter().collect()));
        self
    }
}

/// The outcome of validating one payload: at most one message per field
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub errors: BTreeMap<String, String>,
    pub failed: bool,
}

impl Validation {
    /// The error map when validation failed, `None` otherwise
    pub fn into_errors(self) -> Option<BTreeMap<String, String>> {
        if self.failed { Some(self.errors) } else { None }
    }
}

/// Validate `payload` against `schema`.
///
/// Rule failures are returned as data; `Err` is reserved for infrastructure
/// failures raised by the storage-backed rules.
pub async fn validate(
    store: &dyn DocumentStore,
    payload: &Value,
    schema: &Schema,
) -> Result<Validation, StoreError> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);
    let ctx = RuleContext {
        payload: fields,
        store,
    };

    let mut errors = BTreeMap::new();

    for (field, rules) in &schema.fields {
        let value = fields.get(field).unwrap_or(&Value::Null);

        for rule in rules {
            match rule {
                // An empty optional field is always valid; skip its rules
                Rule::Optional if is_empty_value(value) => break,
                Rule::Optional => continue,

                Rule::Required => {
                    if is_empty_value(value) {
                        errors.insert(field.clone(), messages::render(rule, field, value));
                        break;
                    }
                }

                // Non-required rules never run against empty values
                _ if is_empty_value(value) => continue,

                _ => {
                    if !rule.evaluate(value, &ctx).await? {
                        errors.insert(field.clone(), messages::render(rule, field, value));
                        break;
                    }
                }
            }
        }
    }

    Ok(Validation {
        failed: !errors.is_empty(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    async fn run(payload: Value, schema: Schema) -> Validation {
        let store = MemoryStore::new();
        validate(&store, &payload, &schema).await.unwrap()
    }

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = Schema::new()
            .field("email", [Rule::Required, Rule::Email])
            .field("password", [Rule::Required]);
        assert_eq!(schema.fields[0].0, "email");
        assert_eq!(schema.fields[1].0, "password");
    }

    #[tokio::test]
    async fn test_required_is_checked_first() {
        // Empty value with required: only the required message, no format rule runs
        let schema = Schema::new().field(
            "email",
            [Rule::Required, Rule::Email, Rule::unique("users", "email")],
        );
        let result = run(json!({}), schema).await;

        assert!(result.failed);
        assert_eq!(result.errors["email"], "The email is required");
    }

    #[tokio::test]
    async fn test_optional_and_absent_is_valid() {
        let schema = Schema::new()
            .field("phone", [Rule::Optional, Rule::Phone])
            .field("image", [Rule::Str, Rule::Min(3)]);
        let result = run(json!({}), schema).await;

        assert!(!result.failed);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_email_and_password_scenario() {
        // Present-but-invalid email fails its format rule, not required;
        // empty password fails required
        let schema = Schema::new()
            .field("email", [Rule::Required, Rule::Email])
            .field("password", [Rule::Required]);
        let result = run(json!({"email": "not-an-email", "password": ""}), schema).await;

        assert!(result.failed);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors["email"], "The provided email address is invalid");
        assert_eq!(result.errors["password"], "The password is required");
    }

    #[tokio::test]
    async fn test_first_failing_rule_wins_per_field() {
        let schema = Schema::new().field("name", [Rule::Min(10), Rule::Max(2)]);
        let result = run(json!({"name": "abc"}), schema).await;

        // Both rules fail; only the first is recorded
        assert_eq!(result.errors["name"], "The name must be at least 10 characters");
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_rules_in_declared_order_not_severity_order() {
        let schema = Schema::new().field("name", [Rule::Max(2), Rule::Min(10)]);
        let result = run(json!({"name": "abc"}), schema).await;

        assert_eq!(result.errors["name"], "The name must not exceed 2 characters");
    }

    #[tokio::test]
    async fn test_empty_value_skips_format_rules_without_required() {
        // Non-required rules never fire on an empty value
        let schema = Schema::new().field("reference", [Rule::Url]);
        let result = run(json!({"reference": ""}), schema).await;

        assert!(!result.failed);
    }

    #[tokio::test]
    async fn test_storage_backed_rule_through_validator() {
        let store = MemoryStore::new();
        store
            .insert_one(
                "users",
                json!({"email": "taken@uni.edu.pk"}).as_object().unwrap().clone(),
            )
            .await
            .unwrap();

        let schema = Schema::new().field(
            "email",
            [Rule::Required, Rule::Email, Rule::unique("users", "email")],
        );

        let result = validate(&store, &json!({"email": "taken@uni.edu.pk"}), &schema)
            .await
            .unwrap();
        assert_eq!(
            result.errors["email"],
            "The email 'taken@uni.edu.pk' is already taken"
        );

        let result = validate(&store, &json!({"email": "fresh@uni.edu.pk"}), &schema)
            .await
            .unwrap();
        assert!(!result.failed);
    }

    #[tokio::test]
    async fn test_passing_payload_has_no_errors() {
        let schema = Schema::new()
            .field("name", [Rule::Required, Rule::Str, Rule::Min(3), Rule::Max(50)])
            .field("rollNo", [Rule::Optional, Rule::Size(7), Rule::RollNo]);
        let result = run(json!({"name": "Aisha Khan", "rollNo": "21SW066"}), schema).await;

        assert!(!result.failed);
        assert!(result.into_errors().is_none());
    }
}
