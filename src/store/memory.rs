//! In-memory document store
//!
//! Backs tests and development runs. Production deployments implement
//! [`DocumentStore`] over a real document database; nothing outside this file
//! may assume documents live in process memory.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::query::ID_FIELD;
use super::{Document, DocumentStore, FindOptions, Filter, SortOrder, StoreError};

/// A document store holding collections in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut matched: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &options.sort {
            matched.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(&sort.field).unwrap_or(&Value::Null),
                    b.get(&sort.field).unwrap_or(&Value::Null),
                );
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let matched = matched.into_iter().skip(skip);
        let matched = match options.limit {
            Some(limit) => matched.take(limit as usize).collect(),
            None => matched.collect(),
        };

        Ok(matched)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let found = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned());
        Ok(found)
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        if !doc.get(ID_FIELD).is_some_and(Value::is_string) {
            doc.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };

        let Some(doc) = docs.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(None);
        };

        for (field, value) in changes {
            doc.insert(field, value);
        }
        Ok(Some(doc.clone()))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };

        let Some(position) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(None);
        };
        Ok(Some(docs.remove(position)))
    }
}

/// Total order over JSON values for sorting: nulls first, then numbers,
/// then strings, everything else by serialized form
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Sort;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_insert_assigns_identifier() {
        let store = MemoryStore::new();
        let stored = store
            .insert_one("users", doc(json!({"name": "Aisha"})))
            .await
            .unwrap();

        let id = stored.get("id").and_then(Value::as_str).unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_count_and_find_with_filter() {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc(json!({"name": "Aisha", "role": "student"})))
            .await
            .unwrap();
        store
            .insert_one("users", doc(json!({"name": "Bilal", "role": "supervisor"})))
            .await
            .unwrap();

        let students = Filter::eq("role", "student");
        assert_eq!(store.count("users", &students).await.unwrap(), 1);
        assert_eq!(store.count("users", &Filter::All).await.unwrap(), 2);
        assert_eq!(store.count("users", &Filter::Nothing).await.unwrap(), 0);

        let found = store.find_one("users", &students).await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("Aisha")));
    }

    #[tokio::test]
    async fn test_find_sort_skip_limit() {
        let store = MemoryStore::new();
        for n in [3, 1, 2] {
            store
                .insert_one("items", doc(json!({"n": n})))
                .await
                .unwrap();
        }

        let options = FindOptions {
            skip: Some(1),
            limit: Some(1),
            sort: Some(Sort::asc("n")),
        };
        let page = store.find("items", &Filter::All, &options).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].get("n"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_update_merges_and_nulls() {
        let store = MemoryStore::new();
        let stored = store
            .insert_one("projects", doc(json!({"title": "Old", "memberOne": "x"})))
            .await
            .unwrap();
        let id = stored.get("id").unwrap().clone();

        let updated = store
            .update_one(
                "projects",
                &Filter::Eq("id".into(), id),
                doc(json!({"title": "New", "memberOne": null})),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.get("title"), Some(&json!("New")));
        assert_eq!(updated.get("memberOne"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_delete_returns_document() {
        let store = MemoryStore::new();
        store
            .insert_one("items", doc(json!({"n": 1})))
            .await
            .unwrap();

        let deleted = store.delete_one("items", &Filter::All).await.unwrap();
        assert!(deleted.is_some());
        assert_eq!(store.count("items", &Filter::All).await.unwrap(), 0);
        assert!(store.delete_one("items", &Filter::All).await.unwrap().is_none());
    }
}
