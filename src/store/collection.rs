//! Typed access to a named collection
//!
//! [`Collection`] binds a collection name to a model type and converts
//! documents to and from that type right at the persistence boundary, so no
//! storage representation leaks past this module.

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::paginate::{PageRequest, PageResult, paginate};
use super::{Document, DocumentStore, FindOptions, Filter, StoreError};

/// A typed handle over a named collection
pub struct Collection<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, doc: Document) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Malformed {
            collection: self.name.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode(&self, record: &T) -> Result<Document, StoreError> {
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Malformed {
                collection: self.name.to_string(),
                reason: "record did not serialize to an object".to_string(),
            }),
            Err(e) => Err(StoreError::Malformed {
                collection: self.name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub async fn count(&self, store: &dyn DocumentStore, filter: &Filter) -> Result<u64, StoreError> {
        store.count(self.name, filter).await
    }

    pub async fn find(
        &self,
        store: &dyn DocumentStore,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<T>, StoreError> {
        store
            .find(self.name, filter, options)
            .await?
            .into_iter()
            .map(|doc| self.decode(doc))
            .collect()
    }

    pub async fn find_one(
        &self,
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Option<T>, StoreError> {
        store
            .find_one(self.name, filter)
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    pub async fn insert(&self, store: &dyn DocumentStore, record: &T) -> Result<T, StoreError> {
        let stored = store.insert_one(self.name, self.encode(record)?).await?;
        self.decode(stored)
    }

    pub async fn update_one(
        &self,
        store: &dyn DocumentStore,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<T>, StoreError> {
        store
            .update_one(self.name, filter, changes)
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    pub async fn delete_one(
        &self,
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Option<T>, StoreError> {
        store
            .delete_one(self.name, filter)
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    pub async fn paginate(
        &self,
        store: &dyn DocumentStore,
        filter: &Filter,
        request: PageRequest,
        default_size: u64,
    ) -> Result<PageResult<T>, StoreError> {
        paginate(store, self.name, filter, request, default_size)
            .await?
            .try_map(|doc| self.decode(doc))
    }
}
