//! Pagination over filtered collections
//!
//! Computes total counts and page metadata for a filter, then retrieves the
//! requested page slice via skip/limit/sort. One count query and one find
//! query per invocation.

use serde::Serialize;

use super::{Document, DocumentStore, FindOptions, Filter, Sort, StoreError};

/// A page request from the caller. Page and size are normalized to >= 1;
/// a missing size falls back to the configured default.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn sorted(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// A page of items plus metadata describing its position in the result set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub current_count: u64,
}

impl<T> PageResult<T> {
    /// Convert the page items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
            current_count: self.current_count,
        }
    }

    /// Fallible conversion of the page items
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PageResult<U>, E> {
        Ok(PageResult {
            items: self
                .items
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
            current_count: self.current_count,
        })
    }
}

/// Retrieve one page of documents matching `filter`.
///
/// `total_pages = ceil(total_count / page_size)`; a zero page size can never
/// reach the division because both the request size and the configured
/// default are clamped to >= 1.
pub async fn paginate(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Filter,
    request: PageRequest,
    default_size: u64,
) -> Result<PageResult<Document>, StoreError> {
    let page = request.page.unwrap_or(1).max(1);
    let size = request.size.unwrap_or(default_size).max(1);

    let options = FindOptions {
        skip: Some((page - 1) * size),
        limit: Some(size),
        sort: request.sort,
    };

    // One count query and one find query, issued concurrently
    let (total_count, items) = futures::try_join!(
        store.count(collection, filter),
        store.find(collection, filter, &options)
    )?;

    let total_pages = total_count.div_ceil(size);
    let current_count = items.len() as u64;

    Ok(PageResult {
        items,
        current_page: page,
        total_pages,
        page_size: size,
        total_count,
        current_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    async fn seeded(n: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..n {
            store
                .insert_one("items", json!({"n": i}).as_object().unwrap().clone())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_page_metadata_invariants() {
        let store = seeded(25).await;

        for (page, size, expected_pages, expected_count) in
            [(1, 10, 3, 10), (3, 10, 3, 5), (1, 25, 1, 25), (2, 7, 4, 7)]
        {
            let result = paginate(
                &store,
                "items",
                &Filter::All,
                PageRequest::new(Some(page), Some(size)),
                10,
            )
            .await
            .unwrap();

            assert_eq!(result.total_count, 25);
            assert_eq!(result.total_pages, expected_pages);
            assert_eq!(result.current_count, expected_count);
            assert!(result.current_count <= size);
            assert_eq!(result.total_pages, 25u64.div_ceil(size));
        }
    }

    #[tokio::test]
    async fn test_size_falls_back_to_default() {
        let store = seeded(12).await;
        let result = paginate(
            &store,
            "items",
            &Filter::All,
            PageRequest::new(Some(1), None),
            10,
        )
        .await
        .unwrap();

        assert_eq!(result.page_size, 10);
        assert_eq!(result.current_count, 10);
        assert_eq!(result.total_pages, 2);
    }

    #[tokio::test]
    async fn test_page_and_size_normalized_to_one() {
        let store = seeded(3).await;
        let result = paginate(
            &store,
            "items",
            &Filter::All,
            PageRequest::new(Some(0), Some(0)),
            10,
        )
        .await
        .unwrap();

        assert_eq!(result.current_page, 1);
        assert_eq!(result.page_size, 1);
    }

    #[tokio::test]
    async fn test_match_nothing_yields_well_formed_empty_page() {
        let store = seeded(5).await;
        let result = paginate(
            &store,
            "items",
            &Filter::Nothing,
            PageRequest::new(Some(1), Some(10)),
            10,
        )
        .await
        .unwrap();

        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.items.is_empty());
        assert_eq!(result.current_count, 0);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_not_error() {
        let store = seeded(5).await;
        let result = paginate(
            &store,
            "items",
            &Filter::All,
            PageRequest::new(Some(9), Some(10)),
            10,
        )
        .await
        .unwrap();

        assert_eq!(result.total_count, 5);
        assert!(result.items.is_empty());
        assert_eq!(result.current_count, 0);
    }
}
