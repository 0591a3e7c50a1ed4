//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::config::Config;
use crate::store::DocumentStore;
use crate::utils::mailer::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Document store handle
    pub store: Arc<dyn DocumentStore>,

    /// Outbound mail handle
    pub mailer: Arc<dyn Mailer>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn DocumentStore>, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                mailer,
                config,
            }),
        }
    }

    /// Get a reference to the document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the mailer
    pub fn mailer(&self) -> &dyn Mailer {
        self.inner.mailer.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
