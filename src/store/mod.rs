//! Document store contract.
//!
//! Records are schemaless JSON objects grouped into named collections. The store assigns
//! ids on create. Updates merge top-level fields with last-write-wins semantics.

use std::future::Future;

use serde_json::{Map, Value};

use crate::errors::AppError;

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

/// A document as returned by [`DocumentStore::list_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Fields,
}

/// Verb-level access to a document database.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return the id the store assigned to it.
    fn create(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Every document of a collection, in creation order.
    fn list_all(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<StoredDocument>, AppError>> + Send;

    /// Merge `fields` into an existing document.
    fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn delete_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Merge `patch` into `target`, replacing any field present in both. A `null` in the
/// patch removes the field.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (name, value) in patch {
        if value.is_null() {
            target.remove(&name);
        } else {
            target.insert(name, value);
        }
    }
}
