//! SQLite-backed document store.
//!
//! Each document is one row holding its JSON body. Updates read, merge and write the body
//! inside a transaction.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::store::{merge_fields, DocumentStore, Fields, StoredDocument};

/// Document store over the `documents` table.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn parse_body(collection: &str, id: &str, body: &str) -> Result<Fields, AppError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Corrupt document {}/{}: {}", collection, id, e);
        AppError::Internal(format!("Document {} could not be read", id))
    })
}

impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let body = serde_json::to_string(&fields)?;

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(collection)
        .bind(&id)
        .bind(&body)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Document written to {} with ID: {}", collection, id);
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
        let rows = sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY seq")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        let documents = rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                let body: String = row.get("body");
                let fields = parse_body(collection, &id, &body)?;
                Ok(StoredDocument { id, fields })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        tracing::debug!("Fetched {} documents from {}", documents.len(), collection);
        Ok(documents)
    }

    async fn update_by_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

        let body: String = row.get("body");
        let mut current = parse_body(collection, id, &body)?;
        merge_fields(&mut current, fields);

        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE documents SET body = ?, updated_at = ? WHERE collection = ? AND id = ?")
            .bind(serde_json::to_string(&current)?)
            .bind(&now)
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!("Document {} in {} updated", id, collection);
        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Document {} not found", id)));
        }

        tracing::debug!("Document {} in {} deleted", id, collection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    async fn store() -> (SqliteDocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("docs.sqlite"))
            .await
            .unwrap();
        (SqliteDocumentStore::new(pool), temp_dir)
    }

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids_in_order() {
        let (store, _dir) = store().await;

        let first = store
            .create("reminders", fields(json!({ "title": "one" })))
            .await
            .unwrap();
        let second = store
            .create("reminders", fields(json!({ "title": "two" })))
            .await
            .unwrap();
        assert_ne!(first, second);

        let docs = store.list_all("reminders").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert_eq!(docs[1].fields["title"], "two");
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let (store, _dir) = store().await;
        store
            .create("recipes", fields(json!({ "title": "Soup" })))
            .await
            .unwrap();

        assert!(store.list_all("reminders").await.unwrap().is_empty());
        assert_eq!(store.list_all("recipes").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (store, _dir) = store().await;
        let id = store
            .create(
                "recipes",
                fields(json!({ "title": "Soup", "note": "hot", "email": "a@example.com" })),
            )
            .await
            .unwrap();

        store
            .update_by_id("recipes", &id, fields(json!({ "note": "cold" })))
            .await
            .unwrap();

        let docs = store.list_all("recipes").await.unwrap();
        assert_eq!(
            Value::Object(docs[0].fields.clone()),
            json!({ "title": "Soup", "note": "cold", "email": "a@example.com" })
        );
    }

    #[tokio::test]
    async fn test_missing_documents_are_not_found() {
        let (store, _dir) = store().await;

        let update = store
            .update_by_id("recipes", "nope", fields(json!({ "note": "x" })))
            .await;
        assert!(matches!(update, Err(AppError::NotFound(_))));

        let delete = store.delete_by_id("recipes", "nope").await;
        assert!(matches!(delete, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let (store, _dir) = store().await;
        let id = store
            .create("reminders", fields(json!({ "title": "Call mom" })))
            .await
            .unwrap();

        store.delete_by_id("reminders", &id).await.unwrap();
        assert!(store.list_all("reminders").await.unwrap().is_empty());
    }
}
