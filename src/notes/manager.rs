//! Owner-scoped CRUD over one note collection.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::identity::{resolve_identity, IdentitySource};
use crate::models::{NoteDraft, NoteKind, OwnedNote, UpdateNoteRequest};
use crate::store::DocumentStore;

/// CRUD for the notes of one [`NoteKind`], filtered to the resolved owner.
pub struct NoteManager<S> {
    store: Arc<S>,
    kind: NoteKind,
}

impl<S> Clone for NoteManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            kind: self.kind,
        }
    }
}

fn require_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("Note id is required".to_string()));
    }
    Ok(())
}

impl<S: DocumentStore> NoteManager<S> {
    pub fn new(store: Arc<S>, kind: NoteKind) -> Self {
        Self { store, kind }
    }

    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    /// Fetch the whole collection and keep the resolved user's notes.
    pub async fn list<I: IdentitySource>(&self, identity: &I) -> Result<Vec<OwnedNote>, AppError> {
        let email = resolve_identity(identity).await?;
        self.list_owned_by(&email).await
    }

    async fn list_owned_by(&self, email: &str) -> Result<Vec<OwnedNote>, AppError> {
        let documents = self.store.list_all(self.kind.collection()).await?;
        documents
            .into_iter()
            .filter(|doc| doc.fields.get("email").and_then(Value::as_str) == Some(email))
            .map(|doc| OwnedNote::from_document(&doc.id, doc.fields))
            .collect()
    }

    /// Store a new note owned by the resolved user and return its id.
    pub async fn create<I: IdentitySource>(
        &self,
        identity: &I,
        draft: NoteDraft,
    ) -> Result<String, AppError> {
        let email = resolve_identity(identity).await?;

        let id = self
            .store
            .create(self.kind.collection(), draft.into_document(&email))
            .await?;

        tracing::info!("{} {} created", self.kind.label(), id);
        Ok(id)
    }

    /// Merge `changes` into note `id`, restamping it with the resolved user.
    ///
    /// The previous owner is not checked.
    pub async fn update<I: IdentitySource>(
        &self,
        identity: &I,
        id: &str,
        changes: UpdateNoteRequest,
    ) -> Result<(), AppError> {
        require_id(id)?;
        let email = resolve_identity(identity).await?;

        self.store
            .update_by_id(self.kind.collection(), id, changes.into_document(&email))
            .await?;

        tracing::info!("{} {} updated", self.kind.label(), id);
        Ok(())
    }

    /// Delete note `id`. `confirmed` must be set by an explicit user acknowledgement.
    pub async fn delete<I: IdentitySource>(
        &self,
        identity: &I,
        id: &str,
        confirmed: bool,
    ) -> Result<(), AppError> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "Are you sure you want to delete this {}?",
                self.kind.label().to_lowercase()
            )));
        }
        require_id(id)?;
        resolve_identity(identity).await?;

        self.store.delete_by_id(self.kind.collection(), id).await?;

        tracing::info!("{} {} deleted", self.kind.label(), id);
        Ok(())
    }
}
