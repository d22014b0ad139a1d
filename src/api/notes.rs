//! Owned note API endpoints, shared by the recipe book and the reminders screen.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult, Caller};
use crate::db::SqliteDocumentStore;
use crate::errors::AppError;
use crate::models::{CreatedNote, NoteDraft, NoteKind, NoteList, OwnedNote, UpdateNoteRequest};
use crate::notes::NoteManager;
use crate::AppState;

/// Delete query parameters.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// Must be `true`: the user acknowledged the delete prompt. Any other value counts
    /// as unconfirmed.
    #[serde(default)]
    pub confirm: Option<String>,
}

impl DeleteParams {
    pub fn confirmed(&self) -> bool {
        self.confirm
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

fn manager(state: &AppState, collection: &str) -> Result<NoteManager<SqliteDocumentStore>, AppError> {
    let kind = NoteKind::from_collection(collection)
        .ok_or_else(|| AppError::NotFound(format!("Unknown collection {}", collection)))?;
    Ok(NoteManager::new(state.store.clone(), kind))
}

/// GET /api/:collection - List the caller's notes.
pub async fn list_notes(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    caller: Caller,
) -> ApiResult<Vec<OwnedNote>> {
    let manager = manager(&state, &collection)?;
    success(manager.list(&caller).await?)
}

/// POST /api/:collection - Create a note and return the refreshed list.
pub async fn create_note(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    caller: Caller,
    Json(draft): Json<NoteDraft>,
) -> ApiResult<CreatedNote> {
    let manager = manager(&state, &collection)?;
    let id = manager.create(&caller, draft).await?;
    let notes = manager.list(&caller).await?;
    success(CreatedNote { id, notes })
}

/// PUT /api/:collection/:id - Update a note and return the refreshed list.
pub async fn update_note(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    caller: Caller,
    Json(changes): Json<UpdateNoteRequest>,
) -> ApiResult<NoteList> {
    let manager = manager(&state, &collection)?;
    manager.update(&caller, &id, changes).await?;
    let notes = manager.list(&caller).await?;
    success(NoteList { notes })
}

/// DELETE /api/:collection/:id?confirm=true - Delete a note and return the refreshed list.
pub async fn delete_note(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<DeleteParams>,
    caller: Caller,
) -> ApiResult<NoteList> {
    let manager = manager(&state, &collection)?;
    manager.delete(&caller, &id, params.confirmed()).await?;
    let notes = manager.list(&caller).await?;
    success(NoteList { notes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(confirm: Option<&str>) -> DeleteParams {
        DeleteParams {
            confirm: confirm.map(str::to_string),
        }
    }

    #[test]
    fn test_only_true_confirms() {
        assert!(params(Some("true")).confirmed());
        assert!(params(Some("TRUE")).confirmed());
        assert!(!params(Some("yes")).confirmed());
        assert!(!params(Some("")).confirmed());
        assert!(!params(None).confirmed());
    }
}
