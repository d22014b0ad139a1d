//! Per-screen controller for a user's notes: the visible list, the editor and the delete prompt.

use crate::errors::AppError;
use crate::identity::IdentitySource;
use crate::models::{NoteField, NoteKind, OwnedNote};
use crate::store::DocumentStore;

use super::form::{NoteForm, Submission};
use super::manager::NoteManager;

/// Screen state for one user's notes.
///
/// The visible list is only ever replaced by a full refresh. A failed operation leaves
/// the list and the form as they were.
pub struct NoteBoard<S, I> {
    manager: NoteManager<S>,
    identity: I,
    notes: Vec<OwnedNote>,
    form: NoteForm,
    pending_delete: Option<String>,
}

impl<S: DocumentStore, I: IdentitySource> NoteBoard<S, I> {
    pub fn new(manager: NoteManager<S>, identity: I) -> Self {
        Self {
            manager,
            identity,
            notes: Vec::new(),
            form: NoteForm::Closed,
            pending_delete: None,
        }
    }

    pub fn kind(&self) -> NoteKind {
        self.manager.kind()
    }

    pub fn notes(&self) -> &[OwnedNote] {
        &self.notes
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Re-fetch the owned list. On failure the last known list stays.
    pub async fn refresh(&mut self) -> Result<&[OwnedNote], AppError> {
        match self.manager.list(&self.identity).await {
            Ok(notes) => {
                self.notes = notes;
                Ok(&self.notes)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {} list: {}", self.kind().label(), e);
                Err(e)
            }
        }
    }

    pub fn open_new(&mut self) {
        self.form.open_new();
    }

    /// Open the editor on a row of the visible list.
    pub fn open_edit(&mut self, id: &str) -> Result<(), AppError> {
        let note = self.visible_note(id)?.clone();
        self.form.open_edit(&note);
        Ok(())
    }

    pub fn edit_field(&mut self, field: NoteField, value: impl Into<String>) -> Result<(), AppError> {
        self.form.set_field(field, value)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Create or update from the open form, then close it and refresh.
    ///
    /// If the store call fails the form stays open with its draft intact.
    pub async fn save(&mut self) -> Result<(), AppError> {
        let submission = self
            .form
            .submission()
            .ok_or_else(|| AppError::Validation("No note is being edited".to_string()))?;

        match submission {
            Submission::Create(draft) => {
                self.manager.create(&self.identity, draft).await?;
            }
            Submission::Update { id, draft } => {
                self.manager
                    .update(&self.identity, &id, draft.into())
                    .await?;
            }
        }

        self.form.cancel();
        self.refresh().await?;
        Ok(())
    }

    /// Ask for confirmation before deleting a visible row.
    pub fn request_delete(&mut self, id: &str) -> Result<(), AppError> {
        self.visible_note(id)?;
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the row awaiting confirmation, then refresh.
    pub async fn confirm_delete(&mut self) -> Result<(), AppError> {
        let id = self
            .pending_delete
            .take()
            .ok_or_else(|| AppError::Validation("No deletion is awaiting confirmation".to_string()))?;

        self.manager.delete(&self.identity, &id, true).await?;
        self.refresh().await?;
        Ok(())
    }

    fn visible_note(&self, id: &str) -> Result<&OwnedNote, AppError> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", self.kind().label(), id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::db::{init_database, SqliteDocumentStore};
    use crate::identity::CachedIdentity;
    use crate::store::{Fields, StoredDocument};

    /// SQLite store that can be switched into failing every call.
    struct FlakyStore {
        inner: SqliteDocumentStore,
        down: AtomicBool,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), AppError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(AppError::Database("store unavailable".into()));
            }
            Ok(())
        }
    }

    impl DocumentStore for FlakyStore {
        async fn create(&self, collection: &str, fields: Fields) -> Result<String, AppError> {
            self.check()?;
            self.inner.create(collection, fields).await
        }

        async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
            self.check()?;
            self.inner.list_all(collection).await
        }

        async fn update_by_id(
            &self,
            collection: &str,
            id: &str,
            fields: Fields,
        ) -> Result<(), AppError> {
            self.check()?;
            self.inner.update_by_id(collection, id, fields).await
        }

        async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), AppError> {
            self.check()?;
            self.inner.delete_by_id(collection, id).await
        }
    }

    async fn board(
        email: &str,
    ) -> (
        NoteBoard<FlakyStore, CachedIdentity>,
        Arc<FlakyStore>,
        TempDir,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("board.sqlite"))
            .await
            .unwrap();
        let store = Arc::new(FlakyStore {
            inner: SqliteDocumentStore::new(pool),
            down: AtomicBool::new(false),
        });
        let manager = NoteManager::new(store.clone(), NoteKind::Reminder);
        (
            NoteBoard::new(manager, CachedIdentity::known(email)),
            store,
            temp_dir,
        )
    }

    #[tokio::test]
    async fn test_add_save_closes_form_and_refreshes() {
        let (mut board, _store, _dir) = board("a@example.com").await;
        board.refresh().await.unwrap();
        assert!(board.notes().is_empty());

        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        board.edit_field(NoteField::Time, "18:00").unwrap();
        board.save().await.unwrap();

        assert_eq!(board.form(), &NoteForm::Closed);
        assert_eq!(board.notes().len(), 1);
        assert_eq!(board.notes()[0].title, "Soup");
        assert_eq!(board.notes()[0].email, "a@example.com");
        assert!(!board.notes()[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_edit_save_updates_row() {
        let (mut board, _store, _dir) = board("a@example.com").await;
        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        board.save().await.unwrap();
        let id = board.notes()[0].id.clone();

        board.open_edit(&id).unwrap();
        assert!(board.form().is_editing());
        board.edit_field(NoteField::Title, "Stew").unwrap();
        board.save().await.unwrap();

        assert_eq!(board.notes().len(), 1);
        assert_eq!(board.notes()[0].id, id);
        assert_eq!(board.notes()[0].title, "Stew");
    }

    #[tokio::test]
    async fn test_clearing_image_on_edit_removes_it() {
        let (mut board, _store, _dir) = board("a@example.com").await;
        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        board.edit_field(NoteField::Image, "https://img/x.png").unwrap();
        board.save().await.unwrap();
        assert_eq!(board.notes()[0].image.as_deref(), Some("https://img/x.png"));
        let id = board.notes()[0].id.clone();

        board.open_edit(&id).unwrap();
        board.edit_field(NoteField::Image, "").unwrap();
        board.save().await.unwrap();

        assert_eq!(board.notes()[0].image, None);
        assert_eq!(board.notes()[0].title, "Soup");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_open() {
        let (mut board, store, _dir) = board("a@example.com").await;
        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();

        store.down.store(true, Ordering::SeqCst);
        assert!(board.save().await.is_err());

        assert!(board.form().is_open());
        assert_eq!(board.form().draft().unwrap().title, "Soup");
        assert!(board.notes().is_empty());

        store.down.store(false, Ordering::SeqCst);
        board.save().await.unwrap();
        assert_eq!(board.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_list() {
        let (mut board, store, _dir) = board("a@example.com").await;
        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        board.save().await.unwrap();

        store.down.store(true, Ordering::SeqCst);
        assert!(board.refresh().await.is_err());
        assert_eq!(board.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_flow_with_confirmation() {
        let (mut board, _store, _dir) = board("a@example.com").await;
        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        board.save().await.unwrap();
        let id = board.notes()[0].id.clone();

        board.request_delete(&id).unwrap();
        assert_eq!(board.pending_delete(), Some(id.as_str()));
        board.cancel_delete();
        assert_eq!(board.pending_delete(), None);
        assert_eq!(board.notes().len(), 1);

        board.request_delete(&id).unwrap();
        board.confirm_delete().await.unwrap();
        assert!(board.notes().iter().all(|n| n.id != id));
        assert!(board.confirm_delete().await.is_err());
    }

    #[tokio::test]
    async fn test_rows_must_be_visible() {
        let (mut board, _store, _dir) = board("a@example.com").await;
        assert!(matches!(
            board.open_edit("missing"),
            Err(AppError::NotFound(_))
        ));
        assert!(board.request_delete("missing").is_err());
        assert!(matches!(
            board.save().await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unresolved_identity_leaves_state_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("board.sqlite"))
            .await
            .unwrap();
        let manager = NoteManager::new(
            Arc::new(SqliteDocumentStore::new(pool)),
            NoteKind::Recipe,
        );
        let mut board = NoteBoard::new(manager, CachedIdentity::absent());

        board.open_new();
        board.edit_field(NoteField::Title, "Soup").unwrap();
        assert_eq!(board.save().await, Err(AppError::identity_unresolved()));
        assert!(board.form().is_open());
        assert!(board.notes().is_empty());
    }
}
