//! The add/edit note modal.

use crate::errors::AppError;
use crate::models::{NoteDraft, NoteField, OwnedNote};

/// State of the note editor. Opening it always replaces any earlier draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteForm {
    #[default]
    Closed,
    OpenNew {
        draft: NoteDraft,
    },
    OpenEdit {
        id: String,
        draft: NoteDraft,
    },
}

/// What saving the form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NoteDraft),
    Update { id: String, draft: NoteDraft },
}

impl NoteForm {
    pub fn open_new(&mut self) {
        *self = NoteForm::OpenNew {
            draft: NoteDraft::default(),
        };
    }

    pub fn open_edit(&mut self, note: &OwnedNote) {
        *self = NoteForm::OpenEdit {
            id: note.id.clone(),
            draft: note.to_draft(),
        };
    }

    /// Close the form and discard the draft.
    pub fn cancel(&mut self) {
        *self = NoteForm::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, NoteForm::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, NoteForm::OpenEdit { .. })
    }

    pub fn draft(&self) -> Option<&NoteDraft> {
        match self {
            NoteForm::Closed => None,
            NoteForm::OpenNew { draft } | NoteForm::OpenEdit { draft, .. } => Some(draft),
        }
    }

    pub fn set_field(&mut self, field: NoteField, value: impl Into<String>) -> Result<(), AppError> {
        match self {
            NoteForm::Closed => Err(AppError::Validation(
                "No note is being edited".to_string(),
            )),
            NoteForm::OpenNew { draft } | NoteForm::OpenEdit { draft, .. } => {
                draft.set(field, value);
                Ok(())
            }
        }
    }

    pub fn submission(&self) -> Option<Submission> {
        match self {
            NoteForm::Closed => None,
            NoteForm::OpenNew { draft } => Some(Submission::Create(draft.clone())),
            NoteForm::OpenEdit { id, draft } => Some(Submission::Update {
                id: id.clone(),
                draft: draft.clone(),
            }),
        }
    }
}
