//! Per-user recipes and reminders.
//!
//! [`NoteManager`] performs owner-scoped CRUD against a document store. [`NoteBoard`]
//! adds the screen state on top: visible list, add/edit form and delete confirmation.

mod board;
mod form;
mod manager;

pub use board::NoteBoard;
pub use form::{NoteForm, Submission};
pub use manager::NoteManager;
