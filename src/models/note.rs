//! Owned note model: per-user recipes and reminders persisted in the document store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Which owned-note screen a record belongs to. Each kind reads and writes one collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Recipe,
    Reminder,
}

impl NoteKind {
    pub fn collection(&self) -> &'static str {
        match self {
            NoteKind::Recipe => "recipes",
            NoteKind::Reminder => "reminders",
        }
    }

    /// Parse the collection segment of a route, e.g. `"reminders"`.
    pub fn from_collection(name: &str) -> Option<Self> {
        match name {
            "recipes" => Some(NoteKind::Recipe),
            "reminders" => Some(NoteKind::Reminder),
            _ => None,
        }
    }

    /// Singular label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            NoteKind::Recipe => "Recipe",
            NoteKind::Reminder => "Reminder",
        }
    }
}

/// A persisted note owned by one user.
///
/// `date` is free text. The recipe book keeps ingredient text in it, so it is not
/// guaranteed to hold a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNote {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OwnedNote {
    /// Build a note from a stored document. Missing fields fall back to empty values.
    pub fn from_document(id: &str, fields: Map<String, Value>) -> Result<Self, AppError> {
        let mut note: OwnedNote =
            serde_json::from_value(Value::Object(fields)).map_err(|e| {
                tracing::error!("Malformed note {}: {}", id, e);
                AppError::Internal(format!("Note {} could not be read", id))
            })?;
        note.id = id.to_string();
        Ok(note)
    }

    /// The editable part of this note, as loaded into the edit form.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            note: self.note.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            image: self.image.clone(),
        }
    }
}

/// User-editable fields of a note. The owner email is stamped at save time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl NoteDraft {
    pub fn set(&mut self, field: NoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            NoteField::Title => self.title = value,
            NoteField::Note => self.note = value,
            NoteField::Date => self.date = value,
            NoteField::Time => self.time = value,
            NoteField::Image => {
                self.image = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
        }
    }

    /// Document fields for a new record owned by `email`.
    pub fn into_document(self, email: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("note".into(), Value::String(self.note));
        fields.insert("date".into(), Value::String(self.date));
        fields.insert("time".into(), Value::String(self.time));
        fields.insert("email".into(), Value::String(email.to_string()));
        if let Some(image) = self.image.filter(|image| !image.trim().is_empty()) {
            fields.insert("image".into(), Value::String(image));
        }
        fields
    }
}

/// A form field of the note editor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteField {
    Title,
    Note,
    Date,
    Time,
    Image,
}

/// Request body for updating an existing note. Absent fields are left untouched and a
/// blank `image` removes the stored one.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<NoteDraft> for UpdateNoteRequest {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            note: Some(draft.note),
            date: Some(draft.date),
            time: Some(draft.time),
            image: Some(draft.image.unwrap_or_default()),
        }
    }
}

impl UpdateNoteRequest {
    /// Partial document fields, restamped with the current owner `email`.
    pub fn into_document(self, email: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        let present = [
            ("title", self.title),
            ("note", self.note),
            ("date", self.date),
            ("time", self.time),
        ];
        for (name, value) in present {
            if let Some(value) = value {
                fields.insert(name.to_string(), Value::String(value));
            }
        }
        if let Some(image) = self.image {
            let image = if image.trim().is_empty() {
                Value::Null
            } else {
                Value::String(image)
            };
            fields.insert("image".into(), image);
        }
        fields.insert("email".into(), Value::String(email.to_string()));
        fields
    }
}

/// Response body for a successful create: the new id plus the refreshed owned list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNote {
    pub id: String,
    pub notes: Vec<OwnedNote>,
}

/// Response body for list-returning mutations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteList {
    pub notes: Vec<OwnedNote>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_collections() {
        assert_eq!(NoteKind::Recipe.collection(), "recipes");
        assert_eq!(NoteKind::Reminder.collection(), "reminders");
        assert_eq!(NoteKind::from_collection("reminders"), Some(NoteKind::Reminder));
        assert_eq!(NoteKind::from_collection("reminder"), None);
    }

    #[test]
    fn test_draft_document_stamps_email() {
        let draft = NoteDraft {
            title: "Soup".into(),
            image: Some("  ".into()),
            ..Default::default()
        };
        let fields = draft.into_document("a@example.com");

        assert_eq!(fields["title"], "Soup");
        assert_eq!(fields["email"], "a@example.com");
        assert_eq!(fields["note"], "");
        assert!(!fields.contains_key("image"));
    }

    #[test]
    fn test_update_document_only_has_present_fields() {
        let update = UpdateNoteRequest {
            time: Some("18:30".into()),
            ..Default::default()
        };
        let fields = update.into_document("b@example.com");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields["time"], "18:30");
        assert_eq!(fields["email"], "b@example.com");
    }

    #[test]
    fn test_update_blank_image_clears() {
        let mut draft = NoteDraft {
            title: "Soup".into(),
            image: Some("https://img.example/soup.png".into()),
            ..Default::default()
        };
        draft.set(NoteField::Image, "");
        let fields = UpdateNoteRequest::from(draft).into_document("a@example.com");
        assert_eq!(fields["image"], Value::Null);

        let raw = UpdateNoteRequest {
            image: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(raw.into_document("a@example.com")["image"], Value::Null);

        let untouched = UpdateNoteRequest::default().into_document("a@example.com");
        assert!(!untouched.contains_key("image"));
    }

    #[test]
    fn test_from_document_rejects_wrong_types_as_internal() {
        let Value::Object(fields) = json!({ "title": 42, "email": "a@example.com" }) else {
            unreachable!()
        };
        assert!(matches!(
            OwnedNote::from_document("doc-1", fields),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_from_document_tolerates_missing_fields() {
        let fields = json!({ "title": "Tea", "email": "a@example.com" });
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let note = OwnedNote::from_document("doc-1", fields).unwrap();

        assert_eq!(note.id, "doc-1");
        assert_eq!(note.title, "Tea");
        assert_eq!(note.time, "");
        assert_eq!(note.image, None);
    }

    #[test]
    fn test_set_image_blank_clears() {
        let mut draft = NoteDraft::default();
        draft.set(NoteField::Image, "https://img.example/soup.png");
        assert_eq!(draft.image.as_deref(), Some("https://img.example/soup.png"));
        draft.set(NoteField::Image, "");
        assert_eq!(draft.image, None);
    }
}
