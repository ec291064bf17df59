use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Note;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteCreate {
    pub(crate) user_id: String,
    #[validate(length(min = 1, max = 100, message = "subject must be between 1 and 100 chars"))]
    pub(crate) subject: String,
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 chars"))]
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteUpdate {
    #[serde(default)]
    pub(crate) subject: Option<String>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteResponse {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) subject: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl NoteResponse {
    pub(crate) fn from_db(note: Note) -> Self {
        Self {
            id: note.id,
            user_id: note.user_id,
            subject: note.subject,
            title: note.title,
            content: note.content,
            created_at: format_primitive(note.created_at),
            updated_at: format_primitive(note.updated_at),
        }
    }
}
