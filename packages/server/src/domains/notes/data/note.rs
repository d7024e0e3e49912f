use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::notes::models::Note;

/// Note GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A free-form note attached to a client or property")]
pub struct NoteData {
    /// Unique identifier
    pub id: String,

    /// Note body
    pub content: String,

    /// Who wrote the note
    pub created_by: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteData {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_string(),
            content: note.content,
            created_by: note.created_by,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
