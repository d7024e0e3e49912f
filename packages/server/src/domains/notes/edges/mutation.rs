use std::str::FromStr;

use juniper::{FieldError, FieldResult};
use tracing::info;
use uuid::Uuid;

use crate::common::NoteId;
use crate::domains::notes::data::NoteData;
use crate::domains::notes::models::{Note, NoteableType};
use crate::server::graphql::GraphQLContext;

/// Create a note attached to a client or property
pub async fn create_note(
    ctx: &GraphQLContext,
    entity_type: String,
    entity_id: String,
    content: String,
    created_by: String,
) -> FieldResult<NoteData> {
    info!(entity_type = %entity_type, entity_id = %entity_id, "Creating note");

    let noteable_type = NoteableType::from_str(&entity_type)
        .map_err(|_| FieldError::new("Unknown entity type", juniper::Value::null()))?;
    let entity_id = Uuid::parse_str(&entity_id)
        .map_err(|_| FieldError::new("Invalid entity ID", juniper::Value::null()))?;

    let content = content.trim();
    if content.is_empty() {
        return Err(FieldError::new(
            "Note content is required",
            juniper::Value::null(),
        ));
    }

    let note = Note::create_for_entity(noteable_type, entity_id, content, &created_by, &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(format!("Failed to create note: {}", e), juniper::Value::null())
        })?;

    Ok(NoteData::from(note))
}

/// Update a note's content
pub async fn update_note(
    ctx: &GraphQLContext,
    note_id: String,
    content: String,
) -> FieldResult<NoteData> {
    let note_id = NoteId::parse(&note_id)
        .map_err(|_| FieldError::new("Invalid note ID", juniper::Value::null()))?;

    if Note::find_by_id(note_id, &ctx.db_pool)
        .await
        .map_err(|e| FieldError::new(format!("{}", e), juniper::Value::null()))?
        .is_none()
    {
        return Err(FieldError::new("Note not found", juniper::Value::null()));
    }

    let note = Note::update(note_id, content.trim(), &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(format!("Failed to update note: {}", e), juniper::Value::null())
        })?;

    Ok(NoteData::from(note))
}

/// Delete a note
pub async fn delete_note(ctx: &GraphQLContext, note_id: String) -> FieldResult<bool> {
    let note_id = NoteId::parse(&note_id)
        .map_err(|_| FieldError::new("Invalid note ID", juniper::Value::null()))?;

    Note::delete(note_id, &ctx.db_pool).await.map_err(|e| {
        FieldError::new(format!("Failed to delete note: {}", e), juniper::Value::null())
    })?;

    Ok(true)
}
