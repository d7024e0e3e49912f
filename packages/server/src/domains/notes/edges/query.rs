use std::str::FromStr;

use juniper::{FieldError, FieldResult};
use uuid::Uuid;

use crate::domains::notes::data::NoteData;
use crate::domains::notes::models::{Note, NoteableType};
use crate::server::graphql::GraphQLContext;

/// List the notes attached to a client or property, newest first
pub async fn notes_for(
    ctx: &GraphQLContext,
    entity_type: String,
    entity_id: String,
) -> FieldResult<Vec<NoteData>> {
    let noteable_type = NoteableType::from_str(&entity_type)
        .map_err(|_| FieldError::new("Unknown entity type", juniper::Value::null()))?;
    let entity_id = Uuid::parse_str(&entity_id)
        .map_err(|_| FieldError::new("Invalid entity ID", juniper::Value::null()))?;

    let notes = Note::find_for_entity(noteable_type, entity_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(format!("Failed to load notes: {}", e), juniper::Value::null())
        })?;

    Ok(notes.into_iter().map(Into::into).collect())
}
