//! GraphQL schema definition.

use juniper::{EmptySubscription, FieldResult, RootNode};

use super::context::GraphQLContext;

// Domain edges (resolver glue)
use crate::domains::client::edges as client_edges;
use crate::domains::member::edges as member_edges;
use crate::domains::notes::edges as notes_edges;
use crate::domains::organization::edges as organization_edges;
use crate::domains::property::edges as property_edges;

// Domain data types (GraphQL types)
use crate::domains::client::data::{ClientData, ClientPhoneData};
use crate::domains::member::data::MemberData;
use crate::domains::notes::data::NoteData;
use crate::domains::organization::data::OrganizationData;
use crate::domains::property::data::{PropertyData, PropertyInput, SavePropertyResult};

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// API version
    fn api_version() -> &'static str {
        "1.0"
    }

    /// Fetch an organization by id
    async fn organization(
        ctx: &GraphQLContext,
        organization_id: String,
    ) -> FieldResult<Option<OrganizationData>> {
        organization_edges::query::organization(ctx, organization_id).await
    }

    /// List an organization's members (agents)
    async fn members(
        ctx: &GraphQLContext,
        organization_id: String,
    ) -> FieldResult<Vec<MemberData>> {
        member_edges::query::members(ctx, organization_id).await
    }

    /// Fetch a client with its contact rows
    async fn client(
        ctx: &GraphQLContext,
        organization_id: String,
        client_id: String,
    ) -> FieldResult<Option<ClientData>> {
        client_edges::query::client(ctx, organization_id, client_id).await
    }

    /// List an organization's clients
    async fn clients(
        ctx: &GraphQLContext,
        organization_id: String,
    ) -> FieldResult<Vec<ClientData>> {
        client_edges::query::clients(ctx, organization_id).await
    }

    /// Fetch a property with photos and videos
    async fn property(
        ctx: &GraphQLContext,
        organization_id: String,
        property_id: String,
    ) -> FieldResult<Option<PropertyData>> {
        property_edges::query::property(ctx, organization_id, property_id).await
    }

    /// Fetch a property by its public slug
    async fn property_by_slug(
        ctx: &GraphQLContext,
        slug: String,
    ) -> FieldResult<Option<PropertyData>> {
        property_edges::query::property_by_slug(ctx, slug).await
    }

    /// List an organization's properties, newest first
    async fn properties(
        ctx: &GraphQLContext,
        organization_id: String,
    ) -> FieldResult<Vec<PropertyData>> {
        property_edges::query::properties(ctx, organization_id).await
    }

    /// List the notes attached to a client or property
    async fn notes_for(
        ctx: &GraphQLContext,
        entity_type: String,
        entity_id: String,
    ) -> FieldResult<Vec<NoteData>> {
        notes_edges::query::notes_for(ctx, entity_type, entity_id).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Create an organization
    async fn create_organization(
        ctx: &GraphQLContext,
        name: String,
    ) -> FieldResult<OrganizationData> {
        organization_edges::mutation::create_organization(ctx, name).await
    }

    /// Create a member (agent)
    async fn create_member(
        ctx: &GraphQLContext,
        organization_id: String,
        display_name: String,
        email: String,
        is_admin: bool,
    ) -> FieldResult<MemberData> {
        member_edges::mutation::create_member(ctx, organization_id, display_name, email, is_admin)
            .await
    }

    /// Delete a member, reassigning their properties. Returns the number of
    /// reassigned properties.
    async fn delete_member(
        ctx: &GraphQLContext,
        member_id: String,
        reassign_to: String,
    ) -> FieldResult<i32> {
        member_edges::mutation::delete_member(ctx, member_id, reassign_to).await
    }

    /// Create a property listing
    async fn create_property(
        ctx: &GraphQLContext,
        organization_id: String,
        input: PropertyInput,
    ) -> FieldResult<SavePropertyResult> {
        property_edges::mutation::create_property(ctx, organization_id, input).await
    }

    /// Update a property listing
    async fn update_property(
        ctx: &GraphQLContext,
        organization_id: String,
        property_id: String,
        input: PropertyInput,
    ) -> FieldResult<SavePropertyResult> {
        property_edges::mutation::update_property(ctx, organization_id, property_id, input).await
    }

    /// Delete a property listing
    async fn delete_property(
        ctx: &GraphQLContext,
        organization_id: String,
        property_id: String,
    ) -> FieldResult<bool> {
        property_edges::mutation::delete_property(ctx, organization_id, property_id).await
    }

    /// Update a client's core fields
    async fn update_client(
        ctx: &GraphQLContext,
        organization_id: String,
        client_id: String,
        first_name: String,
        last_name: String,
        client_type: String,
        receives_email: bool,
    ) -> FieldResult<ClientData> {
        client_edges::mutation::update_client(
            ctx,
            organization_id,
            client_id,
            first_name,
            last_name,
            client_type,
            receives_email,
        )
        .await
    }

    /// Attach a phone number to a client
    async fn add_client_phone(
        ctx: &GraphQLContext,
        organization_id: String,
        client_id: String,
        phone_number: String,
        phone_type: String,
        has_whatsapp: bool,
    ) -> FieldResult<ClientPhoneData> {
        client_edges::mutation::add_client_phone(
            ctx,
            organization_id,
            client_id,
            phone_number,
            phone_type,
            has_whatsapp,
        )
        .await
    }

    /// Detach a phone number from a client
    async fn remove_client_phone(ctx: &GraphQLContext, phone_id: String) -> FieldResult<bool> {
        client_edges::mutation::remove_client_phone(ctx, phone_id).await
    }

    /// Detach an email address from a client
    async fn remove_client_email(ctx: &GraphQLContext, email_id: String) -> FieldResult<bool> {
        client_edges::mutation::remove_client_email(ctx, email_id).await
    }

    /// Delete a client, detaching any owned properties
    async fn delete_client(
        ctx: &GraphQLContext,
        organization_id: String,
        client_id: String,
    ) -> FieldResult<bool> {
        client_edges::mutation::delete_client(ctx, organization_id, client_id).await
    }

    /// Create a note on a client or property
    async fn create_note(
        ctx: &GraphQLContext,
        entity_type: String,
        entity_id: String,
        content: String,
        created_by: String,
    ) -> FieldResult<NoteData> {
        notes_edges::mutation::create_note(ctx, entity_type, entity_id, content, created_by).await
    }

    /// Update a note's content
    async fn update_note(
        ctx: &GraphQLContext,
        note_id: String,
        content: String,
    ) -> FieldResult<NoteData> {
        notes_edges::mutation::update_note(ctx, note_id, content).await
    }

    /// Delete a note
    async fn delete_note(ctx: &GraphQLContext, note_id: String) -> FieldResult<bool> {
        notes_edges::mutation::delete_note(ctx, note_id).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
