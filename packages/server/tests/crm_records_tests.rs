//! Supporting CRM records: members, notes, and delete semantics around
//! the property aggregate.

mod common;

use std::sync::Arc;

use test_context::test_context;

use common::{create_test_member, create_test_org, rent_draft, TestHarness};
use server_core::domains::client::edges::mutation as client_mutations;
use server_core::domains::client::{Client, ClientPhone, NewOwnerFields, OwnerSpec};
use server_core::domains::member::Member;
use server_core::domains::notes::{Note, NoteableType};
use server_core::domains::property::activities::{create_property, delete_property};
use server_core::domains::property::models::{MediaSubmission, Property, PropertyPhoto};
use server_core::server::graphql::GraphQLContext;

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_member_reassigns_their_properties(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let leaving = create_test_member(&org, "leaving@test.example", &ctx.db_pool).await;
    let staying = create_test_member(&org, "staying@test.example", &ctx.db_pool).await;

    create_property(org.id, rent_draft(leaving.id, "Casa uno"), ctx.deps())
        .await
        .unwrap();
    create_property(org.id, rent_draft(leaving.id, "Casa dos"), ctx.deps())
        .await
        .unwrap();

    let reassigned = Member::delete_and_reassign(leaving.id, staying.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(reassigned, 2);

    assert!(Member::find_by_id(leaving.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
    let properties = Property::find_for_organization(org.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(properties.len(), 2);
    assert!(properties.iter().all(|p| p.agent_id == staying.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reassignment_to_another_organization_is_rejected(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let other_org = create_test_org(&ctx.db_pool).await;
    let member = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;
    let outsider = create_test_member(&other_org, "outsider@test.example", &ctx.db_pool).await;

    let err = Member::delete_and_reassign(member.id, outsider.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("same organization"));
    assert!(Member::find_by_id(member.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn notes_attach_to_clients_and_properties(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let created = create_property(org.id, rent_draft(agent.id, "Casa anotada"), ctx.deps())
        .await
        .unwrap();

    let note = Note::create_for_entity(
        NoteableType::Property,
        created.property_id.into_uuid(),
        "Owner prefers evening viewings.",
        "agent@test.example",
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let notes = Note::find_for_entity(
        NoteableType::Property,
        created.property_id.into_uuid(),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note.id);

    let updated = Note::update(note.id, "Owner prefers morning viewings.", &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(updated.content, "Owner prefers morning viewings.");

    Note::delete(note.id, &ctx.db_pool).await.unwrap();
    assert!(Note::find_for_entity(
        NoteableType::Property,
        created.property_id.into_uuid(),
        &ctx.db_pool,
    )
    .await
    .unwrap()
    .is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_property_cascades_photos_and_notes(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Casa a derribar");
    draft.media = vec![MediaSubmission {
        id: None,
        filename: Some("front.jpg".to_string()),
        content: Some(vec![0u8; 8]),
        is_cover: true,
        is_deleted: false,
    }];
    let created = create_property(org.id, draft, ctx.deps()).await.unwrap();

    let photos = PropertyPhoto::find_for_property(created.property_id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(photos.len(), 1);
    let remote_id = photos[0].remote_id.clone();

    Note::create_for_entity(
        NoteableType::Property,
        created.property_id.into_uuid(),
        "Demolition scheduled.",
        "agent@test.example",
        &ctx.db_pool,
    )
    .await
    .unwrap();

    delete_property(org.id, created.property_id, ctx.deps())
        .await
        .unwrap();

    assert!(Property::find_by_id(created.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
    assert!(PropertyPhoto::find_for_property(created.property_id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(Note::find_for_entity(
        NoteableType::Property,
        created.property_id.into_uuid(),
        &ctx.db_pool,
    )
    .await
    .unwrap()
    .is_empty());
    assert_eq!(ctx.storage().deleted_remote_ids(), vec![remote_id]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn client_phone_management_keeps_one_number_per_type(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Casa con contacto");
    draft.owner = Some(OwnerSpec::New(NewOwnerFields {
        first_name: "Marta".to_string(),
        last_name: "Ruiz".to_string(),
        mobile_phone: Some("612555500".to_string()),
        ..Default::default()
    }));
    let created = create_property(org.id, draft, ctx.deps()).await.unwrap();
    let owner_id = Property::find_by_id(created.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap()
        .owner_client_id
        .unwrap();

    let gql = GraphQLContext::new(Arc::new(ctx.deps().clone()));

    // A home number can join the existing mobile.
    let home = client_mutations::add_client_phone(
        &gql,
        org.id.to_string(),
        owner_id.to_string(),
        "913334444".to_string(),
        "home".to_string(),
        false,
    )
    .await
    .unwrap();

    // A second home number is rejected: the (client, type) key is the identity.
    let err = client_mutations::add_client_phone(
        &gql,
        org.id.to_string(),
        owner_id.to_string(),
        "915556666".to_string(),
        "home".to_string(),
        false,
    )
    .await
    .unwrap_err();
    assert!(err.message().contains("already has a home number"));

    client_mutations::remove_client_phone(&gql, home.id)
        .await
        .unwrap();
    let phones = ClientPhone::find_for_client(owner_id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].phone_type, "mobile");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_client_detaches_owned_properties(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Casa heredada");
    draft.owner = Some(OwnerSpec::New(NewOwnerFields {
        first_name: "Marta".to_string(),
        last_name: "Ruiz".to_string(),
        ..Default::default()
    }));
    let created = create_property(org.id, draft, ctx.deps()).await.unwrap();
    let owner_id = Property::find_by_id(created.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap()
        .owner_client_id
        .unwrap();

    Client::delete(owner_id, &ctx.db_pool).await.unwrap();

    let property = Property::find_by_id(created.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(property.owner_client_id, None);
}
