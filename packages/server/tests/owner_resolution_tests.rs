//! Owner resolution: existing-owner linking, duplicate-contact conflicts,
//! and the no-partial-write guarantee around the save transaction.

mod common;

use test_context::test_context;

use common::{create_test_member, create_test_org, rent_draft, TestHarness};
use server_core::common::{ClientId, DomainError};
use server_core::domains::client::{Client, ClientPhone, NewOwnerFields, OwnerSpec, PhoneType};
use server_core::domains::property::activities::{create_property, update_property};
use server_core::domains::property::models::Property;

fn owner_with_mobile(first: &str, last: &str, mobile: &str) -> OwnerSpec {
    OwnerSpec::New(NewOwnerFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        mobile_phone: Some(mobile.to_string()),
        ..Default::default()
    })
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_mobile_phone_conflicts_without_writes(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Primera casa");
    draft.owner = Some(owner_with_mobile("Marta", "Ruiz", "612555100"));
    create_property(org.id, draft, ctx.deps()).await.unwrap();
    assert_eq!(
        Client::count_for_organization(org.id, &ctx.db_pool)
            .await
            .unwrap(),
        1
    );

    // Second save reuses the same mobile number inline.
    let mut draft = rent_draft(agent.id, "Segunda casa");
    draft.owner = Some(owner_with_mobile("Pedro", "García", "612555100"));
    let err = create_property(org.id, draft, ctx.deps()).await.unwrap_err();
    match err {
        DomainError::Conflict(message) => {
            assert!(message.contains("phone number or email"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // No second client, no second property.
    assert_eq!(
        Client::count_for_organization(org.id, &ctx.db_pool)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        Property::find_for_organization(org.id, &ctx.db_pool)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn existing_owner_is_linked_without_creating_clients(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Casa del propietario");
    draft.owner = Some(owner_with_mobile("Marta", "Ruiz", "612555200"));
    let first = create_property(org.id, draft, ctx.deps()).await.unwrap();
    let owner_id = Property::find_by_id(first.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap()
        .owner_client_id
        .unwrap();

    // Linking by id must not touch the clients table - even though the
    // owner's phone number is already on file.
    let mut draft = rent_draft(agent.id, "Otra casa del mismo propietario");
    draft.owner = Some(OwnerSpec::Existing(owner_id));
    let second = create_property(org.id, draft, ctx.deps()).await.unwrap();

    let second = Property::find_by_id(second.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.owner_client_id, Some(owner_id));
    assert_eq!(
        Client::count_for_organization(org.id, &ctx.db_pool)
            .await
            .unwrap(),
        1
    );

    // The owner still has exactly one mobile row.
    let phones = ClientPhone::find_for_client(owner_id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].phone_type, PhoneType::Mobile.to_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn owner_from_another_organization_is_not_found(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let other_org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;
    let other_agent = create_test_member(&other_org, "other@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(other_agent.id, "Casa ajena");
    draft.owner = Some(owner_with_mobile("Luis", "Vega", "612555300"));
    let created = create_property(other_org.id, draft, ctx.deps()).await.unwrap();
    let foreign_owner = Property::find_by_id(created.property_id, other_org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap()
        .owner_client_id
        .unwrap();

    let mut draft = rent_draft(agent.id, "Casa propia");
    draft.owner = Some(OwnerSpec::Existing(foreign_owner));
    let err = create_property(org.id, draft, ctx.deps()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn nonexistent_owner_id_is_not_found(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    let mut draft = rent_draft(agent.id, "Casa fantasma");
    draft.owner = Some(OwnerSpec::Existing(ClientId::new()));
    let err = create_property(org.id, draft, ctx.deps()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_conflict_rolls_back_scalar_changes(ctx: &mut TestHarness) {
    let org = create_test_org(&ctx.db_pool).await;
    let agent = create_test_member(&org, "agent@test.example", &ctx.db_pool).await;

    // Seed a client holding the colliding number.
    let mut draft = rent_draft(agent.id, "Casa de Marta");
    draft.owner = Some(owner_with_mobile("Marta", "Ruiz", "612555400"));
    create_property(org.id, draft, ctx.deps()).await.unwrap();

    // A property without an owner yet.
    let created = create_property(org.id, rent_draft(agent.id, "Casa sin dueño"), ctx.deps())
        .await
        .unwrap();

    // Update tries to change scalars AND attach a duplicate-contact owner.
    let mut draft = rent_draft(agent.id, "Casa sin dueño");
    draft.rent_price_dollars = Some("999".parse().unwrap());
    draft.owner = Some(owner_with_mobile("Pedro", "García", "612555400"));
    let err = update_property(org.id, created.property_id, draft, ctx.deps())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // The scalar write shares the owner-resolution transaction: nothing
    // about the property changed.
    let property = Property::find_by_id(created.property_id, org.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(property.rent_price_cents, Some(60_000));
    assert_eq!(property.owner_client_id, None);
}
