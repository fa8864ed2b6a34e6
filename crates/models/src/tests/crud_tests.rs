use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use super::{seed_user, setup_test_db};
use crate::errors::ModelError;
use crate::{activity, lead, property, user};

#[tokio::test]
async fn test_user_upsert_refreshes_profile() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let created = seed_user(&db).await?;
    assert_eq!(created.user_type, user::DEFAULT_USER_TYPE);

    let updated = user::upsert(
        &db,
        user::UpsertUser {
            id: created.id.clone(),
            email: created.email.clone(),
            first_name: Some("Renamed".into()),
            last_name: created.last_name.clone(),
            profile_image_url: Some("https://img.example.com/a.png".into()),
        },
    )
    .await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name.as_deref(), Some("Renamed"));
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_lead_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let owner = seed_user(&db).await?;

    let created = lead::insert(
        &db,
        lead::NewLead {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: "ana@example.com".into(),
            phone: Some("".into()),
            assigned_to: Some(owner.id.clone()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(created.status, lead::DEFAULT_STATUS);
    assert_eq!(created.phone, None);

    let mut am: lead::ActiveModel = created.clone().into();
    lead::LeadChanges { status: Some("contacted".into()), ..Default::default() }.apply(&mut am)?;
    let updated = am.update(&db).await?;
    assert_eq!(updated.status, "contacted");
    assert_eq!(updated.first_name, "Ana");

    let mine = lead::Entity::find()
        .filter(lead::Column::AssignedTo.eq(owner.id.clone()))
        .all(&db)
        .await?;
    assert_eq!(mine.len(), 1);

    // Deleting the owner keeps the lead and clears the link.
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    let orphan = lead::Entity::find_by_id(created.id).one(&db).await?.expect("lead kept");
    assert_eq!(orphan.assigned_to, None);

    lead::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_property_decimal_and_arrays() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let created = property::insert(
        &db,
        property::NewProperty {
            title: "Maple Cottage".into(),
            address: "9 Maple Ln".into(),
            city: "Burlington".into(),
            state: "VT".into(),
            zip_code: "05401".into(),
            property_type: "house".into(),
            price: Decimal::from_str("325000.50")?,
            lot_size: Some(Decimal::from_str("0.25")?),
            features: Some(vec!["garage".into(), "porch".into()]),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(created.price, Decimal::from_str("325000.50")?);
    assert_eq!(created.status, property::DEFAULT_STATUS);
    assert_eq!(created.features.as_deref().map(|f| f.len()), Some(2));

    property::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_activity_log_untouched_by_user_delete() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let owner = seed_user(&db).await?;

    let logged = activity::insert(
        &db,
        activity::NewActivity {
            title: "Contact added".into(),
            description: None,
            activity_type: "contact_created".into(),
            entity_type: Some("contact".into()),
            entity_id: Some(1),
            user_id: Some(owner.id.clone()),
        },
    )
    .await?;

    user::Entity::delete_by_id(owner.id.clone()).exec(&db).await?;
    let kept = activity::Entity::find_by_id(logged.id).one(&db).await?.expect("entry kept");
    assert_eq!(kept, logged);

    activity::Entity::delete_by_id(logged.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_unknown_owner_is_validation_error() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let err = lead::insert(
        &db,
        lead::NewLead {
            first_name: "No".into(),
            last_name: "Owner".into(),
            email: "no.owner@example.com".into(),
            assigned_to: Some(format!("ghost-{}", uuid::Uuid::new_v4())),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)), "got {err:?}");
    Ok(())
}
