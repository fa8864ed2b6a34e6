use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};

use models::user;
use crate::errors::ServiceError;

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: &str) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::Entity::find_by_id(id.to_string()).one(db).await?)
}

/// Insert the user or refresh its profile fields.
#[instrument(skip(db, input), fields(user_id = %input.id))]
pub async fn upsert_user(db: &DatabaseConnection, input: user::UpsertUser) -> Result<user::Model, ServiceError> {
    Ok(user::upsert(db, input).await?)
}

/// Set the account type; company details are dropped for individuals.
#[instrument(skip(db, change), fields(user_type = %change.user_type))]
pub async fn set_user_type(db: &DatabaseConnection, id: &str, change: user::UserTypeChange) -> Result<user::Model, ServiceError> {
    change.validate()?;
    let change = change.normalized();
    let mut am: user::ActiveModel = user::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?
        .into();
    am.user_type = Set(change.user_type);
    am.company_name = Set(change.company_name);
    am.company_license = Set(change.company_license);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(user_id = %updated.id, "user_type_set");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn user_profile_and_type() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let id = format!("svc-user-{}", Uuid::new_v4());

        let u = upsert_user(&db, user::UpsertUser {
            id: id.clone(),
            email: Some(format!("{id}@example.com")),
            first_name: Some("Mia".into()),
            ..Default::default()
        }).await?;
        assert_eq!(u.user_type, "individual");

        let agency = set_user_type(&db, &id, user::UserTypeChange {
            user_type: "agency".into(),
            company_name: Some("Northwind Realty".into()),
            company_license: Some("RE-2231".into()),
        }).await?;
        assert_eq!(agency.company_name.as_deref(), Some("Northwind Realty"));

        // Signing in again refreshes the profile without resetting the type.
        let again = upsert_user(&db, user::UpsertUser { id: id.clone(), first_name: Some("Mia".into()), ..Default::default() }).await?;
        assert_eq!(again.user_type, "agency");

        let solo = set_user_type(&db, &id, user::UserTypeChange {
            user_type: "individual".into(),
            company_name: Some("ignored".into()),
            company_license: None,
        }).await?;
        assert_eq!(solo.company_name, None);
        assert_eq!(solo.company_license, None);

        assert!(get_user(&db, &id).await?.is_some());
        user::Entity::delete_by_id(id.clone()).exec(&db).await?;
        assert!(get_user(&db, &id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_type_rejected_without_query() {
        let db = sea_orm::MockDatabase::new(sea_orm::DatabaseBackend::Postgres).into_connection();
        let err = set_user_type(&db, "u1", user::UserTypeChange {
            user_type: "broker".into(),
            company_name: None,
            company_license: None,
        }).await.unwrap_err();
        assert!(err.is_validation());
    }
}
