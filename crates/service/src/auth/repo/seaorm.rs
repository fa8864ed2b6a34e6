use sea_orm::{DatabaseConnection, EntityTrait, ColumnTrait, QueryFilter};

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::{user, user_credentials};

/// Users and password credentials stored through sea-orm.
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl From<user::Model> for AuthUser {
    fn from(u: user::Model) -> Self {
        AuthUser { id: u.id, email: u.email.unwrap_or_default(), first_name: u.first_name, last_name: u.last_name }
    }
}

impl From<user_credentials::Model> for Credentials {
    fn from(c: user_credentials::Model) -> Self {
        Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, email: &str, first_name: Option<String>, last_name: Option<String>) -> Result<AuthUser, AuthError> {
        let input = user::UpsertUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(email.to_lowercase()),
            first_name,
            last_name,
            profile_image_url: None,
        };
        let created = user::upsert(&self.db, input).await?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError> {
        let found = user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(found.map(Credentials::from))
    }

    async fn upsert_password(&self, user_id: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let saved = user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(saved.into())
    }
}
