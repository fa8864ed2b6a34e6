use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, email: &str, first_name: Option<String>, last_name: Option<String>) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>,   // key: lowercase email
        creds: Mutex<HashMap<String, Credentials>>, // key: user_id
    }

    fn poisoned<T>(_: T) -> AuthError { AuthError::Repository("lock poisoned".into()) }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(poisoned)?;
            Ok(users.get(&email.to_lowercase()).cloned())
        }

        async fn create_user(&self, email: &str, first_name: Option<String>, last_name: Option<String>) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(poisoned)?;
            let key = email.to_lowercase();
            if users.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: uuid::Uuid::new_v4().to_string(), email: key.clone(), first_name, last_name };
            users.insert(key, user.clone());
            Ok(user)
        }

        async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().map_err(poisoned)?;
            Ok(creds.get(user_id).cloned())
        }

        async fn upsert_password(&self, user_id: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().map_err(poisoned)?;
            let c = Credentials { user_id: user_id.to_string(), password_hash, password_algorithm };
            creds.insert(user_id.to_string(), c.clone());
            Ok(c)
        }
    }
}
