//! Shared fixtures: an in-memory credential store standing in for the
//! Postgres-backed one, and user builders.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use vidtube::config::TokenConfig;
use vidtube::error::Result;
use vidtube::models::User;
use vidtube::services::token_service::{CredentialStore, TokenService};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().remove(&id);
    }

    pub fn stored_refresh_token(&self, id: Uuid) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|u| u.refresh_token.clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn store_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.refresh_token = token.map(String::from);
        }
        Ok(())
    }
}

pub fn make_user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: format!("{username} test"),
        password_hash: "$argon2id$stub".to_string(),
        avatar_url: None,
        cover_image_url: None,
        google_id: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    }
}

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 864000,
    }
}

pub fn token_service(store: Arc<MemoryStore>) -> TokenService {
    TokenService::new(store, test_token_config())
}
