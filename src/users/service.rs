//! Profile lookup and update

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::models::{ProfileUpdate, UserProfile};
use crate::auth::PasswordHasher;
use crate::error::{Error, Result};
use crate::store::UserStore;

/// Parse a user id from a path segment. Malformed ids are reported as
/// not-found, never as internal errors.
pub fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::UserNotFound)
}

/// Some(value) only when a field was sent with content; an empty string
/// counts as absent. Values are stored as sent.
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn find(&self, id: Uuid) -> Result<UserProfile> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or(Error::UserNotFound)
    }

    /// Look up a user from an untrusted id string
    pub async fn get_by_id(&self, raw_id: &str) -> Result<UserProfile> {
        let id = parse_user_id(raw_id)?;
        self.find(id).await
    }

    /// Apply the fields present in `update` and return the new profile
    pub async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<UserProfile> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(Error::UserNotFound)?;
        let mut changed = false;

        if let Some(name) = provided(update.name) {
            user.name = name;
            changed = true;
        }

        if let Some(password) = provided(update.password) {
            user.password_hash = self.hasher.hash(&password).await?;
            changed = true;
        }

        if let Some(image) = provided(update.profile_image) {
            user.profile_image = Some(image);
            changed = true;
        }

        if let Some(bio) = provided(update.bio) {
            user.bio = Some(bio);
            changed = true;
        }

        if changed {
            user.updated_at = Utc::now();
            self.users.update(&user).await?;
            tracing::info!("Updated profile of user {}", user.id);
        }

        Ok(user.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::users::UserRecord;

    async fn setup() -> (UserService, Arc<MemoryStore>, UserRecord) {
        let store = Arc::new(MemoryStore::new());
        let hasher = PasswordHasher::new(4).unwrap();
        let user = UserRecord::new(
            "Ana".to_string(),
            "ana@example.com".to_string(),
            hasher.hash("abc12").await.unwrap(),
        );
        let user = store.insert(user).await.unwrap();
        (UserService::new(store.clone(), hasher), store, user)
    }

    #[test]
    fn test_parse_user_id() {
        assert!(matches!(parse_user_id("not-a-uuid"), Err(Error::UserNotFound)));
        assert!(matches!(parse_user_id(""), Err(Error::UserNotFound)));
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
    }

    #[tokio::test]
    async fn test_get_by_malformed_id() {
        let (service, _, _) = setup().await;
        assert!(matches!(
            service.get_by_id("1234").await,
            Err(Error::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_empty_fields_are_ignored() {
        let (service, store, user) = setup().await;
        let update = ProfileUpdate {
            name: Some(String::new()),
            password: Some(String::new()),
            bio: None,
            profile_image: Some(String::new()),
        };
        let profile = service.update_profile(user.id, update).await.unwrap();
        assert_eq!(profile.name, "Ana");
        assert!(profile.profile_image.is_none());

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, user.password_hash);
        assert_eq!(stored.updated_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_fields_are_stored_as_sent() {
        let (service, store, user) = setup().await;
        let update = ProfileUpdate {
            name: Some(" Ana Maria ".to_string()),
            bio: Some("  ".to_string()),
            ..Default::default()
        };
        let profile = service.update_profile(user.id, update).await.unwrap();
        assert_eq!(profile.name, " Ana Maria ");
        assert_eq!(profile.bio.as_deref(), Some("  "));

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, " Ana Maria ");
        assert!(stored.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let (service, _, _) = setup().await;
        let result = service
            .update_profile(Uuid::new_v4(), ProfileUpdate::default())
            .await;
        assert!(matches!(result, Err(Error::UserNotFound)));
    }
}
