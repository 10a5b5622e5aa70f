//! In-memory store

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PhotoFilter, PhotoStore, UserStore};
use crate::error::{Error, Result};
use crate::photos::{Comment, Photo};
use crate::users::UserRecord;

/// Users and photos kept in process memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
    photos: Arc<RwLock<HashMap<Uuid, Photo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: UserRecord) -> Result<UserRecord> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(Error::EmailInUse);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(Error::UserNotFound),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.users.read().await.len())
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn insert(&self, photo: Photo) -> Result<Photo> {
        self.photos.write().await.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>> {
        Ok(self.photos.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: PhotoFilter) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .photos
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    async fn update_title(&self, id: Uuid, title: &str) -> Result<Photo> {
        let mut photos = self.photos.write().await;
        let photo = photos.get_mut(&id).ok_or(Error::PhotoNotFound)?;
        photo.title = title.to_string();
        photo.updated_at = Utc::now();
        Ok(photo.clone())
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        let mut photos = self.photos.write().await;
        let photo = photos.get_mut(&id).ok_or(Error::PhotoNotFound)?;
        if photo.is_liked_by(user_id) {
            return Err(Error::AlreadyLiked);
        }
        photo.likes.push(user_id);
        photo.updated_at = Utc::now();
        Ok(())
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<()> {
        let mut photos = self.photos.write().await;
        let photo = photos.get_mut(&id).ok_or(Error::PhotoNotFound)?;
        photo.comments.push(comment);
        photo.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.photos.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserProfile;

    fn user(email: &str) -> UserRecord {
        UserRecord::new("Test".to_string(), email.to_string(), "hash".to_string())
    }

    fn photo_for(owner: &UserProfile, title: &str) -> Photo {
        Photo::new(owner, title.to_string(), format!("{}.jpg", title))
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = MemoryStore::new();
        UserStore::insert(&store, user("a@example.com")).await.unwrap();

        let result = UserStore::insert(&store, user("a@example.com")).await;
        assert!(matches!(result, Err(Error::EmailInUse)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email_and_id() {
        let store = MemoryStore::new();
        let inserted = UserStore::insert(&store, user("b@example.com")).await.unwrap();

        let by_email = store.find_by_email("b@example.com").await.unwrap().unwrap();
        let by_id = UserStore::find_by_id(&store, inserted.id).await.unwrap().unwrap();
        assert_eq!(by_email.id, inserted.id);
        assert_eq!(by_id.email, "b@example.com");
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryStore::new();
        let result = store.update(&user("c@example.com")).await;
        assert!(matches!(result, Err(Error::UserNotFound)));
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let clone = store.clone();
        UserStore::insert(&store, user("d@example.com")).await.unwrap();
        assert_eq!(clone.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_like_is_recorded_once() {
        let store = MemoryStore::new();
        let owner = user("e@example.com").profile();
        let photo = PhotoStore::insert(&store, photo_for(&owner, "praia")).await.unwrap();

        store.add_like(photo.id, owner.id).await.unwrap();
        let again = store.add_like(photo.id, owner.id).await;
        assert!(matches!(again, Err(Error::AlreadyLiked)));

        let stored = PhotoStore::find_by_id(&store, photo.id).await.unwrap().unwrap();
        assert_eq!(stored.likes, vec![owner.id]);
    }

    #[tokio::test]
    async fn test_like_missing_photo() {
        let store = MemoryStore::new();
        let result = store.add_like(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::PhotoNotFound)));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let store = MemoryStore::new();
        let ana = user("ana@example.com").profile();
        let bia = user("bia@example.com").profile();

        let mut older = photo_for(&ana, "Praia");
        older.created_at = Utc::now() - chrono::Duration::minutes(5);
        PhotoStore::insert(&store, older).await.unwrap();
        PhotoStore::insert(&store, photo_for(&ana, "Montanha")).await.unwrap();
        PhotoStore::insert(&store, photo_for(&bia, "Praia do Forte")).await.unwrap();

        let all = store.list(PhotoFilter::All).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let ana_photos = store.list(PhotoFilter::Owner(ana.id)).await.unwrap();
        assert_eq!(ana_photos.len(), 2);
        assert_eq!(ana_photos[1].title, "Praia");

        let praia = store
            .list(PhotoFilter::TitleContains("praia".to_string()))
            .await
            .unwrap();
        assert_eq!(praia.len(), 2);
    }

    #[tokio::test]
    async fn test_comments_append_in_order() {
        let store = MemoryStore::new();
        let owner = user("f@example.com").profile();
        let photo = PhotoStore::insert(&store, photo_for(&owner, "lago")).await.unwrap();

        store
            .add_comment(photo.id, Comment::new(&owner, "primeiro".to_string()))
            .await
            .unwrap();
        store
            .add_comment(photo.id, Comment::new(&owner, "segundo".to_string()))
            .await
            .unwrap();

        let stored = PhotoStore::find_by_id(&store, photo.id).await.unwrap().unwrap();
        let texts: Vec<_> = stored.comments.iter().map(|c| c.comment.as_str()).collect();
        assert_eq!(texts, vec!["primeiro", "segundo"]);
    }

    #[tokio::test]
    async fn test_delete_photo() {
        let store = MemoryStore::new();
        let owner = user("g@example.com").profile();
        let photo = PhotoStore::insert(&store, photo_for(&owner, "rio")).await.unwrap();

        assert!(store.delete(photo.id).await.unwrap());
        assert!(!store.delete(photo.id).await.unwrap());
    }
}
