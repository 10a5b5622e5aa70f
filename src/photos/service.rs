//! Photo posting, likes and comments

use std::sync::Arc;
use uuid::Uuid;

use super::models::{
    Comment, CommentReceipt, CommentRequest, LikeReceipt, NewPhoto, Photo, PhotoDeleted,
    PhotoUpdated, TitleUpdate,
};
use crate::error::{Error, Result};
use crate::store::{PhotoFilter, PhotoStore};
use crate::users::{parse_user_id, UserProfile};

fn parse_photo_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::PhotoNotFound)
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct PhotoService {
    photos: Arc<dyn PhotoStore>,
}

impl PhotoService {
    pub fn new(photos: Arc<dyn PhotoStore>) -> Self {
        Self { photos }
    }

    pub async fn insert(&self, owner: &UserProfile, req: NewPhoto) -> Result<Photo> {
        let title = required(req.title);
        let image = required(req.image);

        let (title, image) = match (title, image) {
            (Some(title), Some(image)) => (title, image),
            (title, image) => {
                let mut errors = Vec::new();
                if title.is_none() {
                    errors.push("O título é obrigatório.".to_string());
                }
                if image.is_none() {
                    errors.push("A imagem é obrigatória.".to_string());
                }
                return Err(Error::Validation(errors));
            }
        };

        let photo = self.photos.insert(Photo::new(owner, title, image)).await?;
        tracing::info!("User {} posted photo {}", owner.id, photo.id);
        Ok(photo)
    }

    /// Fetch a photo the caller owns, or explain why not
    async fn owned(&self, user: &UserProfile, raw_id: &str) -> Result<Photo> {
        let photo = self.get(raw_id).await?;
        if !photo.is_owned_by(user.id) {
            tracing::warn!("User {} tried to modify photo {}", user.id, photo.id);
            return Err(Error::Forbidden);
        }
        Ok(photo)
    }

    pub async fn delete(&self, user: &UserProfile, raw_id: &str) -> Result<PhotoDeleted> {
        let photo = self.owned(user, raw_id).await?;
        if !self.photos.delete(photo.id).await? {
            return Err(Error::PhotoNotFound);
        }

        tracing::info!("User {} deleted photo {}", user.id, photo.id);
        Ok(PhotoDeleted {
            id: photo.id,
            message: "Foto excluída com sucesso.".to_string(),
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Photo>> {
        self.photos.list(PhotoFilter::All).await
    }

    pub async fn list_by_user(&self, raw_user_id: &str) -> Result<Vec<Photo>> {
        let owner = parse_user_id(raw_user_id)?;
        self.photos.list(PhotoFilter::Owner(owner)).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Photo>> {
        self.photos
            .list(PhotoFilter::TitleContains(query.trim().to_string()))
            .await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Photo> {
        let id = parse_photo_id(raw_id)?;
        self.photos.find_by_id(id).await?.ok_or(Error::PhotoNotFound)
    }

    /// Rename a photo. An empty title leaves it unchanged.
    pub async fn update_title(
        &self,
        user: &UserProfile,
        raw_id: &str,
        req: TitleUpdate,
    ) -> Result<PhotoUpdated> {
        let photo = self.owned(user, raw_id).await?;

        let photo = match required(req.title) {
            Some(title) => self.photos.update_title(photo.id, &title).await?,
            None => photo,
        };

        Ok(PhotoUpdated {
            photo,
            message: "Foto atualizada com sucesso!".to_string(),
        })
    }

    pub async fn like(&self, user: &UserProfile, raw_id: &str) -> Result<LikeReceipt> {
        let id = parse_photo_id(raw_id)?;
        self.photos.add_like(id, user.id).await?;

        Ok(LikeReceipt {
            photo_id: id,
            user_id: user.id,
            message: "A foto foi curtida.".to_string(),
        })
    }

    pub async fn comment(
        &self,
        user: &UserProfile,
        raw_id: &str,
        req: CommentRequest,
    ) -> Result<CommentReceipt> {
        let id = parse_photo_id(raw_id)?;
        let text =
            required(req.comment).ok_or_else(|| Error::invalid("O comentário é obrigatório."))?;

        let comment = Comment::new(user, text);
        self.photos.add_comment(id, comment.clone()).await?;

        Ok(CommentReceipt {
            photo_id: id,
            comment,
            message: "O comentário foi adicionado com sucesso!".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::users::UserRecord;

    fn user(name: &str) -> UserProfile {
        UserRecord::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".to_string(),
        )
        .profile()
    }

    fn service() -> PhotoService {
        PhotoService::new(Arc::new(MemoryStore::new()))
    }

    fn new_photo(title: &str) -> NewPhoto {
        NewPhoto {
            title: Some(title.to_string()),
            image: Some(format!("{}.jpg", title)),
        }
    }

    #[tokio::test]
    async fn test_insert_requires_title_and_image() {
        let result = service().insert(&user("Ana"), NewPhoto::default()).await;
        match result {
            Err(Error::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_not_found() {
        let result = service().get("xyz").await;
        assert!(matches!(result, Err(Error::PhotoNotFound)));
    }

    #[tokio::test]
    async fn test_only_owner_can_delete() {
        let service = service();
        let ana = user("Ana");
        let bia = user("Bia");
        let photo = service.insert(&ana, new_photo("praia")).await.unwrap();

        let result = service.delete(&bia, &photo.id.to_string()).await;
        assert!(matches!(result, Err(Error::Forbidden)));

        let deleted = service.delete(&ana, &photo.id.to_string()).await.unwrap();
        assert_eq!(deleted.id, photo.id);
        assert!(matches!(
            service.get(&photo.id.to_string()).await,
            Err(Error::PhotoNotFound)
        ));
    }

    #[tokio::test]
    async fn test_empty_title_update_keeps_title() {
        let service = service();
        let ana = user("Ana");
        let photo = service.insert(&ana, new_photo("praia")).await.unwrap();

        let updated = service
            .update_title(&ana, &photo.id.to_string(), TitleUpdate { title: None })
            .await
            .unwrap();
        assert_eq!(updated.photo.title, "praia");

        let updated = service
            .update_title(
                &ana,
                &photo.id.to_string(),
                TitleUpdate {
                    title: Some("Praia ao entardecer".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.photo.title, "Praia ao entardecer");
    }

    #[tokio::test]
    async fn test_like_twice() {
        let service = service();
        let ana = user("Ana");
        let photo = service.insert(&ana, new_photo("praia")).await.unwrap();
        let id = photo.id.to_string();

        let receipt = service.like(&ana, &id).await.unwrap();
        assert_eq!(receipt.photo_id, photo.id);
        assert_eq!(receipt.user_id, ana.id);
        assert!(matches!(
            service.like(&ana, &id).await,
            Err(Error::AlreadyLiked)
        ));
    }

    #[tokio::test]
    async fn test_comment_snapshots_author() {
        let service = service();
        let ana = user("Ana");
        let bia = user("Bia");
        let photo = service.insert(&ana, new_photo("praia")).await.unwrap();
        let id = photo.id.to_string();

        let receipt = service
            .comment(
                &bia,
                &id,
                CommentRequest {
                    comment: Some("Que linda!".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.comment.user_name, "Bia");
        assert_eq!(receipt.comment.user_id, bia.id);

        let blank = service
            .comment(&bia, &id, CommentRequest { comment: None })
            .await;
        assert!(matches!(blank, Err(Error::Validation(_))));

        let stored = service.get(&id).await.unwrap();
        assert_eq!(stored.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_malformed_user_id() {
        let result = service().list_by_user("abc").await;
        assert!(matches!(result, Err(Error::UserNotFound)));
    }
}
