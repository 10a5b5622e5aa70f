//! Photo documents, comments and the request/response bodies around them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::UserProfile;

/// A comment with a snapshot of its author taken when it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,
    pub user_id: Uuid,
}

impl Comment {
    pub fn new(author: &UserProfile, text: String) -> Self {
        Self {
            comment: text,
            user_name: author.name.clone(),
            user_image: author.profile_image.clone(),
            user_id: author.id,
        }
    }
}

/// A posted photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub image: String,
    pub title: String,
    /// Ids of users who liked the photo, in like order, no duplicates
    #[serde(default)]
    pub likes: Vec<Uuid>,
    /// Append-only
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(owner: &UserProfile, title: String, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            image,
            title,
            likes: Vec::new(),
            comments: Vec::new(),
            user_id: owner.id,
            user_name: owner.name.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.contains(&user_id)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Case-insensitive title match
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Body of `POST /photos`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPhoto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of `PUT /photos/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleUpdate {
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `PUT /photos/comment/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeReceipt {
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReceipt {
    pub photo_id: Uuid,
    pub comment: Comment,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUpdated {
    pub photo: Photo,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoDeleted {
    pub id: Uuid,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserRecord;

    fn owner() -> UserProfile {
        UserRecord::new("Bia".to_string(), "bia@example.com".to_string(), "h".to_string())
            .profile()
    }

    #[test]
    fn test_new_photo_snapshots_owner() {
        let owner = owner();
        let photo = Photo::new(&owner, "Praia".to_string(), "praia.jpg".to_string());

        assert_eq!(photo.user_id, owner.id);
        assert_eq!(photo.user_name, "Bia");
        assert!(photo.likes.is_empty());
        assert!(photo.comments.is_empty());
        assert!(photo.is_owned_by(owner.id));
    }

    #[test]
    fn test_title_matches_ignores_case() {
        let photo = Photo::new(&owner(), "Pôr do Sol".to_string(), "sol.jpg".to_string());
        assert!(photo.title_matches("sol"));
        assert!(photo.title_matches("PÔR"));
        assert!(!photo.title_matches("lua"));
    }

    #[test]
    fn test_photo_json_shape() {
        let photo = Photo::new(&owner(), "Praia".to_string(), "praia.jpg".to_string());
        let json = serde_json::to_value(&photo).unwrap();

        assert_eq!(json["_id"], photo.id.to_string());
        assert_eq!(json["userName"], "Bia");
        assert!(json["likes"].as_array().unwrap().is_empty());
    }
}
