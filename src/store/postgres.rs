//! PostgreSQL store

use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::Json;
use tokio_postgres::{Client, NoTls, Row};
use uuid::Uuid;

use super::{PhotoFilter, PhotoStore, UserStore};
use crate::error::{Error, Result};
use crate::photos::{Comment, Photo};
use crate::users::UserRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    profile_image TEXT,
    bio           TEXT,
    created_at    TIMESTAMPTZ NOT NULL,
    updated_at    TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS photos (
    id         UUID PRIMARY KEY,
    user_id    UUID NOT NULL REFERENCES users(id),
    user_name  TEXT NOT NULL,
    image      TEXT NOT NULL,
    title      TEXT NOT NULL,
    likes      UUID[] NOT NULL DEFAULT '{}',
    comments   JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
"#;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, profile_image, bio, created_at, updated_at";

const PHOTO_COLUMNS: &str =
    "id, user_id, user_name, image, title, likes, comments, created_at, updated_at";

/// Users and photos in PostgreSQL. Clones share one connection.
#[derive(Clone)]
pub struct PostgresStore {
    client: Arc<Client>,
}

impl PostgresStore {
    /// Connect using a libpq-style connection string
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!("Connected to PostgreSQL");

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create the tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        self.client.batch_execute(SCHEMA).await?;
        tracing::debug!("Database schema is up to date");
        Ok(())
    }

    async fn photo_exists(&self, id: Uuid) -> Result<bool> {
        let row = self
            .client
            .query_one("SELECT EXISTS(SELECT 1 FROM photos WHERE id = $1)", &[&id])
            .await?;
        Ok(row.get(0))
    }
}

fn user_from_row(row: &Row) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        profile_image: row.try_get("profile_image")?,
        bio: row.try_get("bio")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn photo_from_row(row: &Row) -> Result<Photo> {
    let comments: Json<Vec<Comment>> = row.try_get("comments")?;
    Ok(Photo {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        user_name: row.try_get("user_name")?,
        image: row.try_get("image")?,
        title: row.try_get("title")?,
        likes: row.try_get("likes")?,
        comments: comments.0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Escape LIKE wildcards so the query is matched literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        self.client
            .query_opt(&query, &[&id])
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        self.client
            .query_opt(&query, &[&email])
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn insert(&self, user: UserRecord) -> Result<UserRecord> {
        let query = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            USER_COLUMNS
        );
        self.client
            .execute(
                &query,
                &[
                    &user.id,
                    &user.name,
                    &user.email,
                    &user.password_hash,
                    &user.profile_image,
                    &user.bio,
                    &user.created_at,
                    &user.updated_at,
                ],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    Error::EmailInUse
                } else {
                    Error::Database(e)
                }
            })?;
        Ok(user)
    }

    async fn update(&self, user: &UserRecord) -> Result<()> {
        let updated = self
            .client
            .execute(
                "UPDATE users SET name = $2, password_hash = $3, profile_image = $4, bio = $5, \
                 updated_at = $6 WHERE id = $1",
                &[
                    &user.id,
                    &user.name,
                    &user.password_hash,
                    &user.profile_image,
                    &user.bio,
                    &user.updated_at,
                ],
            )
            .await?;

        if updated == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let row = self
            .client
            .query_one("SELECT COUNT(*) FROM users", &[])
            .await?;
        let count: i64 = row.get(0);
        Ok(count as usize)
    }
}

#[async_trait]
impl PhotoStore for PostgresStore {
    async fn insert(&self, photo: Photo) -> Result<Photo> {
        let query = format!(
            "INSERT INTO photos ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            PHOTO_COLUMNS
        );
        self.client
            .execute(
                &query,
                &[
                    &photo.id,
                    &photo.user_id,
                    &photo.user_name,
                    &photo.image,
                    &photo.title,
                    &photo.likes,
                    &Json(&photo.comments),
                    &photo.created_at,
                    &photo.updated_at,
                ],
            )
            .await?;
        Ok(photo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>> {
        let query = format!("SELECT {} FROM photos WHERE id = $1", PHOTO_COLUMNS);
        self.client
            .query_opt(&query, &[&id])
            .await?
            .as_ref()
            .map(photo_from_row)
            .transpose()
    }

    async fn list(&self, filter: PhotoFilter) -> Result<Vec<Photo>> {
        let rows = match &filter {
            PhotoFilter::All => {
                let query = format!(
                    "SELECT {} FROM photos ORDER BY created_at DESC",
                    PHOTO_COLUMNS
                );
                self.client.query(&query, &[]).await?
            }
            PhotoFilter::Owner(owner) => {
                let query = format!(
                    "SELECT {} FROM photos WHERE user_id = $1 ORDER BY created_at DESC",
                    PHOTO_COLUMNS
                );
                self.client.query(&query, &[owner]).await?
            }
            PhotoFilter::TitleContains(text) => {
                let query = format!(
                    "SELECT {} FROM photos WHERE title ILIKE $1 ORDER BY created_at DESC",
                    PHOTO_COLUMNS
                );
                self.client.query(&query, &[&like_pattern(text)]).await?
            }
        };

        rows.iter().map(photo_from_row).collect()
    }

    async fn update_title(&self, id: Uuid, title: &str) -> Result<Photo> {
        let query = format!(
            "UPDATE photos SET title = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            PHOTO_COLUMNS
        );
        let row = self
            .client
            .query_opt(&query, &[&id, &title])
            .await?
            .ok_or(Error::PhotoNotFound)?;
        photo_from_row(&row)
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        let updated = self
            .client
            .execute(
                "UPDATE photos SET likes = array_append(likes, $2::uuid), updated_at = now() \
                 WHERE id = $1 AND NOT ($2::uuid = ANY(likes))",
                &[&id, &user_id],
            )
            .await?;

        if updated > 0 {
            return Ok(());
        }
        if self.photo_exists(id).await? {
            Err(Error::AlreadyLiked)
        } else {
            Err(Error::PhotoNotFound)
        }
    }

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<()> {
        let updated = self
            .client
            .execute(
                "UPDATE photos SET comments = comments || $2::jsonb, updated_at = now() \
                 WHERE id = $1",
                &[&id, &Json(vec![comment])],
            )
            .await?;

        if updated == 0 {
            return Err(Error::PhotoNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self
            .client
            .execute("DELETE FROM photos WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("sol"), "%sol%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
