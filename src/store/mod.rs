//! Persistence for users and photos
//!
//! Services only talk to the [`UserStore`] and [`PhotoStore`] traits. The
//! in-memory backend serves development and tests; the PostgreSQL backend
//! is selected with `[database] backend = "postgres"`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::error::{Error, Result};
use crate::photos::{Comment, Photo};
use crate::users::UserRecord;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Insert a new account. Fails with [`Error::EmailInUse`] when the email
    /// is already taken; the check and the write are a single atomic step.
    async fn insert(&self, user: UserRecord) -> Result<UserRecord>;

    /// Overwrite the mutable fields of an existing account
    async fn update(&self, user: &UserRecord) -> Result<()>;

    async fn count(&self) -> Result<usize>;
}

/// Which photos a listing returns. Listings are always newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoFilter {
    All,
    Owner(Uuid),
    TitleContains(String),
}

impl PhotoFilter {
    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            PhotoFilter::All => true,
            PhotoFilter::Owner(owner) => photo.is_owned_by(*owner),
            PhotoFilter::TitleContains(query) => photo.title_matches(query),
        }
    }
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn insert(&self, photo: Photo) -> Result<Photo>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Photo>>;

    async fn list(&self, filter: PhotoFilter) -> Result<Vec<Photo>>;

    async fn update_title(&self, id: Uuid, title: &str) -> Result<Photo>;

    /// Record a like. Fails with [`Error::AlreadyLiked`] if `user_id` already
    /// liked the photo, [`Error::PhotoNotFound`] if it does not exist.
    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<()>;

    async fn add_comment(&self, id: Uuid, comment: Comment) -> Result<()>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// The pair of stores the services are built on
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub photos: Arc<dyn PhotoStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            photos: Arc::new(store),
        }
    }

    /// Open the backend named in the configuration
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory store, data is lost on restart");
                Ok(Self::in_memory())
            }
            DatabaseBackend::Postgres => {
                let url = config.url.as_deref().ok_or_else(|| {
                    Error::Config("database.url is required for the postgres backend".to_string())
                })?;
                let store = PostgresStore::connect(url).await?;
                store.migrate().await?;
                Ok(Self {
                    users: Arc::new(store.clone()),
                    photos: Arc::new(store),
                })
            }
        }
    }
}
