//! User accounts

pub mod models;
pub mod service;

pub use models::{ProfileUpdate, UserProfile, UserRecord};
pub use service::{parse_user_id, UserService};
