//! Photos, likes and comments

pub mod models;
pub mod service;

pub use models::{
    Comment, CommentReceipt, CommentRequest, LikeReceipt, NewPhoto, Photo, PhotoDeleted,
    PhotoUpdated, TitleUpdate,
};
pub use service::PhotoService;
