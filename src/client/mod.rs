//! Command-line client for a running Photogram API

pub mod api;
pub mod photo_view;
pub mod session;

pub use api::ApiClient;
pub use photo_view::{Action, PhotoView, PhotoViewState};
pub use session::SessionStore;
