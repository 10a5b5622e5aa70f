//! Photogram - share photos, likes and comments
//!
//! This is the library interface for Photogram: the REST API server, the
//! services and stores behind it, and the client used by the CLI.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod photos;
pub mod store;
pub mod users;

pub use config::Config;
pub use error::Error;
