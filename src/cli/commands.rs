//! CLI command implementations

use anyhow::Result;
use serde::Serialize;
use std::fs;

use crate::api;
use crate::auth::{LoginRequest, RegisterRequest};
use crate::cli::{
    error, info, print_photo_table, print_photo_view, print_user, success, warn, OutputFormat,
    PhotoAction,
};
use crate::client::{ApiClient, PhotoView, SessionStore};
use crate::config;
use crate::photos::{NewPhoto, Photo, TitleUpdate};
use crate::users::ProfileUpdate;

/// Initialize a new photogram.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("photogram.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created photogram.toml");
    info("Set JWT_SECRET (or edit [auth] jwt_secret) and run 'photogram serve'");

    Ok(())
}

/// Start the API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = config::load_config_or_default()?;

    if config.auth.jwt_secret.is_empty() {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
    }

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server on {}:{}", host, port));
    api::run_server(config, &host, port).await?;
    Ok(())
}

fn load_client() -> Result<ApiClient> {
    let config = config::load_config_or_default()?;
    let sessions = SessionStore::new(config.client.session_file);
    Ok(ApiClient::new(config.client.api_url, sessions)?)
}

fn print_formatted<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Table => table(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

/// Report a failed API call and pass the error on
fn failed(context: &str, e: crate::error::Error) -> anyhow::Error {
    error(&format!("{}: {}", context, e));
    e.into()
}

pub async fn register(name: &str, email: &str, password: &str) -> Result<()> {
    let mut client = load_client()?;

    let session = client
        .register(&RegisterRequest::new(name, email, password))
        .await
        .map_err(|e| failed("Registration failed", e))?;

    success(&format!("Registered and logged in as {}", session.id));
    Ok(())
}

pub async fn login(email: &str, password: &str) -> Result<()> {
    let mut client = load_client()?;

    let session = client
        .login(&LoginRequest::new(email, password))
        .await
        .map_err(|e| failed("Login failed", e))?;

    success(&format!("Logged in as {}", session.id));
    Ok(())
}

pub async fn logout() -> Result<()> {
    let mut client = load_client()?;

    if client.session().is_none() {
        info("Not logged in");
        return Ok(());
    }

    client.logout()?;
    success(&format!("Logged out, removed {}", client.session_file().display()));
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let client = load_client()?;

    if client.session().is_none() {
        warn("Not logged in. Run 'photogram login' first.");
        return Ok(());
    }

    let user = client
        .current_user()
        .await
        .map_err(|e| failed("Could not load the current user", e))?;
    print_user(&user);
    Ok(())
}

pub async fn profile(update: ProfileUpdate) -> Result<()> {
    let client = load_client()?;

    let user = client
        .update_profile(&update)
        .await
        .map_err(|e| failed("Profile update failed", e))?;

    success("Profile updated");
    print_user(&user);
    Ok(())
}

pub async fn user(id: &str, format: OutputFormat) -> Result<()> {
    let client = load_client()?;

    let user = client
        .user(id)
        .await
        .map_err(|e| failed("Could not load user", e))?;
    print_formatted(&user, format, print_user)
}

pub async fn photo(action: PhotoAction) -> Result<()> {
    let client = load_client()?;

    match action {
        PhotoAction::Show { id } => {
            let mut view = PhotoView::new(&client);
            view.open(&id).await;
            print_photo_view(view.state());
        }
        PhotoAction::List { user, format } => {
            let photos = match user {
                Some(user) => client.user_photos(&user).await,
                None => client.photos().await,
            }
            .map_err(|e| failed("Could not list photos", e))?;
            print_photos(&photos, format)?;
        }
        PhotoAction::Search { query, format } => {
            let photos = client
                .search_photos(&query)
                .await
                .map_err(|e| failed("Search failed", e))?;
            print_photos(&photos, format)?;
        }
        PhotoAction::Post { title, image } => {
            let photo = client
                .post_photo(&NewPhoto {
                    title: Some(title),
                    image: Some(image),
                })
                .await
                .map_err(|e| failed("Could not post photo", e))?;
            success(&format!("Posted photo {}", photo.id));
        }
        PhotoAction::Rename { id, title } => {
            let updated = client
                .update_photo(&id, &TitleUpdate { title: Some(title) })
                .await
                .map_err(|e| failed("Could not update photo", e))?;
            success(&updated.message);
        }
        PhotoAction::Delete { id } => {
            let deleted = client
                .delete_photo(&id)
                .await
                .map_err(|e| failed("Could not delete photo", e))?;
            success(&deleted.message);
        }
        PhotoAction::Like { id } => {
            let mut view = PhotoView::new(&client);
            view.open(&id).await;
            view.like().await;
            print_photo_view(view.state());
        }
        PhotoAction::Comment { id, text } => {
            let mut view = PhotoView::new(&client);
            view.open(&id).await;
            view.comment(&text).await;
            print_photo_view(view.state());
        }
    }

    Ok(())
}

fn print_photos(photos: &[Photo], format: OutputFormat) -> Result<()> {
    print_formatted(photos, format, print_photo_table)
}
