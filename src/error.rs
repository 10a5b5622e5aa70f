//! Error types for Photogram

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Houve um erro, por favor tente mais tarde.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("E-mail em uso. Por favor utilize outro e-mail.")]
    EmailInUse,

    #[error("Usuário não encontrado.")]
    UserNotFound,

    #[error("Senha inválida.")]
    InvalidPassword,

    #[error("Foto não encontrada.")]
    PhotoNotFound,

    #[error("Você já curtiu a foto.")]
    AlreadyLiked,

    #[error("Você não tem permissão para alterar esta foto.")]
    Forbidden,

    #[error("Acesso negado!")]
    MissingToken,

    #[error("Token inválido.")]
    InvalidToken,

    #[error("Token expirado.")]
    TokenExpired,

    /// Non-success response returned by a remote Photogram API
    #[error("{}", .errors.join(" "))]
    Api { status: u16, errors: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'photogram init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a validation error from a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Validation(vec![message.into()])
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::EmailInUse
            | Error::InvalidPassword
            | Error::AlreadyLiked => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UserNotFound | Error::PhotoNotFound => StatusCode::NOT_FOUND,
            Error::MissingToken | Error::InvalidToken | Error::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages surfaced to the caller in the `errors` array
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Validation(errors) | Error::Api { errors, .. } => errors.clone(),
            _ if self.status().is_server_error() => vec![INTERNAL_MESSAGE.to_string()],
            _ => vec![self.to_string()],
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        (status, Json(json!({ "errors": self.messages() }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Envie os dados em JSON (Content-Type: application/json)."
            }
            JsonRejection::JsonSyntaxError(_) => "Os dados enviados não são um JSON válido.",
            JsonRejection::JsonDataError(_) => "Os dados enviados estão em um formato inválido.",
            _ => "Não foi possível ler os dados enviados.",
        };
        Error::invalid(message)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Other(format!("Background task failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
