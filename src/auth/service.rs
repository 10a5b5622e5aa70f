//! Registration, login and session verification

use regex::Regex;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use crate::auth::jwt::TokenIssuer;
use crate::auth::models::{AuthSession, LoginRequest, RegisterRequest};
use crate::auth::password::PasswordHasher;
use crate::error::{Error, Result};
use crate::store::UserStore;
use crate::users::{UserProfile, UserRecord};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

/// Lower-cased, trimmed form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

struct Registration {
    name: String,
    email: String,
    password: String,
}

fn validate_registration(req: RegisterRequest) -> Result<Registration> {
    let mut errors = Vec::new();

    let name = req.name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        errors.push("O nome é obrigatório.".to_string());
    }

    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    if email.is_empty() {
        errors.push("O e-mail é obrigatório.".to_string());
    } else if !is_valid_email(&email) {
        errors.push("Insira um e-mail válido.".to_string());
    }

    let password = req.password.unwrap_or_default();
    if password.is_empty() {
        errors.push("A senha é obrigatória.".to_string());
    }

    if let Some(confirm) = req.confirm_password {
        if confirm != password {
            errors.push("As senhas precisam ser iguais.".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    Ok(Registration {
        name,
        email,
        password,
    })
}

fn validate_login(req: LoginRequest) -> Result<(String, String)> {
    let mut errors = Vec::new();

    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    if email.is_empty() {
        errors.push("O e-mail é obrigatório.".to_string());
    }

    let password = req.password.unwrap_or_default();
    if password.is_empty() {
        errors.push("A senha é obrigatória.".to_string());
    }

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }
    Ok((email, password))
}

/// Turns credentials into session tokens and tokens back into users.
///
/// Every operation returns a `Result`; a rejected registration or login
/// never reaches the token-issuing step.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Create an account and sign it in
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthSession> {
        let registration = validate_registration(req)?;

        if self.users.find_by_email(&registration.email).await?.is_some() {
            tracing::info!("Registration rejected, e-mail already in use");
            return Err(Error::EmailInUse);
        }

        let password_hash = self.hasher.hash(&registration.password).await?;
        let user = self
            .users
            .insert(UserRecord::new(
                registration.name,
                registration.email,
                password_hash,
            ))
            .await?;

        let token = self.tokens.issue(user.id)?;
        tracing::info!("Registered user {}", user.id);

        Ok(AuthSession {
            id: user.id,
            profile_image: user.profile_image,
            token,
        })
    }

    /// Sign in with e-mail and password
    pub async fn login(&self, req: LoginRequest) -> Result<AuthSession> {
        let (email, password) = validate_login(req)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(Error::UserNotFound)?;

        if !self.hasher.verify(&password, &user.password_hash).await? {
            tracing::info!("Login rejected for user {}: wrong password", user.id);
            return Err(Error::InvalidPassword);
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!("User {} logged in", user.id);

        Ok(AuthSession {
            id: user.id,
            profile_image: user.profile_image,
            token,
        })
    }

    /// Check a token's signature and expiry and return the user id it carries
    pub fn verify_session(&self, token: &str) -> Result<Uuid> {
        Ok(self.tokens.verify(token)?.id)
    }

    /// Resolve a token to the account it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<UserProfile> {
        let user_id = self.verify_session(token)?;
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user.profile()),
            None => {
                tracing::warn!("Valid token for unknown user {}", user_id);
                Err(Error::InvalidToken)
            }
        }
    }
}
