//! Authentication and session management

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, TokenIssuer};
pub use middleware::{bearer_token, CurrentUser};
pub use models::{AuthSession, LoginRequest, RegisterRequest};
pub use password::PasswordHasher;
pub use service::AuthService;
