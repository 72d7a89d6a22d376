use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
mod repo;
pub mod repo_types;
pub mod services;

pub use claims::Claims;
pub use dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse};
pub use extractors::AuthUser;
pub use jwt::{JwtKeys, TokenError};

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
