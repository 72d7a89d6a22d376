use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_against_dummy, verify_password},
        repo_types::User,
    },
    error::{ApiError, ApiResult},
};

const SERVER_ERROR: ApiError = ApiError::Internal("Server error");

/// Hashes the password and stores the user; returns the new `user_id`.
pub async fn register_user(db: &SqlitePool, req: &RegisterRequest) -> ApiResult<i64> {
    let hash = hash_password(&req.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        SERVER_ERROR
    })?;

    match User::create(db, &req.username, &req.email, &hash).await {
        Ok(user_id) => Ok(user_id),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(username = %req.username, "username or email already registered");
            Err(ApiError::Conflict)
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err(SERVER_ERROR)
        }
    }
}

/// Checks the credentials and issues a token.
///
/// Unknown email and wrong password both end in [`ApiError::InvalidCredentials`].
pub async fn login_user(
    db: &SqlitePool,
    keys: &JwtKeys,
    req: &LoginRequest,
) -> ApiResult<LoginResponse> {
    let user = match User::find_by_email(db, &req.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            verify_against_dummy(&req.password);
            warn!("login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(SERVER_ERROR);
        }
    };

    let ok = verify_password(&req.password, &user.password).map_err(|e| {
        error!(error = %e, user_id = user.user_id, "verify_password failed");
        SERVER_ERROR
    })?;
    if !ok {
        warn!(user_id = user.user_id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = keys.sign(user.user_id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        SERVER_ERROR
    })?;

    Ok(LoginResponse {
        token,
        user: PublicUser {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
        },
    })
}
