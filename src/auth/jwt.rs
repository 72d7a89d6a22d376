use std::time::Duration;

use anyhow::Context;
use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::state::AppState;

/// Why a token was refused. Only ever logged; callers see a plain 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::Invalid(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        let minutes = u64::try_from(jwt.ttl_minutes).unwrap_or(0);
        Self::new(&jwt.secret, Duration::from_secs(minutes.saturating_mul(60)))
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn sign(&self, user_id: i64, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = i64::try_from(self.ttl.as_secs()).context("token ttl out of range")?;
        let exp = now
            .checked_add(TimeDuration::seconds(ttl))
            .context("token expiry out of range")?;
        let claims = Claims {
            user_id,
            email: email.to_owned(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.user_id, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, Duration::from_secs(3600))
    }

    fn now() -> usize {
        OffsetDateTime::now_utc().unix_timestamp() as usize
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(1, "alice@x.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "alice@x.com");
    }

    #[test]
    fn token_expires_one_ttl_after_issue() {
        let keys = make_keys("dev-secret");
        let claims = keys.verify(&keys.sign(7, "a@x.com").unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn state_keys_use_configured_secret_and_ttl() {
        let config = crate::config::AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt: crate::config::JwtConfig {
                secret: "from-config".into(),
                ttl_minutes: 5,
            },
            host: "127.0.0.1".into(),
            port: 0,
        };
        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .expect("lazy pool");
        let state = AppState::from_parts(db, std::sync::Arc::new(config));

        let keys = JwtKeys::from_ref(&state);
        assert_eq!(keys.ttl, Duration::from_secs(300));
        let token = keys.sign(3, "c@x.com").unwrap();
        assert!(make_keys("from-config").verify(&token).is_ok());
    }

    #[tokio::test]
    async fn oversized_ttl_fails_to_sign_instead_of_panicking() {
        let mut state = AppState::fake().await;
        let mut config = (*state.config).clone();
        config.jwt.ttl_minutes = i64::MAX;
        state.config = std::sync::Arc::new(config);

        let keys = JwtKeys::from_ref(&state);
        assert_eq!(keys.ttl, Duration::from_secs(u64::MAX));
        assert!(keys.sign(1, "a@x.com").is_err());

        let keys = JwtKeys::new("dev-secret", Duration::from_secs(i64::MAX as u64));
        assert!(keys.sign(1, "a@x.com").is_err());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = make_keys("one-secret").sign(1, "a@x.com").unwrap();
        let err = make_keys("another-secret").verify(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn rejects_expired_token() {
        let keys = make_keys("dev-secret");
        let claims = Claims {
            user_id: 1,
            email: "a@x.com".into(),
            iat: now() - 7200,
            exp: now() - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn rejects_garbage() {
        let keys = make_keys("dev-secret");
        assert_eq!(keys.verify("not-a-jwt").unwrap_err(), TokenError::Malformed);
        assert!(keys.verify("").is_err());
    }
}
