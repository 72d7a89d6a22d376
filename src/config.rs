use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://automata.db";

/// Upper bound for `JWT_TTL_MINUTES` (one year).
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            Some(raw) => {
                let minutes = raw
                    .parse::<i64>()
                    .with_context(|| format!("JWT_TTL_MINUTES is not a number: {raw}"))?;
                anyhow::ensure!(
                    (1..=MAX_TTL_MINUTES).contains(&minutes),
                    "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
                );
                minutes
            }
            None => 60,
        };
        let jwt = JwtConfig { secret, ttl_minutes };

        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a valid port: {raw}"))?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            jwt,
            host,
            port,
        })
    }
}
