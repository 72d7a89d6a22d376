use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Verified against when the email is unknown so both login failures cost one hash check.
    static ref DUMMY_HASH: Option<String> = hash_password("automata-login-dummy").ok();
}

/// Argon2id PHC string with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "could not hash registration password");
            anyhow!("password hashing failed: {e}")
        })
}

/// `Ok(false)` on mismatch; `Err` only when the stored `users.password` is not a PHC string.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is unreadable");
        anyhow!("stored password hash is unreadable: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Burns one verification for a login whose email matched nobody.
pub fn verify_against_dummy(plain: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_password_verifies_and_others_do_not() {
        let stored = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &stored).unwrap());
        assert!(!verify_password("pw124", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn plaintext_in_the_password_column_is_an_error() {
        let err = verify_password("pw123", "pw123").unwrap_err();
        assert!(err.to_string().contains("unreadable"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("pw123"));
    }

    #[test]
    fn dummy_hash_never_matches_user_input() {
        let dummy = DUMMY_HASH.as_deref().expect("dummy hash");
        assert!(!verify_password("pw123", dummy).unwrap());
        verify_against_dummy("pw123");
    }
}
