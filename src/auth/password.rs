use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Salted one-way hash for PINs and passwords. A fresh salt is drawn per
/// call, so hashing the same secret twice yields different strings.
pub fn hash_secret(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Compare a candidate secret against a stored hash. A stored hash that
/// fails to parse counts as a mismatch rather than an error: the caller
/// only ever needs "does this secret open this record".
pub fn verify_secret(plain: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored hash is malformed, treating as mismatch");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let pin = "1234";
        let hash = hash_secret(pin).expect("hashing should succeed");
        assert!(verify_secret(pin, &hash));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let hash = hash_secret("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_secret("wrong-password", &hash));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let a = hash_secret("secret1").expect("hash a");
        let b = hash_secret("secret1").expect("hash b");
        assert_ne!(a, b);
        assert!(verify_secret("secret1", &a));
        assert!(verify_secret("secret1", &b));
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_secret("anything", "not-a-valid-hash"));
        assert!(!verify_secret("anything", ""));
    }
}
