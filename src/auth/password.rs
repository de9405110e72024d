use thiserror::Error;

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password must be at least 6 characters long.")]
    TooShort,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Reject passwords that fail the length policy.
pub fn check_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

/// Salted bcrypt hash at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Compare a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_minimum_length() {
        assert!(matches!(check_strength("12345"), Err(PasswordError::TooShort)));
        assert!(check_strength("123456").is_ok());
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("secret1", 4).unwrap();
        let second = hash_password("secret1", 4).unwrap();

        assert_ne!(first, "secret1");
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
        assert!(!verify_password("secret2", &first));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("secret1", "not-a-bcrypt-hash"));
    }
}
