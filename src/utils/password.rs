use crate::api::error::AppError;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

/// One-way hash for stored credentials. Verification is the login system's
/// concern and intentionally has no counterpart here.
pub fn hash(plaintext: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .to_string();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash("hunter2secret").unwrap();
        assert_ne!(hashed, "hunter2secret");
        assert!(hashed.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash("same-input").unwrap();
        let b = hash("same-input").unwrap();
        assert_ne!(a, b);
    }
}
