//! Password value object - Domain layer password handling.
//!
//! Argon2id with a fresh OS-random salt per hash. Hashes are stored in PHC
//! string format, so the salt and parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::PasswordError;

/// Hash a plaintext password with a random salt.
pub fn hash(plain_text: &str) -> Result<String, PasswordError> {
    Password::new(plain_text).map(Password::into_string)
}

/// Check a plaintext password against a stored hash.
///
/// Returns `false` for a malformed hash instead of failing.
pub fn verify(plain_text: &str, hash: &str) -> bool {
    Password::from_hash(hash.to_string()).verify(plain_text)
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// Length and content rules are enforced by the caller; any input,
    /// including the empty string, hashes successfully.
    pub fn new(plain_text: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| PasswordError(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// The digest comparison inside `password-hash` is constant time.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "pw1";
        let hashed = hash(plain).unwrap();

        assert!(verify(plain, &hashed));
        assert!(!verify("pw2", &hashed));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let first = hash(plain).unwrap();
        let second = hash(plain).unwrap();

        assert_ne!(first, second);
        assert!(verify(plain, &first));
        assert!(verify(plain, &second));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash("hunter2").unwrap();
        assert!(!hashed.contains("hunter2"));
        assert!(hashed.starts_with("$argon2id$"));
    }

    #[test]
    fn test_empty_password_hashes() {
        let hashed = hash("").unwrap();
        assert!(verify("", &hashed));
        assert!(!verify(" ", &hashed));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        assert!(!verify("anything", ""));
        assert!(!verify("anything", "not-a-phc-string"));
        assert!(!verify("anything", "$argon2id$v=19$m=19456,t=2,p=1$garbage"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret").unwrap();
        assert!(format!("{:?}", password).contains("[REDACTED]"));
    }
}
