//! Token service - Issues and verifies signed access tokens.
//!
//! Tokens are compact HS256 JWTs carrying the username, role, issue time and
//! expiry. Nothing is stored server side; a token lives until its `exp`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, MAX_JWT_EXPIRATION_MINUTES};
use crate::domain::{AuthenticatedContext, TokenError, UserRole};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued access token.
#[derive(Clone)]
pub struct Token {
    value: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// Bearer tokens are credentials
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Token {
    /// The encoded token, as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

/// Issues and verifies tokens with the secret from [`Config`].
///
/// Keys are derived once at construction and never change afterwards.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify`, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["sub", "iat", "exp"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            validation,
            ttl: Duration::minutes(
                config
                    .jwt_expiration_minutes
                    .clamp(1, MAX_JWT_EXPIRATION_MINUTES),
            ),
        }
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for `username` with `role`, valid from `now`
    /// until `now + ttl`.
    pub fn issue(
        &self,
        username: &str,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<Token, TokenError> {
        let issued_at = truncate_to_seconds(now);
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(Token {
            value,
            issued_at,
            expires_at,
        })
    }

    /// Verify the signature and expiry of `token` as of `now`.
    ///
    /// The token stays valid up to and including its expiry instant.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AuthenticatedContext, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?
            .claims;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenError::Malformed)?;
        if now > expires_at {
            return Err(TokenError::Expired);
        }

        Ok(AuthenticatedContext {
            username: claims.sub,
            role: claims.role,
        })
    }
}

fn truncate_to_seconds(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(now.timestamp(), 0).single().unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn service() -> TokenService {
        TokenService::new(&Config::new(SECRET).unwrap())
    }

    /// Replace one character in the middle of the signature segment.
    fn flip_signature_char(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        let idx = chars.len() / 2;
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        let context = tokens.verify(token.as_str(), now).unwrap();
        assert_eq!(context.username, "alice");
        assert_eq!(context.role, UserRole::User);
    }

    #[test]
    fn test_expiry_uses_ttl() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::Admin, now).unwrap();

        assert_eq!(token.expires_at - token.issued_at, tokens.ttl());
        assert!(token.issued_at <= now);
    }

    #[test]
    fn test_valid_at_expiry_second() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        assert!(tokens.verify(token.as_str(), token.expires_at).is_ok());
    }

    #[test]
    fn test_expired_after_expiry() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        let later = token.expires_at + Duration::seconds(1);
        assert_eq!(tokens.verify(token.as_str(), later), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_within_expiry_second() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        let later = token.expires_at + Duration::milliseconds(500);
        assert_eq!(tokens.verify(token.as_str(), later), Err(TokenError::Expired));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_expiry() {
        let tokens = service();
        let result = tokens.issue("alice", UserRole::User, DateTime::<Utc>::MAX_UTC);

        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    #[test]
    fn test_flipped_signature_rejected() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        let tampered = flip_signature_char(token.as_str());
        assert_eq!(
            tokens.verify(&tampered, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_swapped_payload_rejected() {
        let tokens = service();
        let now = Utc::now();
        let user_token = tokens.issue("alice", UserRole::User, now).unwrap();
        let admin_token = tokens.issue("root", UserRole::Admin, now).unwrap();

        // Admin claims under the user's signature
        let user_parts: Vec<&str> = user_token.as_str().split('.').collect();
        let admin_parts: Vec<&str> = admin_token.as_str().split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert_eq!(
            tokens.verify(&forged, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_other_secret_rejected() {
        let ours = service();
        let theirs =
            TokenService::new(&Config::new("another-secret-key-also-32-characters!").unwrap());
        let now = Utc::now();
        let token = theirs.issue("alice", UserRole::Admin, now).unwrap();

        assert_eq!(
            ours.verify(token.as_str(), now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        let now = Utc::now();

        for garbage in ["", "not-a-token", "a.b", "a.b.c", "...."] {
            assert_eq!(
                tokens.verify(garbage, now),
                Err(TokenError::Malformed),
                "input: {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_custom_ttl() {
        let config = Config::new(SECRET).unwrap().with_jwt_expiration_minutes(1);
        let tokens = TokenService::new(&config);
        let now = Utc::now();
        let token = tokens.issue("alice", UserRole::User, now).unwrap();

        assert!(tokens
            .verify(token.as_str(), now + Duration::seconds(30))
            .is_ok());
        assert_eq!(
            tokens.verify(token.as_str(), now + Duration::seconds(61)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = service().issue("alice", UserRole::User, Utc::now()).unwrap();
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }
}
