use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claims carried by a signed token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The username the token was issued for.
    pub username: String,
}

/// Issues and verifies HS256-signed tokens.
///
/// The signing secret is supplied once at construction, from configuration,
/// and held as prepared keys. Verification is a pure signature check and
/// touches no storage.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenManager {
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issued tokens carry no expiry claim, so the default exp
        // requirement must be switched off for verification to succeed.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Produces a signed token encoding the given username.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Checks the signature and decodes the claims. Malformed, unsigned,
    /// and tampered tokens all fail the same way.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let tokens = TokenManager::from_secret("test_secret_for_round_trip");

        let token = tokens.issue("alice@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.username, "alice@example.com");
    }

    #[test]
    fn test_token_identifies_exactly_one_user() {
        let tokens = TokenManager::from_secret("test_secret");

        let for_alice = tokens.issue("alice@example.com").unwrap();
        let for_bob = tokens.issue("bob@example.com").unwrap();

        assert_eq!(tokens.verify(&for_alice).unwrap().username, "alice@example.com");
        assert_eq!(tokens.verify(&for_bob).unwrap().username, "bob@example.com");
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let tokens = TokenManager::from_secret("test_secret");

        let token = tokens.issue("alice@example.com").unwrap();
        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            tokens.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = TokenManager::from_secret("one_secret");
        let verifier = TokenManager::from_secret("a_completely_different_secret");

        let token = issuer.issue("alice@example.com").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let tokens = TokenManager::from_secret("test_secret");

        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(tokens.verify(""), Err(AppError::InvalidToken)));
    }
}
