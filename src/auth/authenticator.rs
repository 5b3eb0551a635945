use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{Claims, TokenManager};
use crate::auth::Credentials;
use crate::error::AppError;
use crate::models::User;
use crate::store::CredentialStore;
use lazy_static::lazy_static;

lazy_static! {
    // Verified against when a signin names an unknown username, so that
    // path costs one bcrypt run exactly like the known-username path.
    static ref GUARD_HASH: String =
        bcrypt::hash("guard", bcrypt::DEFAULT_COST).expect("guard hash");
}

/// Signup, signin, and claims-to-identity resolution over an injected
/// credential store.
#[derive(Clone)]
pub struct Authenticator<S> {
    users: S,
    tokens: TokenManager,
}

impl<S: CredentialStore> Authenticator<S> {
    pub fn new(users: S, tokens: TokenManager) -> Self {
        Self { users, tokens }
    }

    /// Hashes the password and stores the new identity. A taken username
    /// surfaces as `DuplicateUsername`, straight from the store.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User, AppError> {
        let password_hash = hash_password(&credentials.password)?;
        self.users
            .create_user(&credentials.username, &password_hash)
            .await
    }

    /// Verifies the credentials and issues a token carrying the username.
    ///
    /// Unknown usernames and wrong passwords fail identically: same error,
    /// same message, and one bcrypt verification either way.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<String, AppError> {
        let user = self.users.find_by_username(&credentials.username).await?;

        let candidate_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or_else(|| GUARD_HASH.as_str());
        let password_ok = verify_password(&credentials.password, candidate_hash)?;

        match user {
            Some(user) if password_ok => self.tokens.issue(&user.username),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    /// Turns verified claims back into the stored identity. Fails with
    /// `Unauthenticated` when the claimed user no longer exists.
    pub async fn resolve_identity(&self, claims: &Claims) -> Result<User, AppError> {
        self.users
            .find_by_username(&claims.username)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}
