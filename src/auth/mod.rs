pub mod authenticator;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use authenticator::Authenticator;
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenManager};

/// Signup and signin share one credential shape: an email-shaped username
/// and a password meeting the strength policy.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    /// The account name. Must be shaped like an email address.
    #[validate(email)]
    pub username: String,
    /// Must be at least 6 characters and contain an uppercase letter, a
    /// lowercase letter, and a digit or symbol.
    #[validate(length(min = 6), custom = "validate_password_strength")]
    pub password: String,
}

/// Response after a successful signin.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed bearer token for subsequent requests.
    pub access_token: String,
}

/// Password policy: one uppercase, one lowercase, and one digit or symbol.
/// Checked explicitly rather than with a pattern because the policy needs
/// independent character classes, not a single match.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit_or_symbol = password
        .chars()
        .any(|c| c.is_ascii_digit() || !c.is_alphanumeric());

    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength"))
    }
}
