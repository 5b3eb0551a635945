use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account.
///
/// The password hash is an internal field: it is loaded from storage for
/// verification but skipped during serialization, so it never appears in a
/// response body.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user record with a fresh id. The caller supplies an
    /// already-hashed password.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("someone@example.com".to_string(), "$2b$12$hash".to_string());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["username"], "someone@example.com");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        let a = User::new("a@example.com".to_string(), "h".to_string());
        let b = User::new("b@example.com".to_string(), "h".to_string());
        assert_ne!(a.id, b.id);
    }
}
