use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as stored by the repository.
///
/// Deliberately not `Serialize`: anything leaving the service goes through `PublicUser`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Stored form of the password, as produced by the configured `PasswordScheme`.
    pub password: String,
}

/// Fields needed to create a user. The repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The outward-facing view of a user, without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_has_no_password() {
        let user = User {
            id: 1,
            username: "a".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "a");
        assert!(json.get("password").is_none());
    }
}
