//! User profile

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Lenient parse for stored role strings; anything unrecognized is a
    /// plain user.
    pub fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub orders: bool,
    pub promotions: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            orders: true,
            promotions: true,
        }
    }
}

/// Profile returned by the auth endpoints and cached in the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub notifications: NotificationPrefs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_user() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "u1", "name": "John Doe", "email": "john@example.com"}"#,
        )
        .unwrap();
        assert_eq!(profile.role, Role::User);
        assert!(profile.notifications.orders);
        assert!(profile.notifications.promotions);
    }
}
