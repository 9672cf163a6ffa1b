//! Platform users and the signed-in administrator's profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID
    pub id: i64,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Registration time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Whether the email address was confirmed
    #[serde(default)]
    pub is_email_confirmed: bool,
    /// Whether the user is an administrator
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// First and last name joined by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Profile of the administrator holding the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID
    pub id: i64,
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Role name
    pub role: String,
}

impl UserProfile {
    /// Build a profile from a loosely-shaped user object
    ///
    /// Missing fields fall back the way the login screen always did:
    /// `fullName`, else `firstName lastName`; the login email; role `User`.
    pub fn from_value(value: &Value, fallback_email: &str) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let full_name = text("fullName").unwrap_or_else(|| {
            format!(
                "{} {}",
                text("firstName").unwrap_or_default(),
                text("lastName").unwrap_or_default()
            )
            .trim()
            .to_string()
        });

        Self {
            id: value.get("id").and_then(Value::as_i64).unwrap_or(0),
            full_name,
            email: text("email").unwrap_or_else(|| fallback_email.to_string()),
            role: text("role").unwrap_or_else(|| "User".to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let user: User = serde_json::from_value(json!({
            "id": 12,
            "firstName": "Ayşe",
            "lastName": "Yılmaz",
            "email": "ayse@example.com",
            "phoneNumber": "05321234567",
            "createdAt": "2024-05-01T09:30:00",
            "isEmailConfirmed": true,
            "isAdmin": false
        }))
        .unwrap();

        assert_eq!(user.full_name(), "Ayşe Yılmaz");
        assert!(user.is_email_confirmed);
        assert_eq!(user.phone_number.as_deref(), Some("05321234567"));
    }

    #[test]
    fn test_profile_prefers_full_name() {
        let profile = UserProfile::from_value(
            &json!({"id": 1, "fullName": "Admin Kullanıcı", "email": "admin@temizyuva.com", "role": "Admin"}),
            "login@temizyuva.com",
        );

        assert_eq!(
            profile,
            UserProfile {
                id: 1,
                full_name: "Admin Kullanıcı".to_string(),
                email: "admin@temizyuva.com".to_string(),
                role: "Admin".to_string(),
            }
        );
    }

    #[test]
    fn test_profile_fallbacks() {
        let profile = UserProfile::from_value(
            &json!({"firstName": "Mehmet", "lastName": ""}),
            "mehmet@temizyuva.com",
        );

        assert_eq!(profile.id, 0);
        assert_eq!(profile.full_name, "Mehmet");
        assert_eq!(profile.email, "mehmet@temizyuva.com");
        assert_eq!(profile.role, "User");
    }
}
