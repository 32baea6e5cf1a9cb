//! User Model

use serde::{Deserialize, Serialize};

/// Account role
///
/// Stored as lowercase text (`patron` / `manager`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patron,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patron => "patron",
            Role::Manager => "manager",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "patron" => Some(Role::Patron),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User row (includes the password hash, never serialized to clients)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub email: String,
    pub mobile: String,
    pub hashed_password: String,
    pub role: String,
    pub created_at: i64,
}

impl User {
    /// Unknown role strings degrade to patron so they never gain manager rights
    pub fn role(&self) -> Role {
        Role::from_db(&self.role).unwrap_or_default()
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            firstname: self.firstname.clone(),
            email: self.email.clone(),
            role: self.role(),
        }
    }
}

/// Public user view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub firstname: String,
    pub email: String,
    pub role: Role,
}

/// Signup payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub password: String,
}

/// Login payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token + profile returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
