//! Role types

use serde::{Deserialize, Serialize};

/// Name of a role bound to a user
///
/// The built-in roles are a closed set so call sites cannot typo them, while
/// `Custom` keeps the store free to register new roles at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    /// Administrative role
    Admin,
    /// Regular user role
    User,
    /// A role registered dynamically in the store
    Custom(String),
}

impl RoleName {
    /// Get the role name as stored
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is the administrative role
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RoleName {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admin" => Self::Admin,
            "User" => Self::User,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for RoleName {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        role.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roles_round_trip() {
        assert_eq!(RoleName::from("Admin"), RoleName::Admin);
        assert_eq!(RoleName::from("User"), RoleName::User);
        assert_eq!(RoleName::Admin.as_str(), "Admin");
        assert_eq!(RoleName::User.as_str(), "User");
    }

    #[test]
    fn test_custom_role_preserved() {
        let role = RoleName::from("Auditor");
        assert_eq!(role, RoleName::Custom("Auditor".to_string()));
        assert_eq!(role.as_str(), "Auditor");
        assert!(!role.is_admin());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&RoleName::Admin).unwrap();
        assert_eq!(json, "\"Admin\"");

        let role: RoleName = serde_json::from_str("\"Auditor\"").unwrap();
        assert_eq!(role, RoleName::Custom("Auditor".to_string()));
    }
}
