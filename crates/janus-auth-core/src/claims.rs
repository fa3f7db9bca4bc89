//! Claim assembly

use janus_db::UserRow;
use janus_types::RoleName;
use uuid::Uuid;

/// The canonical claim set assembled for one token issuance
///
/// Ephemeral and in-memory only; never persisted. The token id is fresh per
/// assembly so two logins at the same instant still produce distinct tokens.
#[derive(Debug, Clone)]
pub struct ClaimSet {
    /// Subject: the identity's username
    pub subject: String,
    /// Fresh random token id (jti)
    pub token_id: Uuid,
    /// One entry per role bound to the identity; order is not significant
    pub roles: Vec<RoleName>,
}

impl ClaimSet {
    /// Assemble the claim set for a verified identity and its roles
    ///
    /// Duplicate roles collapse to one claim each.
    pub fn assemble(user: &UserRow, roles: Vec<RoleName>) -> Self {
        let mut deduped: Vec<RoleName> = Vec::with_capacity(roles.len());
        for role in roles {
            if !deduped.contains(&role) {
                deduped.push(role);
            }
        }

        Self {
            subject: user.username.clone(),
            token_id: Uuid::new_v4(),
            roles: deduped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_subject_is_username() {
        let user = test_user("alice");
        let claims = ClaimSet::assemble(&user, vec![RoleName::User]);
        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.roles, vec![RoleName::User]);
    }

    #[test]
    fn test_token_id_fresh_per_assembly() {
        let user = test_user("alice");
        let first = ClaimSet::assemble(&user, vec![]);
        let second = ClaimSet::assemble(&user, vec![]);
        assert_ne!(first.token_id, second.token_id);
    }

    #[test]
    fn test_duplicate_roles_collapsed() {
        let user = test_user("bob");
        let claims = ClaimSet::assemble(
            &user,
            vec![RoleName::Admin, RoleName::User, RoleName::Admin],
        );
        assert_eq!(claims.roles, vec![RoleName::Admin, RoleName::User]);
    }

    #[test]
    fn test_no_roles_is_empty_not_error() {
        let user = test_user("carol");
        let claims = ClaimSet::assemble(&user, vec![]);
        assert!(claims.roles.is_empty());
    }
}
