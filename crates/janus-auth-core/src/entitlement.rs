//! Entitlement decisions and reconciliation

use std::collections::HashSet;
use std::sync::Arc;

use janus_db::{EntitlementRepository, EntitlementRow, NewEntitlement};
use janus_types::{ApplicationId, DesiredAssignment, UserId};

use crate::AuthError;

/// Decides and mutates which users may access which applications
///
/// Decisions are uncached existence checks so a reconcile is visible to the
/// next decision immediately.
#[derive(Clone)]
pub struct EntitlementEngine<R: EntitlementRepository> {
    repo: Arc<R>,
}

impl<R: EntitlementRepository> EntitlementEngine<R> {
    /// Create a new entitlement engine
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Whether the user holds an entitlement for the application
    pub async fn is_entitled(
        &self,
        user_id: UserId,
        application_id: ApplicationId,
    ) -> Result<bool, AuthError> {
        let row = self.repo.find(user_id.0, application_id.0).await?;
        Ok(row.is_some())
    }

    /// All entitlement rows held by a user
    pub async fn assignments_for(&self, user_id: UserId) -> Result<Vec<EntitlementRow>, AuthError> {
        Ok(self.repo.find_by_user(user_id.0).await?)
    }

    /// Bring the user's entitlements in line with a desired list
    ///
    /// Only the applications named in the list are touched; entries whose
    /// state already matches are no-ops, so the call is idempotent. The
    /// computed grant and revoke sets commit in one transaction or not at
    /// all.
    pub async fn reconcile(
        &self,
        user_id: UserId,
        username: &str,
        desired: &[DesiredAssignment],
    ) -> Result<(), AuthError> {
        if desired.is_empty() {
            return Ok(());
        }

        let current: HashSet<i32> = self
            .repo
            .find_by_user(user_id.0)
            .await?
            .into_iter()
            .map(|row| row.application_id)
            .collect();

        let mut seen: HashSet<i32> = HashSet::new();
        let mut grants: Vec<NewEntitlement> = Vec::new();
        let mut revokes: Vec<i32> = Vec::new();

        for entry in desired {
            let app_id = entry.application_id.0;
            // First entry wins when a list names an application twice
            if !seen.insert(app_id) {
                continue;
            }

            let held = current.contains(&app_id);
            if entry.is_assigned && !held {
                grants.push(NewEntitlement {
                    application_id: app_id,
                    credential_label: credential_label(username, &entry.application_name),
                });
            } else if !entry.is_assigned && held {
                revokes.push(app_id);
            }
        }

        if grants.is_empty() && revokes.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            user_id = %user_id,
            grants = grants.len(),
            revokes = revokes.len(),
            "reconciling entitlements"
        );

        self.repo.apply(user_id.0, &grants, &revokes).await?;

        Ok(())
    }
}

/// Derive the informational credential label written at grant time
///
/// Username concatenated with the first whitespace-delimited word of the
/// application's display name. Never read back for decisions.
fn credential_label(username: &str, application_name: &str) -> String {
    let first_word = application_name.split_whitespace().next().unwrap_or("");
    format!("{username}{first_word}")
}

impl<R: EntitlementRepository> std::fmt::Debug for EntitlementEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementEngine").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_label_first_word() {
        assert_eq!(credential_label("alice", "Payroll System"), "alicePayroll");
        assert_eq!(credential_label("bob", "CRM"), "bobCRM");
    }

    #[test]
    fn test_credential_label_empty_name() {
        assert_eq!(credential_label("alice", ""), "alice");
        assert_eq!(credential_label("alice", "   "), "alice");
    }
}
