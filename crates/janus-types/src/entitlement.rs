//! Entitlement types

use serde::{Deserialize, Serialize};

use crate::ApplicationId;

/// One entry of a desired entitlement list submitted for reconciliation
///
/// Entries name the applications they touch; applications absent from the
/// list are left untouched by a reconcile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredAssignment {
    /// Application the entry refers to
    pub application_id: ApplicationId,
    /// Display name of the application (source of the credential label)
    pub application_name: String,
    /// Whether the user should hold an entitlement after reconciliation
    pub is_assigned: bool,
}

/// A user's entitlement to one application, as reported to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementView {
    pub application_id: ApplicationId,
    /// Informational label written at grant time; never used for decisions
    pub credential_label: String,
}
