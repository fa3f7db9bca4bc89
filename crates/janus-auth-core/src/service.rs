//! Auth service - ties together credential verification, token issuance,
//! entitlement decisions and the reset workflow

use std::sync::Arc;

use janus_db::{EntitlementRepository, IdentityStore, NewUser, UserRow};
use janus_types::{
    ApplicationId, ApplicationLoginOutcome, DesiredAssignment, EntitlementView, LoginOutcome,
    RoleName, UserId, UserProfile,
};
use uuid::Uuid;

use crate::{
    claims::ClaimSet, config::TokenConfig, entitlement::EntitlementEngine, mailer::Mailer,
    reset::ResetWorkflow, token::TokenIssuer, AuthError,
};

/// Authentication service
///
/// Provides the gateway's produced interface:
/// - credential login and application-scoped login
/// - entitlement decisions and reconciliation
/// - password-reset request/redemption
/// - user registration and administrative lookups
///
/// All collaborators are injected explicitly; the service holds no request
/// state of its own.
pub struct AuthService<S: IdentityStore, E: EntitlementRepository, M: Mailer> {
    token_issuer: TokenIssuer,
    entitlements: EntitlementEngine<E>,
    reset: ResetWorkflow<S, M>,
    store: Arc<S>,
}

impl<S: IdentityStore, E: EntitlementRepository, M: Mailer> AuthService<S, E, M> {
    /// Create a new auth service
    ///
    /// # Errors
    /// Fails with `AuthError::Configuration` when the token config is
    /// invalid; callers must treat this as fatal at startup.
    pub fn new(
        config: TokenConfig,
        store: Arc<S>,
        entitlement_repo: Arc<E>,
        mailer: Arc<M>,
        reset_base_url: impl Into<String>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            token_issuer: TokenIssuer::new(config)?,
            entitlements: EntitlementEngine::new(entitlement_repo),
            reset: ResetWorkflow::new(Arc::clone(&store), mailer, reset_base_url),
            store,
        })
    }

    /// The issuer used for signing; the HTTP boundary borrows it to verify
    /// inbound bearer tokens
    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Verify credentials and issue a signed token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self.verify_credentials(username, password).await?;
        let roles = self.role_names(user.id).await?;

        let claims = ClaimSet::assemble(&user, roles.clone());
        let signed = self.token_issuer.issue(&claims)?;

        tracing::info!(user_id = %user.id, "login succeeded");

        Ok(LoginOutcome {
            token: signed.token,
            expires_at: signed.expires_at,
            roles,
            user_id: user.user_id(),
            username: user.username,
        })
    }

    /// Verify credentials, issue a token, and report whether the user is
    /// entitled to the named application
    pub async fn login_to_application(
        &self,
        username: &str,
        password: &str,
        application_id: ApplicationId,
    ) -> Result<ApplicationLoginOutcome, AuthError> {
        let user = self.verify_credentials(username, password).await?;
        let roles = self.role_names(user.id).await?;

        let claims = ClaimSet::assemble(&user, roles);
        let signed = self.token_issuer.issue(&claims)?;

        let is_entitled = self
            .entitlements
            .is_entitled(user.user_id(), application_id)
            .await?;

        tracing::info!(
            user_id = %user.id,
            application_id = %application_id,
            is_entitled,
            "application login succeeded"
        );

        Ok(ApplicationLoginOutcome {
            token: signed.token,
            user_id: user.user_id(),
            username: user.username,
            is_entitled,
        })
    }

    // =========================================================================
    // Entitlements
    // =========================================================================

    /// Whether the user holds an entitlement for the application
    pub async fn is_entitled(
        &self,
        user_id: UserId,
        application_id: ApplicationId,
    ) -> Result<bool, AuthError> {
        self.entitlements.is_entitled(user_id, application_id).await
    }

    /// Apply a desired entitlement list for one user transactionally
    pub async fn reconcile_entitlements(
        &self,
        user_id: UserId,
        username: &str,
        desired: &[DesiredAssignment],
    ) -> Result<(), AuthError> {
        self.entitlements.reconcile(user_id, username, desired).await
    }

    /// The user's current entitlement rows
    pub async fn assignments_for(&self, user_id: UserId) -> Result<Vec<EntitlementView>, AuthError> {
        let rows = self.entitlements.assignments_for(user_id).await?;
        Ok(rows.iter().map(|row| row.to_view()).collect())
    }

    // =========================================================================
    // Password reset
    // =========================================================================

    /// Request a password reset; always reports success
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.reset.request(email).await
    }

    /// Redeem a reset token and replace the credential
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.reset.redeem(email, token, new_password).await
    }

    // =========================================================================
    // User management
    // =========================================================================

    /// Register a new user and bind the requested role
    ///
    /// The built-in roles are registered lazily on first use; the store
    /// hashes the password and enforces its policy.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: RoleName,
    ) -> Result<UserProfile, AuthError> {
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        for builtin in [RoleName::Admin, RoleName::User] {
            if !self.store.role_exists(builtin.as_str()).await? {
                self.store.create_role(builtin.as_str()).await?;
            }
        }
        if !self.store.role_exists(role.as_str()).await? {
            self.store.create_role(role.as_str()).await?;
        }

        let user = self
            .store
            .create(NewUser {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.store.add_to_role(user.id, role.as_str()).await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(UserProfile {
            user_id: user.user_id(),
            username: user.username,
            email: user.email,
            roles: vec![role],
        })
    }

    /// All users with their roles
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
        let users = self.store.list().await?;

        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.role_names(user.id).await?;
            profiles.push(UserProfile {
                user_id: user.user_id(),
                username: user.username,
                email: user.email,
                roles,
            });
        }

        Ok(profiles)
    }

    /// One user with their roles
    pub async fn user_profile(&self, user_id: UserId) -> Result<UserProfile, AuthError> {
        let user = self
            .store
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        let roles = self.role_names(user.id).await?;

        Ok(UserProfile {
            user_id: user.user_id(),
            username: user.username,
            email: user.email,
            roles,
        })
    }

    /// Delete a user, removing every role binding first
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), AuthError> {
        let user = self
            .store
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::NotFound)?;

        for role in self.store.roles_of(user.id).await? {
            self.store.remove_from_role(user.id, &role).await?;
        }

        self.store.delete(user.id).await?;

        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Look up an identity and check the password
    ///
    /// Unknown usernames and wrong passwords are only distinguishable in
    /// debug logs; the returned error is the same for both.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRow, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            tracing::debug!("login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.store.check_password(&user, password).await? {
            tracing::debug!(user_id = %user.id, "login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn role_names(&self, user_id: Uuid) -> Result<Vec<RoleName>, AuthError> {
        let names = self.store.roles_of(user_id).await?;
        Ok(names.into_iter().map(RoleName::from).collect())
    }
}

impl<S: IdentityStore, E: EntitlementRepository, M: Mailer> std::fmt::Debug
    for AuthService<S, E, M>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_issuer", &self.token_issuer)
            .finish_non_exhaustive()
    }
}
