//! Mock collaborators for testing
//!
//! In-memory stand-ins for the identity store, entitlement relation and
//! mailer. Passwords are compared in plaintext here; Argon2 lives in the
//! Postgres store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use janus_auth_core::{MailError, Mailer};
use janus_db::{
    DbError, DbResult, EntitlementRepository, EntitlementRow, IdentityStore, NewEntitlement,
    NewUser, UserRow,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory identity store for testing
#[derive(Default, Clone)]
pub struct MockIdentityStore {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_username: Arc<DashMap<String, Uuid>>,
    by_email: Arc<DashMap<String, Uuid>>,
    roles: Arc<DashMap<String, ()>>,
    user_roles: Arc<DashMap<Uuid, Vec<String>>>,
    reset_tokens: Arc<DashMap<Uuid, String>>,
    tokens_generated: Arc<AtomicUsize>,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly, bypassing policy checks
    #[allow(dead_code)]
    pub fn insert_user(&self, username: &str, email: &str, password: &str) -> UserRow {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.by_username.insert(row.username.clone(), row.id);
        self.by_email.insert(row.email.clone(), row.id);
        self.users.insert(row.id, row.clone());
        row
    }

    /// Bind a role directly, registering it if needed
    #[allow(dead_code)]
    pub fn bind_role(&self, user_id: Uuid, role: &str) {
        self.roles.insert(role.to_string(), ());
        self.user_roles
            .entry(user_id)
            .or_default()
            .push(role.to_string());
    }

    /// How many reset tokens the store has been asked to generate
    #[allow(dead_code)]
    pub fn tokens_generated(&self) -> usize {
        self.tokens_generated.load(Ordering::SeqCst)
    }

    /// The outstanding reset token for a user, if any
    #[allow(dead_code)]
    pub fn outstanding_token(&self, user_id: Uuid) -> Option<String> {
        self.reset_tokens.get(&user_id).map(|t| t.value().clone())
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn list(&self) -> DbResult<Vec<UserRow>> {
        let mut users: Vec<UserRow> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, user: NewUser) -> DbResult<UserRow> {
        janus_db::password::check_policy(&user.password)?;
        Ok(self.insert_user(&user.username, &user.email, &user.password))
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_username.remove(&user.username);
            self.by_email.remove(&user.email);
            self.user_roles.remove(&id);
            self.reset_tokens.remove(&id);
        }
        Ok(())
    }

    async fn check_password(&self, user: &UserRow, candidate: &str) -> DbResult<bool> {
        Ok(user.password_hash == candidate)
    }

    async fn roles_of(&self, user_id: Uuid) -> DbResult<Vec<String>> {
        Ok(self
            .user_roles
            .get(&user_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    async fn role_exists(&self, role: &str) -> DbResult<bool> {
        Ok(self.roles.contains_key(role))
    }

    async fn create_role(&self, role: &str) -> DbResult<()> {
        self.roles.insert(role.to_string(), ());
        Ok(())
    }

    async fn add_to_role(&self, user_id: Uuid, role: &str) -> DbResult<()> {
        let mut bound = self.user_roles.entry(user_id).or_default();
        if !bound.iter().any(|r| r == role) {
            bound.push(role.to_string());
        }
        Ok(())
    }

    async fn remove_from_role(&self, user_id: Uuid, role: &str) -> DbResult<()> {
        if let Some(mut bound) = self.user_roles.get_mut(&user_id) {
            bound.retain(|r| r != role);
        }
        Ok(())
    }

    async fn generate_reset_token(&self, user_id: Uuid) -> DbResult<String> {
        self.tokens_generated.fetch_add(1, Ordering::SeqCst);
        let token = Uuid::new_v4().simple().to_string();
        self.reset_tokens.insert(user_id, token.clone());
        Ok(token)
    }

    async fn redeem_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        new_password: &str,
    ) -> DbResult<bool> {
        if janus_db::password::check_policy(new_password).is_err() {
            return Ok(false);
        }

        let matches = self
            .reset_tokens
            .get(&user_id)
            .is_some_and(|t| t.value() == token);
        if !matches {
            return Ok(false);
        }

        self.reset_tokens.remove(&user_id);
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.password_hash = new_password.to_string();
            user.updated_at = Utc::now();
        }
        Ok(true)
    }
}

/// In-memory entitlement relation for testing
///
/// `fail_next_apply` injects a store failure on the next batch so tests can
/// assert that a failed reconcile leaves no partial effect.
#[derive(Default, Clone)]
pub struct MockEntitlementRepository {
    rows: Arc<DashMap<(Uuid, i32), EntitlementRow>>,
    fail_next_apply: Arc<AtomicBool>,
}

impl MockEntitlementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entitlement row directly
    #[allow(dead_code)]
    pub fn insert_row(&self, user_id: Uuid, application_id: i32, label: &str) {
        self.rows.insert(
            (user_id, application_id),
            EntitlementRow {
                user_id,
                application_id,
                credential_label: label.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// Make the next `apply` fail without touching state
    #[allow(dead_code)]
    pub fn fail_next_apply(&self) {
        self.fail_next_apply.store(true, Ordering::SeqCst);
    }

    /// Application ids the user currently holds, sorted
    #[allow(dead_code)]
    pub fn held_by(&self, user_id: Uuid) -> Vec<i32> {
        let mut held: Vec<i32> = self
            .rows
            .iter()
            .filter(|r| r.key().0 == user_id)
            .map(|r| r.key().1)
            .collect();
        held.sort_unstable();
        held
    }
}

#[async_trait]
impl EntitlementRepository for MockEntitlementRepository {
    async fn find(&self, user_id: Uuid, application_id: i32) -> DbResult<Option<EntitlementRow>> {
        Ok(self
            .rows
            .get(&(user_id, application_id))
            .map(|r| r.value().clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Vec<EntitlementRow>> {
        let mut rows: Vec<EntitlementRow> = self
            .rows
            .iter()
            .filter(|r| r.key().0 == user_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|r| r.application_id);
        Ok(rows)
    }

    async fn apply(
        &self,
        user_id: Uuid,
        grants: &[NewEntitlement],
        revokes: &[i32],
    ) -> DbResult<()> {
        if self.fail_next_apply.swap(false, Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }

        for application_id in revokes {
            self.rows.remove(&(user_id, *application_id));
        }
        for grant in grants {
            self.rows
                .entry((user_id, grant.application_id))
                .or_insert_with(|| EntitlementRow {
                    user_id,
                    application_id: grant.application_id,
                    credential_label: grant.credential_label.clone(),
                    created_at: Utc::now(),
                });
        }
        Ok(())
    }
}

/// Recording mailer for testing
#[derive(Default, Clone)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail_next_send: Arc<AtomicBool>,
}

/// One captured message
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `send` fail
    #[allow(dead_code)]
    pub fn fail_next_send(&self) {
        self.fail_next_send.store(true, Ordering::SeqCst);
    }

    /// Everything sent so far
    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        if self.fail_next_send.swap(false, Ordering::SeqCst) {
            return Err(MailError::Send("injected failure".to_string()));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}
