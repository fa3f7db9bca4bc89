//! HTTP handlers

mod auth;
mod entitlements;
mod health;
mod users;

pub use auth::{application_login, confirm_password_reset, login, request_password_reset};
pub use entitlements::{list_applications, reconcile_assignments, user_assignments};
pub use health::{health, ready};
pub use users::{delete_user, get_user, list_users, register};
