//! Janus Types - Shared domain types
//!
//! This crate contains domain types used across Janus services:
//! - User and application identifiers
//! - Role names
//! - Entitlement assignments and login outcomes

pub mod application;
pub mod auth;
pub mod entitlement;
pub mod role;
pub mod user;

pub use application::*;
pub use auth::*;
pub use entitlement::*;
pub use role::*;
pub use user::*;
