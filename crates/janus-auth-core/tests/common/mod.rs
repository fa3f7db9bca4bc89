//! Common test utilities for janus-auth-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{MockEntitlementRepository, MockIdentityStore, MockMailer};
