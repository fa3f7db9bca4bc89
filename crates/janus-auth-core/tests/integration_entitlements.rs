//! Integration tests for entitlement decisions and reconciliation

mod common;

use std::sync::Arc;

use common::MockEntitlementRepository;
use janus_auth_core::{AuthError, EntitlementEngine};
use janus_db::EntitlementRepository;
use janus_types::{ApplicationId, DesiredAssignment, UserId};

fn engine() -> (EntitlementEngine<MockEntitlementRepository>, MockEntitlementRepository) {
    let repo = MockEntitlementRepository::new();
    (EntitlementEngine::new(Arc::new(repo.clone())), repo)
}

fn assigned(id: i32, name: &str) -> DesiredAssignment {
    DesiredAssignment {
        application_id: ApplicationId(id),
        application_name: name.to_string(),
        is_assigned: true,
    }
}

fn unassigned(id: i32, name: &str) -> DesiredAssignment {
    DesiredAssignment {
        application_id: ApplicationId(id),
        application_name: name.to_string(),
        is_assigned: false,
    }
}

#[tokio::test]
async fn test_is_entitled_reflects_rows() {
    let (engine, repo) = engine();
    let user = UserId::new();

    assert!(!engine.is_entitled(user, ApplicationId(1)).await.unwrap());

    repo.insert_row(user.0, 1, "aliceCRM");
    assert!(engine.is_entitled(user, ApplicationId(1)).await.unwrap());
    assert!(!engine.is_entitled(user, ApplicationId(2)).await.unwrap());
}

#[tokio::test]
async fn test_reconcile_grant_and_revoke() {
    let (engine, repo) = engine();
    let user = UserId::new();

    // User currently holds app 2 but not app 1
    repo.insert_row(user.0, 2, "aliceLedger");

    let desired = vec![assigned(1, "Payroll System"), unassigned(2, "Ledger")];
    engine.reconcile(user, "alice", &desired).await.unwrap();

    // Exactly one row remains: app 1
    assert_eq!(repo.held_by(user.0), vec![1]);
    assert!(engine.is_entitled(user, ApplicationId(1)).await.unwrap());
    assert!(!engine.is_entitled(user, ApplicationId(2)).await.unwrap());
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let (engine, repo) = engine();
    let user = UserId::new();

    let desired = vec![assigned(1, "Payroll System"), assigned(3, "CRM Suite")];
    engine.reconcile(user, "alice", &desired).await.unwrap();
    let after_first = repo.held_by(user.0);

    engine.reconcile(user, "alice", &desired).await.unwrap();
    let after_second = repo.held_by(user.0);

    assert_eq!(after_first, vec![1, 3]);
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_reconcile_only_touches_listed_applications() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 5, "aliceLegacy");

    engine
        .reconcile(user, "alice", &[assigned(1, "Payroll")])
        .await
        .unwrap();

    // App 5 was not named and survives untouched
    assert_eq!(repo.held_by(user.0), vec![1, 5]);
}

#[tokio::test]
async fn test_reconcile_matching_state_is_noop() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 1, "alicePayroll");

    // Already assigned + already absent: nothing to apply
    let desired = vec![assigned(1, "Payroll System"), unassigned(2, "Ledger")];
    engine.reconcile(user, "alice", &desired).await.unwrap();

    assert_eq!(repo.held_by(user.0), vec![1]);
}

#[tokio::test]
async fn test_credential_label_derived_from_username_and_first_word() {
    let (engine, repo) = engine();
    let user = UserId::new();

    engine
        .reconcile(user, "alice", &[assigned(1, "Payroll System")])
        .await
        .unwrap();

    let row = repo.find(user.0, 1).await.unwrap().unwrap();
    assert_eq!(row.credential_label, "alicePayroll");
}

#[tokio::test]
async fn test_label_fixed_at_creation_never_updated() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 1, "aliceOldName");

    // Reconciling with a new display name leaves the existing row alone
    engine
        .reconcile(user, "alice", &[assigned(1, "Renamed System")])
        .await
        .unwrap();

    let row = repo.find(user.0, 1).await.unwrap().unwrap();
    assert_eq!(row.credential_label, "aliceOldName");
}

#[tokio::test]
async fn test_reconcile_empty_list_is_noop() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 1, "alicePayroll");
    engine.reconcile(user, "alice", &[]).await.unwrap();
    assert_eq!(repo.held_by(user.0), vec![1]);
}

#[tokio::test]
async fn test_failed_apply_surfaces_persistence_and_leaves_no_partial_effect() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 2, "aliceLedger");
    repo.fail_next_apply();

    let desired = vec![assigned(1, "Payroll"), unassigned(2, "Ledger")];
    let err = engine.reconcile(user, "alice", &desired).await.unwrap_err();
    assert!(matches!(err, AuthError::Persistence));

    // Nothing was applied
    assert_eq!(repo.held_by(user.0), vec![2]);

    // Retrying after the fault succeeds
    engine.reconcile(user, "alice", &desired).await.unwrap();
    assert_eq!(repo.held_by(user.0), vec![1]);
}

#[tokio::test]
async fn test_duplicate_entries_first_wins() {
    let (engine, repo) = engine();
    let user = UserId::new();

    let desired = vec![assigned(1, "Payroll"), unassigned(1, "Payroll")];
    engine.reconcile(user, "alice", &desired).await.unwrap();

    assert_eq!(repo.held_by(user.0), vec![1]);
}

#[tokio::test]
async fn test_assignments_for_lists_current_rows() {
    let (engine, repo) = engine();
    let user = UserId::new();

    repo.insert_row(user.0, 3, "aliceCRM");
    repo.insert_row(user.0, 1, "alicePayroll");

    let rows = engine.assignments_for(user).await.unwrap();
    let apps: Vec<i32> = rows.iter().map(|r| r.application_id).collect();
    assert_eq!(apps, vec![1, 3]);
}
