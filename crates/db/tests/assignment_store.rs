//! Integration tests for the PostgreSQL storage backend.
//!
//! Exercises the repository layer and the core assignment store against a
//! real database. Run with `DATABASE_URL` set and `--ignored`.

use std::sync::Arc;

use sqlx::PgPool;
use standboard_core::models::{
    Assignment, AssignmentPatch, NewEntrepreneur, RotationCounters, STATUS_CONFIRMED,
};
use standboard_core::repository::StandRepository;
use standboard_core::slot::{Block, GridConfig, Shift};
use standboard_core::store::AssignmentStore;
use standboard_core::types::StandId;
use standboard_db::pg::PgStandRepository;
use standboard_db::repositories::{AssignmentRepo, EntrepreneurRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_entrepreneur(name: &str) -> NewEntrepreneur {
    NewEntrepreneur {
        name: name.to_string(),
        category: "COMIDA".to_string(),
        phone: None,
        email: None,
    }
}

fn store(pool: PgPool, stands: StandId) -> AssignmentStore {
    AssignmentStore::new(
        Arc::new(PgStandRepository::new(pool)),
        GridConfig::with_stand_count(stands),
    )
}

// ---------------------------------------------------------------------------
// Test: registration starts with zeroed counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_entrepreneur_defaults(pool: PgPool) {
    let row = EntrepreneurRepo::create(&pool, &new_entrepreneur("Ana"))
        .await
        .unwrap();
    assert_eq!(row.name, "Ana");
    assert_eq!(row.times_assigned, 0);
    assert!(row.last_participation_week.is_none());
}

// ---------------------------------------------------------------------------
// Test: generation commits rows and counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_generate_persists_batch(pool: PgPool) {
    let store = store(pool.clone(), 1);
    let a = store.register_entrepreneur(new_entrepreneur("A")).await.unwrap();
    let b = store.register_entrepreneur(new_entrepreneur("B")).await.unwrap();

    let outcome = store.generate_assignments("2025-W10").await.unwrap();
    assert_eq!(outcome.assignments.len(), 2);

    let rows = AssignmentRepo::list(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.iter().filter(|r| r.shift.as_deref() == Some("morning")).count(), 1);

    for id in [a.id, b.id] {
        let row = EntrepreneurRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.times_assigned, 1);
        assert_eq!(row.last_participation_week.as_deref(), Some("2025-W10"));
    }
}

// ---------------------------------------------------------------------------
// Test: manual full-day override evicts in one transaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_manual_override_evicts_and_decrements(pool: PgPool) {
    let store = store(pool.clone(), 1);
    let a = store.register_entrepreneur(new_entrepreneur("A")).await.unwrap();
    let b = store.register_entrepreneur(new_entrepreneur("B")).await.unwrap();

    let morning =
        Assignment::new(a.id, 1, "2025-W10", Block::MonTue, Shift::Morning, STATUS_CONFIRMED);
    store.set_manual_assignment(morning).await.unwrap();
    let full =
        Assignment::new(b.id, 1, "2025-W10", Block::MonTue, Shift::FullDay, STATUS_CONFIRMED);
    store.set_manual_assignment(full).await.unwrap();

    let rows = AssignmentRepo::list(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entrepreneur_id, b.id);

    let a_row = EntrepreneurRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a_row.times_assigned, 0);
}

// ---------------------------------------------------------------------------
// Test: legacy rows without a shift read as full-day
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_null_shift_reads_as_full_day(pool: PgPool) {
    let a = EntrepreneurRepo::create(&pool, &new_entrepreneur("Legacy"))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO assignments (id, entrepreneur_id, stand_id, week, block, shift)
         VALUES (gen_random_uuid(), $1, 1, '2025-S05', 'fri', NULL)",
    )
    .bind(a.id)
    .execute(&pool)
    .await
    .unwrap();

    let repo = PgStandRepository::new(pool);
    let assignments = repo.list_assignments().await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].shift, Shift::FullDay);
}

// ---------------------------------------------------------------------------
// Test: patch and reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_patch_then_reset_all(pool: PgPool) {
    let store = store(pool.clone(), 1);
    store.register_entrepreneur(new_entrepreneur("A")).await.unwrap();
    let outcome = store.generate_assignments("2025-W10").await.unwrap();

    let patch = AssignmentPatch {
        status: Some("rejected".into()),
        attended: Some(false),
        comments: None,
    };
    let updated = store
        .update_assignment(outcome.assignments[0].id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "rejected");
    assert_eq!(updated.attended, Some(false));

    store.clear_all_data().await.unwrap();
    assert!(AssignmentRepo::list(&pool).await.unwrap().is_empty());
    for row in EntrepreneurRepo::list(&pool).await.unwrap() {
        assert_eq!(row.times_assigned, 0);
        assert!(row.last_participation_week.is_none());
    }
}

// ---------------------------------------------------------------------------
// Test: counter writes through the pool and a transaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_counters_accepts_pool_and_transaction(pool: PgPool) {
    let row = EntrepreneurRepo::create(&pool, &new_entrepreneur("Ana"))
        .await
        .unwrap();
    let counters = RotationCounters {
        times_assigned: 2,
        last_participation_week: Some("2025-W10".into()),
    };
    assert!(EntrepreneurRepo::update_counters(&pool, row.id, &counters)
        .await
        .unwrap());

    let mut tx = pool.begin().await.unwrap();
    let zeroed = RotationCounters {
        times_assigned: 0,
        last_participation_week: None,
    };
    assert!(EntrepreneurRepo::update_counters(&mut *tx, row.id, &zeroed)
        .await
        .unwrap());
    assert!(!EntrepreneurRepo::update_counters(&mut *tx, row.id + 1000, &zeroed)
        .await
        .unwrap());
    tx.commit().await.unwrap();

    let stored = EntrepreneurRepo::find_by_id(&pool, row.id).await.unwrap().unwrap();
    assert_eq!(stored.times_assigned, 0);
    assert!(stored.last_participation_week.is_none());
}
