//! Integration tests for the slot ledger
//!
//! Tests:
//! - Reserve / release semantics
//! - Doctor availability and existence checks
//! - Concurrent reservations of the same slot

mod test_helpers;

use medibook_core::{types::*, BookingError};
use test_helpers::*;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_reserve_free_slot() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;
    let s = slot("2024-01-10", "10:00");

    medibook_storage::slots::reserve(pool, &doctor.id, &s)
        .await
        .expect("Failed to reserve slot");

    let ledger = medibook_storage::slots::get_ledger(pool, &doctor.id)
        .await
        .unwrap();
    assert!(ledger.is_booked(&s));
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_double_reserve_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;
    let s = slot("2024-01-10", "10:00");

    medibook_storage::slots::reserve(pool, &doctor.id, &s)
        .await
        .unwrap();

    let err = medibook_storage::slots::reserve(pool, &doctor.id, &s)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotUnavailable));

    let ledger = medibook_storage::slots::get_ledger(pool, &doctor.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_same_time_on_other_date_is_free() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;

    medibook_storage::slots::reserve(pool, &doctor.id, &slot("2024-01-10", "10:00"))
        .await
        .unwrap();
    medibook_storage::slots::reserve(pool, &doctor.id, &slot("2024-01-11", "10:00"))
        .await
        .expect("Different date should be free");
    medibook_storage::slots::reserve(pool, &doctor.id, &slot("2024-01-10", "10:30"))
        .await
        .expect("Different time should be free");

    let ledger = medibook_storage::slots::get_ledger(pool, &doctor.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.times_on("2024-01-10").len(), 2);
}

#[tokio::test]
async fn test_ledgers_are_per_doctor() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;
    let second = create_test_doctor(pool, "Dr Iyer", "City Care", 700).await;
    let s = slot("2024-01-10", "10:00");

    medibook_storage::slots::reserve(pool, &first.id, &s)
        .await
        .unwrap();
    medibook_storage::slots::reserve(pool, &second.id, &s)
        .await
        .expect("Same slot with another doctor should be free");
}

#[tokio::test]
async fn test_release_then_reserve_again() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;
    let s = slot("2024-01-10", "10:00");

    medibook_storage::slots::reserve(pool, &doctor.id, &s)
        .await
        .unwrap();

    let released = medibook_storage::slots::release(pool, &doctor.id, &s)
        .await
        .unwrap();
    assert!(released);

    let ledger = medibook_storage::slots::get_ledger(pool, &doctor.id)
        .await
        .unwrap();
    assert!(ledger.is_empty());

    medibook_storage::slots::reserve(pool, &doctor.id, &s)
        .await
        .expect("Released slot should be bookable again");
}

#[tokio::test]
async fn test_release_free_slot_is_noop() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;

    let released = medibook_storage::slots::release(pool, &doctor.id, &slot("2024-01-10", "10:00"))
        .await
        .expect("Releasing a free slot must not fail");
    assert!(!released);
}

#[tokio::test]
async fn test_reserve_with_unavailable_doctor() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let doctor = create_test_doctor(pool, "Dr Rao", "City Care", 500).await;
    medibook_storage::doctors::set_availability(pool, &doctor.id, false)
        .await
        .unwrap();

    let err = medibook_storage::slots::reserve(pool, &doctor.id, &slot("2024-01-10", "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::DoctorUnavailable));

    let ledger = medibook_storage::slots::get_ledger(pool, &doctor.id)
        .await
        .unwrap();
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_reserve_with_unknown_doctor() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let err = medibook_storage::slots::reserve(
        pool,
        &DoctorId::new("missing"),
        &slot("2024-01-10", "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, BookingError::NotFound { .. }));
}

#[tokio::test]
async fn test_concurrent_reserve_has_single_winner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let doctor = create_test_doctor(&pool, "Dr Rao", "City Care", 500).await;
    let s = slot("2024-01-10", "10:00");

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let pool = pool.clone();
        let doctor_id = doctor.id.clone();
        let s = s.clone();
        tasks.spawn(async move { medibook_storage::slots::reserve(&pool, &doctor_id, &s).await });
    }

    let mut winners = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.expect("task panicked") {
            Ok(()) => winners += 1,
            Err(BookingError::SlotUnavailable) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 7);

    let ledger = medibook_storage::slots::get_ledger(&pool, &doctor.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_doctor_reads_see_consistent_ledgers_during_reservations() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let doctor = create_test_doctor(&pool, "Dr Rao", "City Care", 500).await;
    let times: Vec<String> = (8..18).map(|hour| format!("{hour:02}:00")).collect();

    let mut writers = JoinSet::new();
    for time in times.clone() {
        let pool = pool.clone();
        let doctor_id = doctor.id.clone();
        writers.spawn(async move {
            medibook_storage::slots::reserve(&pool, &doctor_id, &slot("2024-01-10", &time)).await
        });
    }

    let mut readers = JoinSet::new();
    for _ in 0..4 {
        let pool = pool.clone();
        let doctor_id = doctor.id.clone();
        readers.spawn(async move {
            let mut seen = Vec::new();
            for _ in 0..10 {
                let doctor = medibook_storage::doctors::get_by_id(&pool, &doctor_id)
                    .await
                    .unwrap()
                    .expect("doctor exists");
                seen.push(doctor.slots_booked);
                tokio::task::yield_now().await;
            }
            seen
        });
    }

    while let Some(result) = writers.join_next().await {
        result.expect("task panicked").unwrap();
    }

    let final_ledger = medibook_storage::slots::get_ledger(&pool, &doctor.id)
        .await
        .unwrap();
    assert_eq!(final_ledger.len(), times.len());

    while let Some(result) = readers.join_next().await {
        let seen = result.expect("task panicked");
        // Reservations only add slots, so each reader's views only grow
        for pair in seen.windows(2) {
            assert!(pair[0].slots().all(|s| pair[1].is_booked(&s)));
        }
        for ledger in &seen {
            assert!(ledger.slots().all(|s| final_ledger.is_booked(&s)));
        }
    }

    let doctor = medibook_storage::doctors::get_by_id(&pool, &doctor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doctor.slots_booked, final_ledger);
}
