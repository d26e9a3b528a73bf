//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and indexes.

#![allow(dead_code)]

use medibook_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = medibook_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        medibook_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a test user with a dummy password hash
pub async fn create_test_user(pool: &SqlitePool, name: &str) -> User {
    medibook_storage::users::create(
        pool,
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        },
        "$2b$12$dummyhashdummyhashdummyhashdummyhashdummyhashdummyha",
    )
    .await
    .expect("Failed to create test user")
}

/// Test fixture: Create a hospital
pub async fn create_test_hospital(pool: &SqlitePool, name: &str) -> Hospital {
    medibook_storage::hospitals::create(
        pool,
        CreateHospital {
            name: name.to_string(),
            address: "1 Hospital Road".to_string(),
        },
    )
    .await
    .expect("Failed to create test hospital")
}

/// Test fixture: Create an available doctor at a hospital
pub async fn create_test_doctor(
    pool: &SqlitePool,
    name: &str,
    hospital: &str,
    fees: i64,
) -> Doctor {
    medibook_storage::doctors::create(
        pool,
        CreateDoctor {
            name: name.to_string(),
            email: format!("{}@clinic.example.com", name.to_lowercase().replace(' ', ".")),
            image: None,
            speciality: "General physician".to_string(),
            degree: "MBBS".to_string(),
            experience: "4 Years".to_string(),
            about: "Primary care".to_string(),
            fees,
            hospital: hospital.to_string(),
            address: Address::new("2 Clinic Lane", "Pune"),
        },
    )
    .await
    .expect("Failed to create test doctor")
}

/// Build a slot from literals
pub fn slot(date: &str, time: &str) -> Slot {
    Slot::new(date, time).expect("valid slot")
}

/// Snapshot a booking for `user` with `doctor` at `slot`
pub fn new_appointment(user: &User, doctor: &Doctor, slot: Slot) -> NewAppointment {
    NewAppointment::snapshot(user, doctor, slot)
}
