//! Slot ledger queries
//!
//! The ledger is the `booked_slots` table. Its primary key on
//! `(doctor_id, slot_date, slot_time)` is what keeps a slot from being
//! booked twice, including under concurrent reservations.

use medibook_core::{
    error::Result,
    types::{DoctorId, Slot, SlotLedger},
    BookingError,
};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Book a slot on an open connection or transaction
///
/// Inserts only if the doctor exists, is available, and the slot is free.
/// When nothing was inserted the doctor row is re-read on the same
/// connection to report why.
pub(crate) async fn reserve_in(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
    slot: &Slot,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO booked_slots (doctor_id, slot_date, slot_time, booked_at)
        SELECT id, ?, ?, ? FROM doctors WHERE id = ? AND available = 1
        "#,
    )
    .bind(&slot.date)
    .bind(&slot.time)
    .bind(crate::now_seconds())
    .bind(doctor_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let available = sqlx::query_scalar::<_, i64>("SELECT available FROM doctors WHERE id = ?")
        .bind(doctor_id)
        .fetch_optional(&mut *conn)
        .await?;

    match available {
        None => Err(BookingError::not_found("Doctor", doctor_id.as_str())),
        Some(0) => Err(BookingError::DoctorUnavailable),
        Some(_) => Err(BookingError::SlotUnavailable),
    }
}

/// Free a slot on an open connection or transaction. Returns whether a row was removed.
pub(crate) async fn release_in(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
    slot: &Slot,
) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM booked_slots WHERE doctor_id = ? AND slot_date = ? AND slot_time = ?",
    )
    .bind(doctor_id)
    .bind(&slot.date)
    .bind(&slot.time)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Book a slot for a doctor
pub async fn reserve(pool: &SqlitePool, doctor_id: &DoctorId, slot: &Slot) -> Result<()> {
    let mut conn = pool.acquire().await?;
    reserve_in(&mut *conn, doctor_id, slot).await
}

/// Free a slot; releasing a free slot is a no-op
pub async fn release(pool: &SqlitePool, doctor_id: &DoctorId, slot: &Slot) -> Result<bool> {
    let mut conn = pool.acquire().await?;
    release_in(&mut *conn, doctor_id, slot).await
}

pub(crate) async fn get_ledger_in(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
) -> Result<SlotLedger> {
    let rows = sqlx::query(
        "SELECT slot_date, slot_time FROM booked_slots WHERE doctor_id = ? ORDER BY slot_date, slot_time",
    )
    .bind(doctor_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Slot {
            date: row.get("slot_date"),
            time: row.get("slot_time"),
        })
        .collect())
}

/// Current ledger for one doctor
pub async fn get_ledger(pool: &SqlitePool, doctor_id: &DoctorId) -> Result<SlotLedger> {
    let mut conn = pool.acquire().await?;
    get_ledger_in(&mut *conn, doctor_id).await
}
