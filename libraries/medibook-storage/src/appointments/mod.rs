//! Appointment queries
//!
//! Booking and cancellation touch both the appointment and the slot ledger,
//! so both run inside a single transaction.

use medibook_core::{
    error::Result,
    types::{Appointment, AppointmentId, DoctorSnapshot, NewAppointment, UserId, UserSnapshot},
    BookingError,
};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

const APPOINTMENT_COLUMNS: &str = "id, user_id, doctor_id, user_data, doc_data, slot_date, \
     slot_time, amount, created_at, cancelled, payment";

fn appointment_from_row(row: &SqliteRow) -> Result<Appointment> {
    let user: UserSnapshot = serde_json::from_str(&row.get::<String, _>("user_data"))?;
    let doctor: DoctorSnapshot = serde_json::from_str(&row.get::<String, _>("doc_data"))?;

    Ok(Appointment {
        id: row.get("id"),
        user_id: row.get("user_id"),
        doctor_id: row.get("doctor_id"),
        user,
        doctor,
        slot_date: row.get("slot_date"),
        slot_time: row.get("slot_time"),
        amount: row.get("amount"),
        created_at: row.get("created_at"),
        cancelled: row.get::<i64, _>("cancelled") != 0,
        payment: row.get::<i64, _>("payment") != 0,
    })
}

async fn get_in(conn: &mut SqliteConnection, id: &AppointmentId) -> Result<Option<Appointment>> {
    let row = sqlx::query(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(appointment_from_row).transpose()
}

/// Reserve the slot and insert the appointment
///
/// Nothing is written if the reservation fails.
pub async fn book(pool: &SqlitePool, new_appointment: NewAppointment) -> Result<Appointment> {
    let user_data = serde_json::to_string(&new_appointment.user)?;
    let doc_data = serde_json::to_string(&new_appointment.doctor)?;

    let mut tx = pool.begin().await?;

    crate::slots::reserve_in(&mut *tx, &new_appointment.doctor.id, &new_appointment.slot).await?;

    sqlx::query(
        r#"
        INSERT INTO appointments (id, user_id, doctor_id, user_data, doc_data,
                                  slot_date, slot_time, amount, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new_appointment.id)
    .bind(&new_appointment.user.id)
    .bind(&new_appointment.doctor.id)
    .bind(&user_data)
    .bind(&doc_data)
    .bind(&new_appointment.slot.date)
    .bind(&new_appointment.slot.time)
    .bind(new_appointment.amount)
    .bind(new_appointment.created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(new_appointment.into_appointment())
}

/// Get appointment by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AppointmentId) -> Result<Option<Appointment>> {
    let mut conn = pool.acquire().await?;
    get_in(&mut *conn, id).await
}

/// All appointments of a user in booking order, cancelled ones included
pub async fn get_by_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Appointment>> {
    let rows = sqlx::query(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE user_id = ? ORDER BY seq"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(appointment_from_row).collect()
}

/// Mark cancelled and release the slot
///
/// An already-cancelled appointment is returned as-is without touching the ledger.
pub async fn cancel(pool: &SqlitePool, id: &AppointmentId) -> Result<Appointment> {
    let mut tx = pool.begin().await?;

    // Write first so the transaction holds the write lock before reading
    let updated = sqlx::query("UPDATE appointments SET cancelled = 1 WHERE id = ? AND cancelled = 0")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let appointment = get_in(&mut *tx, id)
        .await?
        .ok_or_else(|| BookingError::not_found("Appointment", id.as_str()))?;

    if updated == 0 {
        return Ok(appointment);
    }

    let released =
        crate::slots::release_in(&mut *tx, &appointment.doctor_id, &appointment.slot()).await?;
    if !released {
        tracing::warn!(
            appointment_id = %id,
            doctor_id = %appointment.doctor_id,
            slot = %appointment.slot(),
            "Cancelled appointment had no matching ledger entry"
        );
    }

    tx.commit().await?;

    Ok(appointment)
}

/// Set the payment flag on a live appointment
///
/// Fails `AlreadyCancelled` if the appointment was cancelled, even by a
/// cancellation that landed after the caller last read it.
pub async fn mark_paid(pool: &SqlitePool, id: &AppointmentId) -> Result<()> {
    let result = sqlx::query("UPDATE appointments SET payment = 1 WHERE id = ? AND cancelled = 0")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return match get_by_id(pool, id).await? {
            Some(_) => Err(BookingError::AlreadyCancelled),
            None => Err(BookingError::not_found("Appointment", id.as_str())),
        };
    }

    Ok(())
}
