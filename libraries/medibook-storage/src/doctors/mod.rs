use medibook_core::{
    error::Result,
    types::{Address, CreateDoctor, Doctor, DoctorId, Slot, SlotLedger},
    BookingError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashMap;

const DOCTOR_COLUMNS: &str = "id, name, email, image, speciality, degree, experience, about, \
     fees, hospital, available, address, created_at";

fn doctor_from_row(row: &SqliteRow, slots_booked: SlotLedger) -> Result<Doctor> {
    let address: Address = serde_json::from_str(&row.get::<String, _>("address"))?;

    Ok(Doctor {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        image: row.get("image"),
        speciality: row.get("speciality"),
        degree: row.get("degree"),
        experience: row.get("experience"),
        about: row.get("about"),
        fees: row.get("fees"),
        hospital: row.get("hospital"),
        available: row.get::<i64, _>("available") != 0,
        address,
        created_at: crate::timestamp_from_seconds(row.get("created_at"))?,
        slots_booked,
    })
}

/// Add a doctor; new doctors start available with an empty ledger
pub async fn create(pool: &SqlitePool, doctor: CreateDoctor) -> Result<Doctor> {
    doctor.validate()?;

    let id = DoctorId::generate();
    let now = crate::now_seconds();
    let address = serde_json::to_string(&doctor.address)?;

    sqlx::query(
        r#"
        INSERT INTO doctors (id, name, email, image, speciality, degree, experience, about,
                             fees, hospital, available, address, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&doctor.name)
    .bind(&doctor.email)
    .bind(&doctor.image)
    .bind(&doctor.speciality)
    .bind(&doctor.degree)
    .bind(&doctor.experience)
    .bind(&doctor.about)
    .bind(doctor.fees)
    .bind(&doctor.hospital)
    .bind(&address)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| crate::map_unique_violation(e, "doctor email already registered"))?;

    Ok(Doctor {
        id,
        name: doctor.name,
        email: doctor.email,
        image: doctor.image,
        speciality: doctor.speciality,
        degree: doctor.degree,
        experience: doctor.experience,
        about: doctor.about,
        fees: doctor.fees,
        hospital: doctor.hospital,
        available: true,
        address: doctor.address,
        created_at: crate::timestamp_from_seconds(now)?,
        slots_booked: SlotLedger::new(),
    })
}

/// Get doctor by ID, with its slot ledger
///
/// Row and ledger are read from one snapshot.
pub async fn get_by_id(pool: &SqlitePool, id: &DoctorId) -> Result<Option<Doctor>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let ledger = crate::slots::get_ledger_in(&mut *tx, id).await?;
    tx.commit().await?;

    doctor_from_row(&row, ledger).map(Some)
}

/// Doctors attached to a hospital, ordered by name
pub async fn get_by_hospital(pool: &SqlitePool, hospital: &str) -> Result<Vec<Doctor>> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE hospital = ? ORDER BY name"
    ))
    .bind(hospital)
    .fetch_all(&mut *tx)
    .await?;

    // Load every ledger for the hospital in one pass
    let slot_rows = sqlx::query(
        r#"
        SELECT bs.doctor_id, bs.slot_date, bs.slot_time
        FROM booked_slots bs
        JOIN doctors d ON d.id = bs.doctor_id
        WHERE d.hospital = ?
        "#,
    )
    .bind(hospital)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    let mut slots_by_doctor: HashMap<DoctorId, Vec<Slot>> = HashMap::new();
    for row in &slot_rows {
        slots_by_doctor
            .entry(row.get("doctor_id"))
            .or_default()
            .push(Slot {
                date: row.get("slot_date"),
                time: row.get("slot_time"),
            });
    }

    rows.iter()
        .map(|row| {
            let id: DoctorId = row.get("id");
            let ledger = slots_by_doctor
                .remove(&id)
                .map(|slots| slots.into_iter().collect())
                .unwrap_or_default();
            doctor_from_row(row, ledger)
        })
        .collect()
}

/// Toggle whether the doctor accepts bookings
pub async fn set_availability(pool: &SqlitePool, id: &DoctorId, available: bool) -> Result<()> {
    let result = sqlx::query("UPDATE doctors SET available = ? WHERE id = ?")
        .bind(i64::from(available))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BookingError::not_found("Doctor", id.as_str()));
    }

    Ok(())
}
