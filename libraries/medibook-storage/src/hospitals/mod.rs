use medibook_core::{
    error::Result,
    types::{CreateHospital, Hospital, HospitalId},
    BookingError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn hospital_from_row(row: &SqliteRow) -> Result<Hospital> {
    Ok(Hospital {
        id: row.get("id"),
        name: row.get("name"),
        address: row.get("address"),
        created_at: crate::timestamp_from_seconds(row.get("created_at"))?,
    })
}

/// Create a hospital; names are unique
pub async fn create(pool: &SqlitePool, hospital: CreateHospital) -> Result<Hospital> {
    let name = hospital.name.trim().to_string();
    if name.is_empty() {
        return Err(BookingError::invalid_input("Hospital name cannot be empty"));
    }

    let id = HospitalId::generate();
    let now = crate::now_seconds();

    sqlx::query("INSERT INTO hospitals (id, name, address, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&name)
        .bind(&hospital.address)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| crate::map_unique_violation(e, "hospital name already exists"))?;

    Ok(Hospital {
        id,
        name,
        address: hospital.address,
        created_at: crate::timestamp_from_seconds(now)?,
    })
}

/// Get all hospitals ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Hospital>> {
    let rows = sqlx::query("SELECT id, name, address, created_at FROM hospitals ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(hospital_from_row).collect()
}

/// Find a hospital by its unique name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Hospital>> {
    let row = sqlx::query("SELECT id, name, address, created_at FROM hospitals WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(hospital_from_row).transpose()
}
