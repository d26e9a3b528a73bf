//! User management and authentication queries

use medibook_core::{
    error::Result,
    types::{Address, NewUser, ProfileUpdate, User, UserId},
    BookingError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str =
    "id, name, email, image, phone, address, gender, dob, created_at";

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let address: Address = serde_json::from_str(&row.get::<String, _>("address"))?;

    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        image: row.get("image"),
        phone: row.get("phone"),
        address,
        gender: row.get("gender"),
        dob: row.get("dob"),
        created_at: crate::timestamp_from_seconds(row.get("created_at"))?,
    })
}

/// Insert a new user and its credentials
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `new_user` - Name and email
/// * `password_hash` - Hashed password (should already be hashed with bcrypt)
pub async fn create(pool: &SqlitePool, new_user: NewUser, password_hash: &str) -> Result<User> {
    let user = new_user.into_user();
    let address = serde_json::to_string(&user.address)?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, image, phone, address, gender, dob, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.image)
    .bind(&user.phone)
    .bind(&address)
    .bind(&user.gender)
    .bind(&user.dob)
    .bind(user.created_at.timestamp())
    .execute(&mut *tx)
    .await
    .map_err(|e| crate::map_unique_violation(e, "email already registered"))?;

    sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES (?, ?)")
        .bind(&user.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Find a user by login email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user's password hash for authentication
///
/// Returns `None` if the user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM user_credentials WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(hash)
}

/// Create or update user credentials
pub async fn set_password_hash(
    pool: &SqlitePool,
    user_id: &UserId,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = datetime('now')",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite the editable profile fields
pub async fn update_profile(pool: &SqlitePool, id: &UserId, update: ProfileUpdate) -> Result<()> {
    let address = serde_json::to_string(&update.address)?;

    let result = sqlx::query(
        "UPDATE users SET name = ?, phone = ?, address = ?, dob = ?, gender = ? WHERE id = ?",
    )
    .bind(&update.name)
    .bind(&update.phone)
    .bind(&address)
    .bind(&update.dob)
    .bind(&update.gender)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BookingError::not_found("User", id.as_str()));
    }

    Ok(())
}

/// Set the profile image reference
pub async fn set_image(pool: &SqlitePool, id: &UserId, image: &str) -> Result<()> {
    let result = sqlx::query("UPDATE users SET image = ? WHERE id = ?")
        .bind(image)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BookingError::not_found("User", id.as_str()));
    }

    Ok(())
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}
