/*
 * Responsibility
 * - SQLx operations for the users table
 * - Takes a PgPool, returns rows in a shape that converts cleanly to
 *   RepoError/AppError upstream
 *
 * Expected schema:
 *   users(user_id uuid pk default gen_random_uuid(),
 *         user_name text unique, display_name text, email text null,
 *         role text, status text, password_digest text, salt text,
 *         created_at timestamptz default now())
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub user_name: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: String,
    pub status: String,
}

/// Credential fields stay out of `UserRow` so they never leak into listings.
#[derive(Debug, FromRow)]
pub struct CredentialRow {
    pub user_id: Uuid,
    pub user_name: String,
    pub display_name: String,
    pub role: String,
    pub status: String,
    pub password_digest: String,
    pub salt: String,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT user_id, user_name, display_name, email, role, status
        FROM users
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn find_by_username(db: &PgPool, user_name: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT user_id, user_name, display_name, email, role, status
        FROM users
        WHERE lower(user_name) = lower($1)
        "#,
    )
    .bind(user_name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT user_id, user_name, display_name, email, role, status
        FROM users
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_credentials(db: &PgPool, user_name: &str) -> RepoResult<Option<CredentialRow>> {
    let row = sqlx::query_as::<_, CredentialRow>(
        r#"
        SELECT user_id, user_name, display_name, role, status, password_digest, salt
        FROM users
        WHERE lower(user_name) = lower($1)
        "#,
    )
    .bind(user_name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// New accounts always start as pending makers; role and approval are
/// administrative actions, never self-service.
pub async fn create_pending(
    db: &PgPool,
    user_name: &str,
    display_name: &str,
    email: Option<&str>,
    password_digest: &str,
    salt: &str,
) -> RepoResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (user_name, display_name, email, role, status, password_digest, salt)
        VALUES ($1, $2, $3, 'maker', 'pending', $4, $5)
        RETURNING user_id, user_name, display_name, email, role, status
        "#,
    )
    .bind(user_name)
    .bind(display_name)
    .bind(email)
    .bind(password_digest)
    .bind(salt)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn approve(db: &PgPool, user_id: Uuid, role: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET role = $2, status = 'approved'
        WHERE user_id = $1
        RETURNING user_id, user_name, display_name, email, role, status
        "#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
