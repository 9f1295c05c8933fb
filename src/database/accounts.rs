//! Account repository. Uniqueness of username and email is enforced both by
//! a pre-insert lookup (which drives the specific conflict message) and by
//! the database unique constraints (which close the race window).

use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{unique_violation, DatabaseError};
use super::models::Account;

#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_pic: String,
}

pub async fn insert(pool: &PgPool, new: NewAccount) -> Result<Account, DatabaseError> {
    let result = sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, email, password_hash, profile_pic) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&new.username)
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(&new.profile_pic)
    .fetch_one(pool)
    .await;

    result.map_err(|e| match unique_violation(&e) {
        Some(constraint) if constraint.contains("email") => {
            DatabaseError::UniqueViolation("Email already exists.".to_string())
        }
        Some(_) => DatabaseError::UniqueViolation("Username already taken.".to_string()),
        None => DatabaseError::Sqlx(e),
    })
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, DatabaseError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(account)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, DatabaseError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(account)
}

/// Lookup used by signup to report which of the two unique fields collides.
pub async fn find_by_email_or_username(
    pool: &PgPool,
    email: &str,
    username: &str,
) -> Result<Option<Account>, DatabaseError> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT * FROM accounts WHERE email = $1 OR username = $2 LIMIT 1",
    )
    .bind(email)
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

/// Partial profile update: only the supplied fields change.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    username: Option<&str>,
    profile_pic: Option<&str>,
) -> Result<Option<Account>, DatabaseError> {
    let result = match (username, profile_pic) {
        (Some(username), Some(pic)) => {
            sqlx::query_as::<_, Account>(
                "UPDATE accounts SET username = $1, profile_pic = $2, updated_at = now() \
                 WHERE id = $3 RETURNING *",
            )
            .bind(username)
            .bind(pic)
            .bind(id)
            .fetch_optional(pool)
            .await
        }
        (Some(username), None) => {
            sqlx::query_as::<_, Account>(
                "UPDATE accounts SET username = $1, updated_at = now() \
                 WHERE id = $2 RETURNING *",
            )
            .bind(username)
            .bind(id)
            .fetch_optional(pool)
            .await
        }
        (None, Some(pic)) => {
            sqlx::query_as::<_, Account>(
                "UPDATE accounts SET profile_pic = $1, updated_at = now() \
                 WHERE id = $2 RETURNING *",
            )
            .bind(pic)
            .bind(id)
            .fetch_optional(pool)
            .await
        }
        (None, None) => return find_by_id(pool, id).await,
    };

    result.map_err(|e| match unique_violation(&e) {
        Some(_) => DatabaseError::UniqueViolation("Username already taken.".to_string()),
        None => DatabaseError::Sqlx(e),
    })
}

/// Delete the account. The todos FK cascades, so the account's items go
/// with it.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
