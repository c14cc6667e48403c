use sqlx::PgPool;

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::role::{AppRole, RoleSet};
use super::types::*;

const SELECT_PROFILE: &str = "\
    SELECT id, user_id, full_name, email, phone, department, position, avatar_url, \
           preferred_language, created_at, updated_at \
    FROM profiles";

/// Account, profile and the default `staff` role in one transaction.
pub async fn create_account(pool: &PgPool, account: &NewAccount) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO accounts (email, password_hash, email_verified, verification_token) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.email_verified)
    .bind(&account.verification_token)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO profiles (user_id, full_name, email, preferred_language) VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&account.full_name)
    .bind(&account.email)
    .bind(account.language.code())
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
        .bind(user_id)
        .bind(AppRole::Staff.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE LOWER(email) = LOWER($1))")
            .bind(email.trim())
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn find_credentials(pool: &PgPool, email: &str) -> Result<Option<Credentials>, AppError> {
    let creds = sqlx::query_as::<_, Credentials>(
        "SELECT id AS user_id, password_hash, email_verified \
         FROM accounts WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;
    Ok(creds)
}

/// Mark the account owning `token` as verified. `None` for an unknown token.
pub async fn verify_email(pool: &PgPool, token: &str) -> Result<Option<i64>, AppError> {
    let user_id = sqlx::query_scalar::<_, i64>(
        "UPDATE accounts SET email_verified = TRUE, verification_token = NULL, updated_at = NOW() \
         WHERE verification_token = $1 RETURNING id",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(user_id)
}

pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Option<Profile>, AppError> {
    let profile = sqlx::query_as::<_, Profile>(&format!("{SELECT_PROFILE} WHERE user_id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn find_roles(pool: &PgPool, user_id: i64) -> Result<RoleSet, AppError> {
    let codes: Vec<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(RoleSet::new(codes.iter().filter_map(|c| c.parse().ok()).collect()))
}

pub async fn update(pool: &PgPool, user_id: i64, update: &ProfileUpdate) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE profiles SET full_name = $1, phone = $2, department = $3, position = $4, updated_at = NOW() \
         WHERE user_id = $5",
    )
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.department)
    .bind(&update.position)
    .bind(user_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn update_language(pool: &PgPool, user_id: i64, lang: Language) -> Result<(), AppError> {
    sqlx::query("UPDATE profiles SET preferred_language = $1, updated_at = NOW() WHERE user_id = $2")
        .bind(lang.code())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Every profile with its role set, ordered by name.
pub async fn list_with_roles(pool: &PgPool) -> Result<Vec<UserWithRoles>, AppError> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        profile: Profile,
        roles: String,
    }

    let rows = sqlx::query_as::<_, Row>(
        "SELECT p.id, p.user_id, p.full_name, p.email, p.phone, p.department, p.position, \
                p.avatar_url, p.preferred_language, p.created_at, p.updated_at, \
                COALESCE(STRING_AGG(r.role, ',' ORDER BY r.role), '') AS roles \
         FROM profiles p \
         LEFT JOIN user_roles r ON r.user_id = p.user_id \
         GROUP BY p.id \
         ORDER BY p.full_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UserWithRoles {
            roles: RoleSet::from_csv(&row.roles),
            profile: row.profile,
        })
        .collect())
}

/// Replace a user's roles with exactly `role`. Returns the previous set.
pub async fn replace_role(pool: &PgPool, user_id: i64, role: AppRole) -> Result<RoleSet, AppError> {
    let mut tx = pool.begin().await?;

    let previous: Vec<String> =
        sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await?;

    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(RoleSet::new(previous.iter().filter_map(|c| c.parse().ok()).collect()))
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
