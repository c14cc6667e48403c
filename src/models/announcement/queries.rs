use sqlx::PgPool;

use crate::errors::AppError;
use super::types::*;

const SELECT_ANNOUNCEMENT: &str = "\
    SELECT id, title, title_en, content, content_en, category, priority, is_pinned, \
           published_at, expires_at, created_by, created_at, updated_at \
    FROM announcements";

/// Every announcement, expired ones included; pinned first, then newest.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Announcement>, AppError> {
    let rows = sqlx::query_as::<_, Announcement>(&format!(
        "{SELECT_ANNOUNCEMENT} ORDER BY is_pinned DESC, published_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Announcement>, AppError> {
    let row = sqlx::query_as::<_, Announcement>(&format!("{SELECT_ANNOUNCEMENT} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Newest unexpired announcements, for the dashboard.
pub async fn find_recent_active(pool: &PgPool, limit: i64) -> Result<Vec<Announcement>, AppError> {
    let rows = sqlx::query_as::<_, Announcement>(&format!(
        "{SELECT_ANNOUNCEMENT} \
         WHERE expires_at IS NULL OR expires_at > NOW() \
         ORDER BY is_pinned DESC, published_at DESC \
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &PgPool, input: &AnnouncementInput, created_by: i64) -> Result<i64, AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO announcements (title, title_en, content, content_en, category, priority, is_pinned, \
                                    published_at, expires_at, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.content)
    .bind(&input.content_en)
    .bind(input.category.as_str())
    .bind(input.priority.as_str())
    .bind(input.is_pinned)
    .bind(input.published_at)
    .bind(input.expires_at)
    .bind(created_by)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i64, input: &AnnouncementInput) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE announcements SET title = $1, title_en = $2, content = $3, content_en = $4, \
                category = $5, priority = $6, is_pinned = $7, published_at = $8, expires_at = $9, \
                updated_at = NOW() \
         WHERE id = $10",
    )
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.content)
    .bind(&input.content_en)
    .bind(input.category.as_str())
    .bind(input.priority.as_str())
    .bind(input.is_pinned)
    .bind(input.published_at)
    .bind(input.expires_at)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
