use sqlx::PgPool;

use crate::errors::AppError;
use super::types::*;

const SELECT_MEETING: &str = "\
    SELECT id, title, title_en, description, description_en, meeting_date, location, \
           status, minutes_url, created_by, created_at, updated_at \
    FROM meetings";

/// Newest meeting date first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Meeting>, AppError> {
    let meetings = sqlx::query_as::<_, Meeting>(&format!("{SELECT_MEETING} ORDER BY meeting_date DESC"))
        .fetch_all(pool)
        .await?;
    Ok(meetings)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Meeting>, AppError> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!("{SELECT_MEETING} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(meeting)
}

pub async fn create(pool: &PgPool, input: &MeetingInput, created_by: i64) -> Result<i64, AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO meetings (title, title_en, description, description_en, meeting_date, location, status, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.description)
    .bind(&input.description_en)
    .bind(input.meeting_date)
    .bind(&input.location)
    .bind(input.status.as_str())
    .bind(created_by)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i64, input: &MeetingInput) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE meetings SET title = $1, title_en = $2, description = $3, description_en = $4, \
                meeting_date = $5, location = $6, status = $7, updated_at = NOW() \
         WHERE id = $8",
    )
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.description)
    .bind(&input.description_en)
    .bind(input.meeting_date)
    .bind(&input.location)
    .bind(input.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Set or clear the minutes reference. Clearing leaves the stored file alone.
pub async fn set_minutes_url(pool: &PgPool, id: i64, url: Option<&str>) -> Result<(), AppError> {
    sqlx::query("UPDATE meetings SET minutes_url = $1, updated_at = NOW() WHERE id = $2")
        .bind(url)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Linked decisions go with it (ON DELETE CASCADE).
pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Meetings still in `scheduled` status, whatever their date.
pub async fn count_scheduled(pool: &PgPool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings WHERE status = 'scheduled'")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
