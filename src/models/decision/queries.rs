use sqlx::PgPool;

use crate::errors::AppError;
use super::types::*;

const SELECT_DECISION: &str = "\
    SELECT d.id, d.meeting_id, d.decision_number, d.title, d.title_en, d.description, \
           d.description_en, d.responsible_party, d.due_date, d.status, d.created_by, \
           d.created_at, d.updated_at, \
           m.title AS meeting_title, m.title_en AS meeting_title_en \
    FROM decisions d \
    LEFT JOIN meetings m ON m.id = d.meeting_id";

/// Newest first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Decision>, AppError> {
    let rows = sqlx::query_as::<_, Decision>(&format!("{SELECT_DECISION} ORDER BY d.created_at DESC"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_meeting(pool: &PgPool, meeting_id: i64) -> Result<Vec<Decision>, AppError> {
    let rows = sqlx::query_as::<_, Decision>(&format!(
        "{SELECT_DECISION} WHERE d.meeting_id = $1 ORDER BY d.decision_number"
    ))
    .bind(meeting_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Decision>, AppError> {
    let row = sqlx::query_as::<_, Decision>(&format!("{SELECT_DECISION} WHERE d.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &DecisionInput, created_by: i64) -> Result<i64, AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO decisions (meeting_id, decision_number, title, title_en, description, description_en, \
                                responsible_party, due_date, status, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(input.meeting_id)
    .bind(&input.decision_number)
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.description)
    .bind(&input.description_en)
    .bind(&input.responsible_party)
    .bind(input.due_date)
    .bind(input.status.as_str())
    .bind(created_by)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i64, input: &DecisionInput) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE decisions SET meeting_id = $1, decision_number = $2, title = $3, title_en = $4, \
                description = $5, description_en = $6, responsible_party = $7, due_date = $8, \
                status = $9, updated_at = NOW() \
         WHERE id = $10",
    )
    .bind(input.meeting_id)
    .bind(&input.decision_number)
    .bind(&input.title)
    .bind(&input.title_en)
    .bind(&input.description)
    .bind(&input.description_en)
    .bind(&input.responsible_party)
    .bind(input.due_date)
    .bind(input.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM decisions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM decisions")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
