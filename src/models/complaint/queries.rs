use sqlx::PgPool;

use crate::errors::AppError;
use super::types::*;

const SELECT_COMPLAINT: &str = "\
    SELECT c.id, c.reference_number, c.type, c.category, c.subject, c.description, c.priority, \
           c.status, c.resolution, c.resolved_at, c.resolved_by, c.submitted_by, \
           c.created_at, c.updated_at, p.full_name AS submitter_name \
    FROM complaints c \
    LEFT JOIN profiles p ON p.user_id = c.submitted_by";

/// New complaint in `pending` with a generated reference number.
/// Returns `(id, reference_number)`.
pub async fn create(
    pool: &PgPool,
    input: &ComplaintInput,
    submitted_by: i64,
    year: i32,
) -> Result<(i64, String), AppError> {
    let seq: i64 = sqlx::query_scalar("SELECT nextval('complaint_reference_seq')")
        .fetch_one(pool)
        .await?;
    let reference = format_reference(input.kind, year, seq);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO complaints (reference_number, type, category, subject, description, priority, status, submitted_by) \
         VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7) RETURNING id",
    )
    .bind(&reference)
    .bind(input.kind.as_str())
    .bind(input.category.as_str())
    .bind(&input.subject)
    .bind(&input.description)
    .bind(input.priority.as_str())
    .bind(submitted_by)
    .fetch_one(pool)
    .await?;

    Ok((id, reference))
}

/// Newest first. `submitted_by = None` returns every complaint.
pub async fn find_visible(
    pool: &PgPool,
    submitted_by: Option<i64>,
    limit: Option<i64>,
) -> Result<Vec<Complaint>, AppError> {
    let rows = sqlx::query_as::<_, Complaint>(&format!(
        "{SELECT_COMPLAINT} \
         WHERE ($1::BIGINT IS NULL OR c.submitted_by = $1) \
         ORDER BY c.created_at DESC \
         LIMIT $2"
    ))
    .bind(submitted_by)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Complaint>, AppError> {
    let row = sqlx::query_as::<_, Complaint>(&format!("{SELECT_COMPLAINT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Status, resolution, `resolved_at` and `resolved_by` in one statement.
/// Returns `false` when the row was already closed.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: ComplaintStatus,
    resolution: Option<&str>,
    actor: i64,
) -> Result<bool, AppError> {
    let terminal = status.is_terminal();
    let result = sqlx::query(
        "UPDATE complaints SET status = $1, \
                resolution = COALESCE($2, resolution), \
                resolved_at = CASE WHEN $3 THEN NOW() ELSE NULL END, \
                resolved_by = CASE WHEN $3 THEN $4 ELSE NULL END, \
                updated_at = NOW() \
         WHERE id = $5 AND status NOT IN ('resolved', 'rejected')",
    )
    .bind(status.as_str())
    .bind(resolution)
    .bind(terminal)
    .bind(actor)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn count_pending(pool: &PgPool, submitted_by: Option<i64>) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM complaints \
         WHERE status = 'pending' AND ($1::BIGINT IS NULL OR submitted_by = $1)",
    )
    .bind(submitted_by)
    .fetch_one(pool)
    .await?;
    Ok(n)
}
