use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::announcement::{self, Announcement};
use crate::models::complaint::{self, Complaint};
use crate::models::{decision, meeting, profile};

pub const RECENT_ANNOUNCEMENTS: i64 = 3;
pub const RECENT_COMPLAINTS: i64 = 5;

#[derive(Debug, Clone, Default)]
pub struct DashboardCounts {
    pub total_staff: i64,
    pub pending_complaints: i64,
    pub scheduled_meetings: i64,
    pub total_decisions: i64,
}

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub counts: DashboardCounts,
    pub announcements: Vec<Announcement>,
    pub complaints: Vec<Complaint>,
}

/// All dashboard queries issued concurrently. `complaint_scope` limits the
/// complaint figures to one submitter for non-admins.
pub async fn load(
    pool: &PgPool,
    complaint_scope: Option<i64>,
) -> Result<DashboardData, AppError> {
    let (total_staff, pending_complaints, scheduled_meetings, total_decisions, announcements, complaints) = tokio::try_join!(
        profile::count(pool),
        complaint::count_pending(pool, complaint_scope),
        meeting::count_scheduled(pool),
        decision::count(pool),
        announcement::find_recent_active(pool, RECENT_ANNOUNCEMENTS),
        complaint::find_visible(pool, complaint_scope, Some(RECENT_COMPLAINTS)),
    )?;

    Ok(DashboardData {
        counts: DashboardCounts {
            total_staff,
            pending_complaints,
            scheduled_meetings,
            total_decisions,
        },
        announcements,
        complaints,
    })
}
