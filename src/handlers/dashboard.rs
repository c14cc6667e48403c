use actix_session::Session;
use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use crate::auth::session::AuthContext;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::dashboard;
use crate::templates_structs::{AnnouncementRow, ComplaintRow, DashboardTemplate, PageContext};

/// GET /dashboard
/// Staff see only their own complaint figures.
pub async fn index(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let data = dashboard::load(&pool, auth.complaint_scope()).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/dashboard");

    render(DashboardTemplate {
        announcements: data.announcements.iter().map(|a| AnnouncementRow::new(a, &ctx)).collect(),
        complaints: data.complaints.iter().map(|c| ComplaintRow::new(c, &ctx)).collect(),
        counts: data.counts,
        ctx,
    })
}
