//! Read-only JSON for the signed-in user. Same visibility rules as the pages.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::session::AuthContext;
use crate::clock;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{announcement, complaint, decision, meeting};
use crate::templates_structs::api::{ApiAnnouncement, ApiComplaint, ApiDecision, ApiMeeting};

/// GET /api/v1/meetings
pub async fn meetings(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let now = Utc::now();
    let body: Vec<ApiMeeting> = meeting::find_all(&pool)
        .await?
        .iter()
        .map(|m| ApiMeeting::new(m, auth.language, now))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/decisions
pub async fn decisions(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let today = clock::today(Utc::now(), &config.utc_offset);
    let body: Vec<ApiDecision> = decision::find_all(&pool)
        .await?
        .iter()
        .map(|d| ApiDecision::new(d, auth.language, today))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/announcements
/// Active only, pinned first.
pub async fn announcements(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let all = announcement::find_all(&pool).await?;
    let body: Vec<ApiAnnouncement> = announcement::filter::active_sorted(&all, Utc::now())
        .into_iter()
        .map(|a| ApiAnnouncement::new(a, auth.language))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/complaints
pub async fn complaints(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let body: Vec<ApiComplaint> = complaint::find_visible(&pool, auth.complaint_scope(), None)
        .await?
        .iter()
        .map(ApiComplaint::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}
