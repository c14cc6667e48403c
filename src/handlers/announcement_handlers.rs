use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, ListQuery, mutation_failed, see_other};
use crate::models::announcement::{self, Announcement, AnnouncementCategory, AnnouncementForm, filter};
use crate::models::audit::AuditAction;
use crate::models::{Priority, parse_filter};
use crate::templates_structs::{
    AnnouncementFormTemplate, AnnouncementRow, AnnouncementsListTemplate, ConfirmTemplate, PageContext,
    enum_options, filter_options,
};

fn snapshot(a: &Announcement) -> serde_json::Value {
    serde_json::to_value(a).unwrap_or_default()
}

fn form_page(
    ctx: PageContext,
    announcement_id: Option<i64>,
    form: AnnouncementForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(AnnouncementFormTemplate {
        categories: enum_options(&ctx, AnnouncementCategory::ALL, &form.category),
        priorities: enum_options(&ctx, Priority::ALL, &form.priority),
        ctx,
        announcement_id,
        form,
        errors,
    })
}

/// GET /announcements
/// Expired announcements are hidden from everyone.
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");

    let now = Utc::now();
    let announcements = announcement::find_all(&pool).await?;
    let category = parse_filter::<AnnouncementCategory>(Some(&query.category));
    let rows: Vec<AnnouncementRow> =
        filter::filter_announcements(&announcements, &query.q, category, ctx.lang, now)
            .into_iter()
            .map(|a| AnnouncementRow::new(a, &ctx))
            .collect();

    render(AnnouncementsListTemplate {
        stats: filter::stats(&announcements, now, &config.utc_offset),
        category_options: filter_options(&ctx, AnnouncementCategory::ALL, &query.category),
        search: query.q.clone(),
        rows,
        ctx,
    })
}

/// GET /announcements/new
pub async fn new_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.create")?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");
    form_page(ctx, None, AnnouncementForm::blank(Utc::now(), &config.utc_offset), vec![])
}

/// POST /announcements
pub async fn create(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<AnnouncementForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.create")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");
    let input = match form.validate(ctx.lang, &config.utc_offset, Utc::now()) {
        Ok(input) => input,
        Err(errors) => return form_page(ctx, None, form, errors),
    };

    let id = match announcement::create(&pool, &input, auth.user_id).await {
        Ok(id) => id,
        Err(e) => return mutation_failed(&session, e, "/announcements"),
    };

    if let Ok(Some(saved)) = announcement::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Create, "announcements")
            .entity(id)
            .new_values(snapshot(&saved));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    set_flash(&session, ctx.t("announcements.createSuccess"));
    Ok(see_other("/announcements"))
}

/// GET /announcements/{id}/edit
pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.edit")?;
    let id = path.into_inner();
    let existing = announcement::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");
    let form = AnnouncementForm::from_announcement(&existing, &config.utc_offset);
    form_page(ctx, Some(id), form, vec![])
}

/// POST /announcements/{id}
pub async fn update(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AnnouncementForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.edit")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = announcement::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");
    let input = match form.validate(ctx.lang, &config.utc_offset, Utc::now()) {
        Ok(input) => input,
        Err(errors) => return form_page(ctx, Some(id), form, errors),
    };

    if let Err(e) = announcement::update(&pool, id, &input).await {
        return mutation_failed(&session, e, "/announcements");
    }

    if let Ok(Some(after)) = announcement::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Update, "announcements")
            .entity(id)
            .old(snapshot(&before))
            .new_values(snapshot(&after));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    set_flash(&session, ctx.t("announcements.updateSuccess"));
    Ok(see_other("/announcements"))
}

/// GET /announcements/{id}/delete
pub async fn delete_confirm(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.delete")?;
    let id = path.into_inner();
    let existing = announcement::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/announcements");
    render(ConfirmTemplate {
        title: ctx.t("announcements.confirmDelete").to_string(),
        message: ctx.t("announcements.deleteWarning").to_string(),
        detail: ctx.localized(&existing.title, existing.title_en.as_deref()),
        action: format!("/announcements/{id}/delete"),
        confirm_label: ctx.t("common.delete").to_string(),
        cancel_url: "/announcements".to_string(),
        danger: true,
        hidden: vec![],
        ctx,
    })
}

/// POST /announcements/{id}/delete
pub async fn delete(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("announcements.delete")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = announcement::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    if let Err(e) = announcement::delete(&pool, id).await {
        return mutation_failed(&session, e, "/announcements");
    }

    let event = AuditEvent::new(auth.user_id, AuditAction::Delete, "announcements")
        .entity(id)
        .old(snapshot(&before));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, auth.language.t("announcements.deleteSuccess"));
    Ok(see_other("/announcements"))
}
