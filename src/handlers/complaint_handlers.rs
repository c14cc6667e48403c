use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Datelike, Utc};
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash};
use crate::auth::validate::non_empty;
use crate::clock;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{ListQuery, mutation_failed, see_other};
use crate::models::audit::AuditAction;
use crate::models::complaint::{
    self, Complaint, ComplaintCategory, ComplaintForm, ComplaintStatus, ComplaintType, StatusForm,
    filter::{self, ComplaintFilter},
    validate_status_update,
};
use crate::models::{Priority, parse_filter};
use crate::templates_structs::{
    ComplaintDetailTemplate, ComplaintFormTemplate, ComplaintRow, ComplaintsListTemplate,
    PageContext, enum_options, filter_options,
};

/// Non-admins may only open complaints they submitted.
fn ensure_visible(auth: &AuthContext, c: &Complaint) -> Result<(), AppError> {
    match auth.complaint_scope() {
        Some(user_id) if c.submitted_by != Some(user_id) => Err(AppError::NotFound),
        _ => Ok(()),
    }
}

fn form_page(ctx: PageContext, form: ComplaintForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    render(ComplaintFormTemplate {
        types: enum_options(&ctx, ComplaintType::ALL, &form.kind),
        categories: enum_options(&ctx, ComplaintCategory::ALL, &form.category),
        priorities: enum_options(&ctx, Priority::ALL, &form.priority),
        ctx,
        form,
        errors,
    })
}

fn detail_page(
    ctx: PageContext,
    c: &Complaint,
    resolution: String,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let can_update = ctx.is_admin && !c.status.is_terminal();
    render(ComplaintDetailTemplate {
        complaint: ComplaintRow::new(c, &ctx),
        can_update,
        status_options: enum_options(&ctx, ComplaintStatus::ALL, c.status.as_str()),
        resolution,
        errors,
        ctx,
    })
}

/// GET /complaints
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/complaints");

    let complaints = complaint::find_visible(&pool, auth.complaint_scope(), None).await?;
    let criteria = ComplaintFilter {
        search: query.q.clone(),
        status: parse_filter(Some(&query.status)),
        kind: parse_filter(Some(&query.kind)),
    };
    let rows: Vec<ComplaintRow> = filter::filter_complaints(&complaints, &criteria)
        .into_iter()
        .map(|c| ComplaintRow::new(c, &ctx))
        .collect();

    render(ComplaintsListTemplate {
        stats: filter::stats(&complaints),
        status_options: filter_options(&ctx, ComplaintStatus::ALL, &query.status),
        type_options: filter_options(&ctx, ComplaintType::ALL, &query.kind),
        search: query.q.clone(),
        rows,
        ctx,
    })
}

/// GET /complaints/new
pub async fn new_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/complaints");
    form_page(ctx, ComplaintForm::blank(), vec![])
}

/// POST /complaints
/// Any signed-in user may submit.
pub async fn create(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<ComplaintForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/complaints");
    let input = match form.validate(ctx.lang) {
        Ok(input) => input,
        Err(errors) => return form_page(ctx, form, errors),
    };

    let year = clock::today(Utc::now(), &config.utc_offset).year();
    let (id, reference) = match complaint::create(&pool, &input, auth.user_id, year).await {
        Ok(created) => created,
        Err(e) => return mutation_failed(&session, e, "/complaints"),
    };

    let event = AuditEvent::new(auth.user_id, AuditAction::Create, "complaints")
        .entity(id)
        .new_values(serde_json::json!({
            "reference_number": reference,
            "type": input.kind,
            "category": input.category,
            "subject": input.subject,
            "priority": input.priority,
            "status": ComplaintStatus::Pending,
        }));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, format!("{} ({reference})", ctx.t("complaints.submitSuccess")));
    Ok(see_other("/complaints"))
}

/// GET /complaints/{id}
pub async fn detail(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let c = complaint::find_by_id(&pool, path.into_inner()).await?.ok_or(AppError::NotFound)?;
    ensure_visible(&auth, &c)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/complaints");
    let resolution = c.resolution.clone().unwrap_or_default();
    detail_page(ctx, &c, resolution, vec![])
}

/// POST /complaints/{id}/status
pub async fn update_status(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("complaints.update_status")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = complaint::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/complaints");

    let next = match form.status.parse::<ComplaintStatus>() {
        Ok(status) => status,
        Err(e) => return detail_page(ctx, &before, form.resolution.clone(), vec![e.to_string()]),
    };
    if let Err(refused) = validate_status_update(before.status, next, &form.resolution) {
        let message = ctx.t(refused.message_key()).to_string();
        return detail_page(ctx, &before, form.resolution.clone(), vec![message]);
    }

    let resolution = non_empty(&form.resolution);
    let updated = match complaint::update_status(&pool, id, next, resolution.as_deref(), auth.user_id).await {
        Ok(updated) => updated,
        Err(e) => return mutation_failed(&session, e, &format!("/complaints/{id}")),
    };
    if !updated {
        // Closed by someone else in the meantime.
        let message = ctx.t("complaints.alreadyClosed").to_string();
        return detail_page(ctx, &before, form.resolution.clone(), vec![message]);
    }

    let event = AuditEvent::new(auth.user_id, AuditAction::Update, "complaints")
        .entity(id)
        .old(serde_json::json!({ "status": before.status, "resolution": before.resolution }))
        .new_values(serde_json::json!({ "status": next, "resolution": resolution }));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, ctx.t("complaints.statusUpdated"));
    Ok(see_other(&format!("/complaints/{id}")))
}
