use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash};
use crate::clock;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, ListQuery, mutation_failed, see_other};
use crate::models::audit::AuditAction;
use crate::models::decision::{self, Decision, DecisionForm, DecisionStatus, DisplayStatus, filter};
use crate::models::{meeting, parse_filter};
use crate::templates_structs::{
    ConfirmTemplate, DecisionFormTemplate, DecisionRow, DecisionsListTemplate, PageContext,
    SelectOption, enum_options, filter_options,
};

#[derive(Deserialize)]
pub struct NewDecisionQuery {
    pub meeting_id: Option<i64>,
}

fn snapshot(d: &Decision) -> serde_json::Value {
    serde_json::to_value(d).unwrap_or_default()
}

async fn form_page(
    pool: &PgPool,
    ctx: PageContext,
    decision_id: Option<i64>,
    form: DecisionForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let mut meetings = vec![SelectOption::new("", ctx.t("decisions.noMeeting"), form.meeting_id.is_empty())];
    meetings.extend(meeting::find_all(pool).await?.iter().map(|m| {
        let label = format!("{} ({})", ctx.localized(&m.title, m.title_en.as_deref()), ctx.date(&m.meeting_date));
        SelectOption::new(m.id.to_string(), label, form.meeting_id == m.id.to_string())
    }));
    let statuses = enum_options(&ctx, DecisionStatus::ALL, &form.status);
    render(DecisionFormTemplate { ctx, decision_id, form, meetings, statuses, errors })
}

/// GET /decisions
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");

    let today = clock::today(Utc::now(), &config.utc_offset);
    let decisions = decision::find_all(&pool).await?;
    let status = parse_filter::<DisplayStatus>(Some(&query.status));
    let rows: Vec<DecisionRow> = filter::filter_decisions(&decisions, &query.q, status, today)
        .into_iter()
        .map(|d| DecisionRow::new(d, &ctx, today))
        .collect();

    render(DecisionsListTemplate {
        status_options: filter_options(&ctx, DisplayStatus::ALL, &query.status),
        search: query.q.clone(),
        total: decisions.len(),
        rows,
        ctx,
    })
}

/// GET /decisions/new
pub async fn new_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<NewDecisionQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.create")?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");
    form_page(&pool, ctx, None, DecisionForm::blank(query.meeting_id), vec![]).await
}

/// POST /decisions
pub async fn create(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<DecisionForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.create")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");
    let input = match form.validate(ctx.lang) {
        Ok(input) => input,
        Err(errors) => return form_page(&pool, ctx, None, form, errors).await,
    };

    let id = match decision::create(&pool, &input, auth.user_id).await {
        Ok(id) => id,
        Err(e) => return mutation_failed(&session, e, "/decisions"),
    };

    if let Ok(Some(saved)) = decision::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Create, "decisions")
            .entity(id)
            .new_values(snapshot(&saved));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    set_flash(&session, ctx.t("decisions.createSuccess"));
    Ok(see_other("/decisions"))
}

/// GET /decisions/{id}/edit
pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.edit")?;
    let id = path.into_inner();
    let existing = decision::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");
    form_page(&pool, ctx, Some(id), DecisionForm::from_decision(&existing), vec![]).await
}

/// POST /decisions/{id}
pub async fn update(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<DecisionForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.edit")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = decision::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");
    let input = match form.validate(ctx.lang) {
        Ok(input) => input,
        Err(errors) => return form_page(&pool, ctx, Some(id), form, errors).await,
    };

    if let Err(e) = decision::update(&pool, id, &input).await {
        return mutation_failed(&session, e, "/decisions");
    }

    if let Ok(Some(after)) = decision::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Update, "decisions")
            .entity(id)
            .old(snapshot(&before))
            .new_values(snapshot(&after));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    set_flash(&session, ctx.t("decisions.updateSuccess"));
    Ok(see_other("/decisions"))
}

/// GET /decisions/{id}/delete
pub async fn delete_confirm(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.delete")?;
    let id = path.into_inner();
    let existing = decision::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/decisions");
    render(ConfirmTemplate {
        title: ctx.t("decisions.confirmDelete").to_string(),
        message: ctx.t("decisions.deleteWarning").to_string(),
        detail: format!(
            "{} {}",
            existing.decision_number,
            ctx.localized(&existing.title, existing.title_en.as_deref())
        ),
        action: format!("/decisions/{id}/delete"),
        confirm_label: ctx.t("common.delete").to_string(),
        cancel_url: "/decisions".to_string(),
        danger: true,
        hidden: vec![],
        ctx,
    })
}

/// POST /decisions/{id}/delete
pub async fn delete(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("decisions.delete")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = decision::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    if let Err(e) = decision::delete(&pool, id).await {
        return mutation_failed(&session, e, "/decisions");
    }

    let event = AuditEvent::new(auth.user_id, AuditAction::Delete, "decisions")
        .entity(id)
        .old(snapshot(&before));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, auth.language.t("decisions.deleteSuccess"));
    Ok(see_other("/decisions"))
}
