use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash};
use crate::clock;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, ListQuery, mutation_failed, see_other};
use crate::models::audit::AuditAction;
use crate::models::meeting::{self, Meeting, MeetingForm, MeetingStatus, filter};
use crate::models::decision;
use crate::storage::{MAX_MINUTES_BYTES, MinutesStore, Upload, UploadError, decode_data_uri};
use crate::templates_structs::{
    ConfirmTemplate, DecisionRow, MeetingDetailTemplate, MeetingFormTemplate, MeetingRow,
    MeetingsListTemplate, PageContext, enum_options,
};

fn snapshot(m: &Meeting) -> serde_json::Value {
    serde_json::to_value(m).unwrap_or_default()
}

fn form_page(
    ctx: PageContext,
    meeting_id: Option<i64>,
    form: MeetingForm,
    existing_minutes: Option<String>,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let statuses = enum_options(&ctx, MeetingStatus::ALL, &form.status);
    render(MeetingFormTemplate {
        ctx,
        meeting_id,
        form,
        statuses,
        existing_minutes,
        max_minutes_mb: MAX_MINUTES_BYTES / (1024 * 1024),
        errors,
    })
}

/// Decode an attached file, turning size and format problems into form errors.
fn decode_minutes(form: &MeetingForm, ctx: &PageContext) -> Result<Option<Upload>, Vec<String>> {
    if form.minutes_data.trim().is_empty() {
        return Ok(None);
    }
    match decode_data_uri(&form.minutes_data, &form.minutes_name) {
        Ok(upload) => Ok(Some(upload)),
        Err(UploadError::TooLarge(_)) => Err(vec![ctx.t("meetings.fileTooLarge").to_string()]),
        Err(e) => Err(vec![format!("{}: {e}", ctx.t("meetings.uploadError"))]),
    }
}

/// Second step after the meeting row is saved. A failure here keeps the
/// meeting and reports through the flash.
async fn store_minutes(
    pool: &PgPool,
    store: &MinutesStore,
    session: &Session,
    ctx_lang: crate::i18n::Language,
    meeting_id: i64,
    upload: &Upload,
) -> Option<String> {
    let saved = match store.save(meeting_id, upload, Utc::now().timestamp_millis()).await {
        Ok(url) => meeting::set_minutes_url(pool, meeting_id, Some(&url)).await.map(|_| url),
        Err(e) => Err(AppError::from(e)),
    };
    match saved {
        Ok(url) => Some(url),
        Err(e) => {
            log::error!("Minutes upload for meeting {meeting_id} failed: {e}");
            set_flash(session, format!("{}: {e}", ctx_lang.t("meetings.uploadError")));
            None
        }
    }
}

/// GET /meetings
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");

    let now = Utc::now();
    let meetings = meeting::find_all(&pool).await?;
    let (upcoming, past) = filter::partition(&meetings, &query.q, now);

    render(MeetingsListTemplate {
        upcoming: upcoming.into_iter().map(|m| MeetingRow::new(m, &ctx, now)).collect(),
        past: past.into_iter().map(|m| MeetingRow::new(m, &ctx, now)).collect(),
        search: query.q.clone(),
        ctx,
    })
}

/// GET /meetings/{id}
pub async fn detail(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let id = path.into_inner();
    let meeting = meeting::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    let decisions = decision::find_by_meeting(&pool, id).await?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");
    let now = Utc::now();
    let today = clock::today(now, &config.utc_offset);
    render(MeetingDetailTemplate {
        meeting: MeetingRow::new(&meeting, &ctx, now),
        decisions: decisions.iter().map(|d| DecisionRow::new(d, &ctx, today)).collect(),
        ctx,
    })
}

/// GET /meetings/new
pub async fn new_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.create")?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");
    form_page(ctx, None, MeetingForm::blank(), None, vec![])
}

/// POST /meetings
pub async fn create(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    store: web::Data<MinutesStore>,
    session: Session,
    form: web::Form<MeetingForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.create")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");
    let input = match form.validate(ctx.lang, &config.utc_offset) {
        Ok(input) => input,
        Err(errors) => return form_page(ctx, None, form, None, errors),
    };
    let upload = match decode_minutes(&form, &ctx) {
        Ok(upload) => upload,
        Err(errors) => return form_page(ctx, None, form, None, errors),
    };

    let id = match meeting::create(&pool, &input, auth.user_id).await {
        Ok(id) => id,
        Err(e) => return mutation_failed(&session, e, "/meetings"),
    };
    set_flash(&session, ctx.t("meetings.createSuccess"));

    if let Some(upload) = &upload {
        store_minutes(&pool, &store, &session, ctx.lang, id, upload).await;
    }

    if let Ok(Some(saved)) = meeting::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Create, "meetings")
            .entity(id)
            .new_values(snapshot(&saved));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    Ok(see_other("/meetings"))
}

/// GET /meetings/{id}/edit
pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.edit")?;
    let id = path.into_inner();
    let existing = meeting::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");
    let form = MeetingForm::from_meeting(&existing, &config.utc_offset);
    form_page(ctx, Some(id), form, existing.minutes_url, vec![])
}

/// POST /meetings/{id}
pub async fn update(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    store: web::Data<MinutesStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<MeetingForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.edit")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = meeting::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");

    let input = match form.validate(ctx.lang, &config.utc_offset) {
        Ok(input) => input,
        Err(errors) => return form_page(ctx, Some(id), form, before.minutes_url, errors),
    };
    let upload = match decode_minutes(&form, &ctx) {
        Ok(upload) => upload,
        Err(errors) => return form_page(ctx, Some(id), form, before.minutes_url, errors),
    };

    if let Err(e) = meeting::update(&pool, id, &input).await {
        return mutation_failed(&session, e, "/meetings");
    }
    set_flash(&session, ctx.t("meetings.updateSuccess"));

    if let Some(upload) = &upload {
        store_minutes(&pool, &store, &session, ctx.lang, id, upload).await;
    } else if form.wants_minutes_removed() && before.minutes_url.is_some() {
        if let Err(e) = meeting::set_minutes_url(&pool, id, None).await {
            return mutation_failed(&session, e, "/meetings");
        }
    }

    if let Ok(Some(after)) = meeting::find_by_id(&pool, id).await {
        let event = AuditEvent::new(auth.user_id, AuditAction::Update, "meetings")
            .entity(id)
            .old(snapshot(&before))
            .new_values(snapshot(&after));
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }

    Ok(see_other("/meetings"))
}

/// GET /meetings/{id}/delete
pub async fn delete_confirm(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.delete")?;
    let id = path.into_inner();
    let existing = meeting::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/meetings");
    render(ConfirmTemplate {
        title: ctx.t("meetings.confirmDelete").to_string(),
        message: ctx.t("meetings.deleteWarning").to_string(),
        detail: ctx.localized(&existing.title, existing.title_en.as_deref()),
        action: format!("/meetings/{id}/delete"),
        confirm_label: ctx.t("common.delete").to_string(),
        cancel_url: "/meetings".to_string(),
        danger: true,
        hidden: vec![],
        ctx,
    })
}

/// POST /meetings/{id}/delete
pub async fn delete(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("meetings.delete")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let before = meeting::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    if let Err(e) = meeting::delete(&pool, id).await {
        return mutation_failed(&session, e, "/meetings");
    }

    let event = AuditEvent::new(auth.user_id, AuditAction::Delete, "meetings")
        .entity(id)
        .old(snapshot(&before));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, auth.language.t("meetings.deleteSuccess"));
    Ok(see_other("/meetings"))
}
