use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash, set_language};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{mutation_failed, see_other};
use crate::i18n::Language;
use crate::models::audit::AuditAction;
use crate::models::profile::{self, LanguageForm, ProfileForm};
use crate::templates_structs::{PageContext, ProfileTemplate, SelectOption};

/// Only same-site paths are followed after a language switch.
fn safe_next(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') {
        next
    } else {
        "/"
    }
}

fn language_options(ctx: &PageContext) -> Vec<SelectOption> {
    [Language::Ms, Language::En]
        .into_iter()
        .map(|l| {
            SelectOption::new(l.code(), ctx.t(&format!("language.{}", l.code())).to_string(), l == ctx.lang)
        })
        .collect()
}

fn profile_page(
    ctx: PageContext,
    auth: &AuthContext,
    form: ProfileForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(ProfileTemplate {
        email: auth.profile.email.clone(),
        role_label: ctx.role_label.clone(),
        member_since: ctx.date(&auth.profile.created_at),
        languages: language_options(&ctx),
        full_name: form.full_name,
        phone: form.phone,
        department: form.department,
        position: form.position,
        errors,
        ctx,
    })
}

/// GET /profile
pub async fn show(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/profile");
    let form = ProfileForm::from_profile(&auth.profile);
    profile_page(ctx, &auth, form, vec![])
}

/// POST /profile
pub async fn update(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let form = form.into_inner();
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/profile");
    let changes = match form.validate(ctx.lang) {
        Ok(changes) => changes,
        Err(errors) => return profile_page(ctx, &auth, form, errors),
    };

    if let Err(e) = profile::update(&pool, auth.user_id, &changes).await {
        log::error!("Profile update for user {} failed: {e}", auth.user_id);
        return mutation_failed(&session, e, "/profile");
    }

    let before = &auth.profile;
    let event = AuditEvent::new(auth.user_id, AuditAction::Update, "profiles")
        .entity(before.id)
        .old(serde_json::json!({
            "full_name": before.full_name,
            "phone": before.phone,
            "department": before.department,
            "position": before.position,
        }))
        .new_values(serde_json::json!({
            "full_name": changes.full_name,
            "phone": changes.phone,
            "department": changes.department,
            "position": changes.position,
        }));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    set_flash(&session, ctx.t("profile.updateSuccess"));
    Ok(see_other("/profile"))
}

/// POST /profile/language
/// Stores the preference on the profile and switches the current session.
pub async fn update_language(
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<LanguageForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(lang) = Language::from_code(&form.language) else {
        return Ok(see_other("/profile"));
    };
    if let Err(e) = profile::update_language(&pool, auth.user_id, lang).await {
        return mutation_failed(&session, e, "/profile");
    }
    set_language(&session, lang);
    set_flash(&session, lang.t("profile.languageUpdateSuccess"));
    Ok(see_other("/profile"))
}

/// POST /language
/// Header toggle, also available before sign-in. Session only.
pub async fn switch_language(session: Session, form: web::Form<LanguageForm>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(lang) = Language::from_code(&form.language) {
        set_language(&session, lang);
    }
    Ok(see_other(safe_next(&form.next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next("/meetings?q=x"), "/meetings?q=x");
        assert_eq!(safe_next("https://evil.example"), "/");
        assert_eq!(safe_next("//evil.example"), "/");
        assert_eq!(safe_next("/\\evil.example"), "/");
        assert_eq!(safe_next(""), "/");
    }
}
