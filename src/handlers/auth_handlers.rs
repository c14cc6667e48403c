use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use rand::Rng;
use serde::Deserialize;
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::session::{self, get_language, get_user_id, set_flash};
use crate::auth::{csrf, password, rate_limit::RateLimiter, validate};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, see_other};
use crate::models::audit::AuditAction;
use crate::models::profile::{self, NewAccount};
use crate::templates_structs::{AuthTemplate, LandingTemplate, PageContext};

#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    #[serde(default)]
    pub mode: String,
}

#[derive(Deserialize)]
pub struct VerifyQuery {
    #[serde(default)]
    pub token: String,
}

const FULL_NAME_MIN: usize = 2;
const FULL_NAME_MAX: usize = 100;

fn client_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn auth_page_with(
    session: &Session,
    config: &AppConfig,
    mode: &str,
    email: &str,
    full_name: &str,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(AuthTemplate {
        ctx: PageContext::public(session, config.utc_offset, "/auth"),
        mode: mode.to_string(),
        email: email.to_string(),
        full_name: full_name.to_string(),
        errors,
    })
}

/// GET /
pub async fn landing(session: Session, config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    render(LandingTemplate {
        ctx: PageContext::public(&session, config.utc_offset, "/"),
    })
}

/// GET /auth
pub async fn auth_page(
    session: Session,
    config: web::Data<AppConfig>,
    query: web::Query<AuthQuery>,
) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    let mode = if query.mode == "sign-up" { "sign-up" } else { "sign-in" };
    auth_page_with(&session, &config, mode, "", "", vec![])
}

/// POST /auth/sign-in
pub async fn sign_in(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    limiter: web::Data<RateLimiter>,
    form: web::Form<SignInForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let lang = get_language(&session);

    let ip = client_ip(&req);
    if limiter.is_blocked(ip) {
        log::warn!("Sign-in blocked for {ip}: too many failures");
        return auth_page_with(&session, &config, "sign-in", &form.email, "", vec![lang.t("auth.tooManyAttempts").to_string()]);
    }

    let errors: Vec<String> = [
        validate::validate_email(&form.email, lang),
        validate::validate_password(&form.password, lang),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !errors.is_empty() {
        return auth_page_with(&session, &config, "sign-in", &form.email, "", errors);
    }

    let creds = profile::find_credentials(&pool, &form.email).await?;
    let verified = match &creds {
        Some(c) => password::verify_password(&form.password, &c.password_hash)?,
        None => false,
    };
    let Some(creds) = creds.filter(|_| verified) else {
        limiter.record_failure(ip);
        log::info!("Failed sign-in for {}", form.email.trim());
        return auth_page_with(&session, &config, "sign-in", &form.email, "", vec![lang.t("auth.invalidCredentials").to_string()]);
    };

    if config.require_email_verification && !creds.email_verified {
        return auth_page_with(&session, &config, "sign-in", &form.email, "", vec![lang.t("auth.unverified").to_string()]);
    }

    limiter.clear(ip);
    let preferred = profile::find_by_user_id(&pool, creds.user_id)
        .await?
        .map(|p| p.preferred_language)
        .unwrap_or(lang);
    session::sign_in(&session, creds.user_id, preferred)?;

    let event = AuditEvent::new(creds.user_id, AuditAction::Login, "accounts").entity(creds.user_id);
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    Ok(see_other("/dashboard"))
}

/// POST /auth/sign-up
pub async fn sign_up(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<SignUpForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let lang = get_language(&session);

    let mut errors: Vec<String> = [
        validate::validate_length(&form.full_name, lang.t("auth.fullName"), FULL_NAME_MIN, FULL_NAME_MAX, lang),
        validate::validate_email(&form.email, lang),
        validate::validate_password(&form.password, lang),
        validate::validate_password_confirmation(&form.password, &form.confirm_password, lang),
    ]
    .into_iter()
    .flatten()
    .collect();
    if errors.is_empty() && profile::email_exists(&pool, &form.email).await? {
        errors.push(lang.t("auth.emailTaken").to_string());
    }
    if !errors.is_empty() {
        return auth_page_with(&session, &config, "sign-up", &form.email, &form.full_name, errors);
    }

    let token = hex::encode(rand::rng().random::<[u8; 32]>());
    let account = NewAccount {
        email: form.email.trim().to_string(),
        password_hash: password::hash_password(&form.password)?,
        full_name: form.full_name.trim().to_string(),
        email_verified: false,
        verification_token: Some(token.clone()),
        language: lang,
    };
    let user_id = profile::create_account(&pool, &account).await?;
    log::info!("Verification link for {}: /auth/verify?token={token}", account.email);

    let event = AuditEvent::new(user_id, AuditAction::Create, "accounts")
        .entity(user_id)
        .new_values(serde_json::json!({ "email": account.email, "full_name": account.full_name }));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    let key = if config.require_email_verification { "auth.registerSuccess" } else { "auth.registerSuccessActive" };
    set_flash(&session, lang.t(key));
    Ok(see_other("/auth"))
}

/// GET /auth/verify?token=
pub async fn verify(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<VerifyQuery>,
) -> Result<HttpResponse, AppError> {
    let lang = get_language(&session);
    let token = query.token.trim();
    let verified = if token.is_empty() { None } else { profile::verify_email(&pool, token).await? };
    match verified {
        Some(user_id) => {
            log::info!("Email verified for user {user_id}");
            set_flash(&session, lang.t("auth.verified"));
        }
        None => set_flash(&session, lang.t("auth.verifyInvalid")),
    }
    Ok(see_other("/auth"))
}

/// POST /auth/sign-out
pub async fn sign_out(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(user_id) = get_user_id(&session) {
        let event = AuditEvent::new(user_id, AuditAction::Logout, "accounts").entity(user_id);
        let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;
    }
    session::sign_out(&session);
    Ok(see_other("/auth"))
}
