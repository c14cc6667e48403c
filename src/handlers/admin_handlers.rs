use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use crate::audit::{self, AuditEvent, RequestMeta};
use crate::auth::csrf;
use crate::auth::session::{AuthContext, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::{ListQuery, see_other};
use crate::models::audit::{self as audit_log, AuditAction, RECENT_LIMIT};
use crate::models::profile::{self, filter};
use crate::models::role::AppRole;
use crate::models::parse_filter;
use crate::templates_structs::{
    AdminTemplate, AuditRow, ConfirmTemplate, HiddenField, PageContext, SelectOption, UserRow, filter_options,
};

#[derive(Deserialize)]
pub struct RoleQuery {
    pub role: String,
}

#[derive(Deserialize)]
pub struct RoleForm {
    pub role: String,
    pub csrf_token: String,
}

/// GET /admin?tab=users|audit
pub async fn index(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("admin.view")?;
    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/admin");

    let tab = if query.tab == "audit" { "audit" } else { "users" };
    let (users, entries) = tokio::try_join!(
        profile::list_with_roles(&pool),
        audit_log::find_recent(&pool, RECENT_LIMIT),
    )?;

    let user_search = if tab == "users" { query.q.clone() } else { String::new() };
    let audit_search = if tab == "audit" { query.q.clone() } else { String::new() };

    let role = parse_filter::<AppRole>(Some(&query.role));
    let user_rows: Vec<UserRow> = filter::filter_users(&users, &user_search, role)
        .into_iter()
        .map(|u| UserRow::new(u, &ctx, auth.user_id))
        .collect();

    let entity = Some(query.entity.trim()).filter(|e| !e.is_empty() && *e != "all");
    let audit_rows: Vec<AuditRow> = audit_log::filter_entries(&entries, &audit_search, entity)
        .into_iter()
        .map(|e| AuditRow::new(e, &ctx))
        .collect();

    let mut entity_options = vec![SelectOption::new("all", ctx.t("common.all"), entity.is_none())];
    entity_options.extend(audit_log::entity_types(&entries).into_iter().map(|t| {
        let key = format!("audit.entity.{t}");
        let label = match ctx.t(&key) {
            label if label == key => t.clone(),
            label => label.to_string(),
        };
        let selected = entity == Some(t.as_str());
        SelectOption::new(t, label, selected)
    }));

    render(AdminTemplate {
        tab: tab.to_string(),
        stats: filter::role_stats(&users),
        role_options: filter_options(&ctx, AppRole::ALL, &query.role),
        users: user_rows,
        user_search,
        audit: audit_rows,
        audit_search,
        entity_options,
        ctx,
    })
}

/// GET /admin/users/{id}/role?role=
pub async fn role_confirm(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<RoleQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("admin.change_role")?;
    let user_id = path.into_inner();
    let role: AppRole = query.role.parse().map_err(|_| AppError::NotFound)?;
    let target = profile::find_by_user_id(&pool, user_id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &auth, config.utc_offset, "/admin");
    if user_id == auth.user_id {
        set_flash(&session, ctx.t("admin.cannotChangeOwnRole"));
        return Ok(see_other("/admin"));
    }

    render(ConfirmTemplate {
        title: ctx.t("admin.changeRole").to_string(),
        message: ctx.t("admin.changeRoleQuestion").to_string(),
        detail: format!("{} ({}) → {}", target.full_name, target.email, ctx.label(&role)),
        action: format!("/admin/users/{user_id}/role"),
        confirm_label: ctx.t("admin.confirmChange").to_string(),
        cancel_url: "/admin".to_string(),
        danger: false,
        hidden: vec![HiddenField { name: "role".to_string(), value: role.as_str().to_string() }],
        ctx,
    })
}

/// POST /admin/users/{id}/role
/// Admins may not change their own role.
pub async fn change_role(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<RoleForm>,
) -> Result<HttpResponse, AppError> {
    let auth = AuthContext::load(&session, &pool).await?;
    auth.require_admin("admin.change_role")?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let user_id = path.into_inner();
    let lang = auth.language;
    if user_id == auth.user_id {
        set_flash(&session, lang.t("admin.cannotChangeOwnRole"));
        return Ok(see_other("/admin"));
    }
    let Ok(role) = form.role.parse::<AppRole>() else {
        set_flash(&session, lang.t("admin.roleUpdateError"));
        return Ok(see_other("/admin"));
    };
    if profile::find_by_user_id(&pool, user_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let previous = match profile::replace_role(&pool, user_id, role).await {
        Ok(previous) => previous,
        Err(e) => {
            log::error!("Role change for user {user_id} failed: {e}");
            set_flash(&session, lang.t("admin.roleUpdateError"));
            return Ok(see_other("/admin"));
        }
    };

    let event = AuditEvent::new(auth.user_id, AuditAction::Update, "user_roles")
        .entity(user_id)
        .old(serde_json::json!({ "roles": previous.codes() }))
        .new_values(serde_json::json!({ "roles": [role.as_str()] }));
    let _ = audit::log(&pool, event, &RequestMeta::from_request(&req)).await;

    log::info!("User {} changed role of user {user_id} to {role}", auth.user_id);
    set_flash(&session, lang.t("admin.roleUpdated"));
    Ok(see_other("/admin"))
}
