use actix_session::Session;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::profile::{self, Profile};
use crate::models::role::{AppRole, RoleSet};

pub const USER_ID_KEY: &str = "user_id";
pub const LANG_KEY: &str = "lang";
const FLASH_KEY: &str = "flash";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).unwrap_or(None)
}

/// Session language, Malay when unset.
pub fn get_language(session: &Session) -> Language {
    session
        .get::<String>(LANG_KEY)
        .unwrap_or(None)
        .and_then(|code| Language::from_code(&code))
        .unwrap_or_default()
}

pub fn set_language(session: &Session, lang: Language) {
    let _ = session.insert(LANG_KEY, lang.code());
}

pub fn set_flash(session: &Session, message: impl Into<String>) {
    let _ = session.insert(FLASH_KEY, message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Start a fresh session for `user_id` with the stored language preference.
pub fn sign_in(session: &Session, user_id: i64, lang: Language) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    set_language(session, lang);
    Ok(())
}

pub fn sign_out(session: &Session) {
    session.purge();
}

/// Identity of the signed-in user, rebuilt from the session and database on
/// every request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub profile: Profile,
    pub roles: RoleSet,
    pub language: Language,
}

impl AuthContext {
    /// Fails with `AppError::Session` (a redirect to `/auth`) when nobody is
    /// signed in or the account no longer has a profile.
    pub async fn load(session: &Session, pool: &PgPool) -> Result<Self, AppError> {
        let user_id = get_user_id(session)
            .ok_or_else(|| AppError::Session("User not logged in".to_string()))?;

        let Some(profile) = profile::find_by_user_id(pool, user_id).await? else {
            session.purge();
            return Err(AppError::Session(format!("No profile for user {user_id}")));
        };
        let roles = profile::find_roles(pool, user_id).await?;

        Ok(Self {
            user_id,
            profile,
            roles,
            language: get_language(session),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    pub fn has_role(&self, role: AppRole) -> bool {
        self.roles.contains(role)
    }

    /// Guard for committee/chairman-only actions.
    pub fn require_admin(&self, action: &str) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!("{action} (user {})", self.user_id)))
        }
    }

    /// Complaint visibility: admins see everything (`None`), others only their own.
    pub fn complaint_scope(&self) -> Option<i64> {
        (!self.is_admin()).then_some(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn context_with(roles: &str) -> AuthContext {
        AuthContext {
            user_id: 42,
            profile: Profile {
                id: 1,
                user_id: 42,
                full_name: "Siti Aisyah".into(),
                email: "siti@jpj.gov.my".into(),
                phone: None,
                department: None,
                position: None,
                avatar_url: None,
                preferred_language: Language::Ms,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            roles: RoleSet::from_csv(roles),
            language: Language::Ms,
        }
    }

    #[test]
    fn staff_cannot_pass_admin_guard() {
        let ctx = context_with("staff");
        assert!(!ctx.is_admin());
        assert!(matches!(ctx.require_admin("meetings.create"), Err(AppError::PermissionDenied(_))));
        assert_eq!(ctx.complaint_scope(), Some(42));
    }

    #[test]
    fn committee_passes_admin_guard_and_sees_all_complaints() {
        let ctx = context_with("staff,committee");
        assert!(ctx.require_admin("meetings.create").is_ok());
        assert!(ctx.has_role(AppRole::Committee));
        assert_eq!(ctx.complaint_scope(), None);
    }
}
