use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{non_empty, validate_length, validate_optional};
use crate::i18n::Language;
use crate::models::role::RoleSet;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub avatar_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What sign-in needs from an account row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
    pub email_verified: bool,
}

/// Sign-up payload after validation and hashing.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub email_verified: bool,
    pub verification_token: Option<String>,
    pub language: Language,
}

/// Profile joined with its role set, for the admin user list.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithRoles {
    pub profile: Profile,
    pub roles: RoleSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    pub csrf_token: String,
}

pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 20;
pub const ORG_FIELD_MAX: usize = 100;

impl ProfileForm {
    pub fn from_profile(p: &Profile) -> Self {
        ProfileForm {
            full_name: p.full_name.clone(),
            phone: p.phone.clone().unwrap_or_default(),
            department: p.department.clone().unwrap_or_default(),
            position: p.position.clone().unwrap_or_default(),
            csrf_token: String::new(),
        }
    }

    /// Blank optional fields are stored as NULL.
    pub fn validate(&self, lang: Language) -> Result<ProfileUpdate, Vec<String>> {
        let errors: Vec<String> = [
            validate_length(&self.full_name, lang.t("auth.fullName"), FULL_NAME_MIN, FULL_NAME_MAX, lang),
            validate_optional(&self.phone, lang.t("profile.phone"), PHONE_MAX, lang),
            validate_optional(&self.department, lang.t("profile.department"), ORG_FIELD_MAX, lang),
            validate_optional(&self.position, lang.t("profile.position"), ORG_FIELD_MAX, lang),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProfileUpdate {
            full_name: self.full_name.trim().to_string(),
            phone: non_empty(&self.phone),
            department: non_empty(&self.department),
            position: non_empty(&self.position),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageForm {
    pub language: String,
    pub csrf_token: String,
    /// Where to send the browser afterwards; local paths only.
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleStats {
    pub total: usize,
    pub staff: usize,
    pub committee: usize,
    pub chairman: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, phone: &str) -> ProfileForm {
        ProfileForm {
            full_name: full_name.into(),
            phone: phone.into(),
            department: "  ".into(),
            position: "Pegawai Tadbir".into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn blank_optionals_become_none() {
        let update = form("  Ahmad Ali ", "").validate(Language::Ms).unwrap();
        assert_eq!(update.full_name, "Ahmad Ali");
        assert_eq!(update.phone, None);
        assert_eq!(update.department, None);
        assert_eq!(update.position.as_deref(), Some("Pegawai Tadbir"));
    }

    #[test]
    fn short_name_and_long_phone_are_rejected() {
        let errors = form("A", &"1".repeat(21)).validate(Language::En).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Full Name"));
        assert!(errors[1].starts_with("Phone Number"));
    }
}
