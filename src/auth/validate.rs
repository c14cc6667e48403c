//! Form field checks. Each returns `Some(message)` on failure, localized and
//! prefixed with the field label the caller passes in.

use crate::i18n::Language;

pub const EMAIL_MAX: usize = 255;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;

fn len(value: &str) -> usize {
    value.trim().chars().count()
}

fn msg_required(field: &str, lang: Language) -> String {
    match lang {
        Language::Ms => format!("{field} diperlukan"),
        Language::En => format!("{field} is required"),
    }
}

fn msg_too_short(field: &str, min: usize, lang: Language) -> String {
    match lang {
        Language::Ms => format!("{field} mesti sekurang-kurangnya {min} aksara"),
        Language::En => format!("{field} must be at least {min} characters"),
    }
}

fn msg_too_long(field: &str, max: usize, lang: Language) -> String {
    match lang {
        Language::Ms => format!("{field} tidak boleh melebihi {max} aksara"),
        Language::En => format!("{field} must be at most {max} characters"),
    }
}

/// Non-empty, at most `max` characters.
pub fn validate_required(value: &str, field: &str, max: usize, lang: Language) -> Option<String> {
    validate_length(value, field, 1, max, lang)
}

/// Between `min` and `max` characters after trimming.
pub fn validate_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    lang: Language,
) -> Option<String> {
    let n = len(value);
    if n == 0 {
        return Some(msg_required(field, lang));
    }
    if n < min {
        return Some(msg_too_short(field, min, lang));
    }
    if n > max {
        return Some(msg_too_long(field, max, lang));
    }
    None
}

/// Empty is fine; otherwise at most `max` characters.
pub fn validate_optional(value: &str, field: &str, max: usize, lang: Language) -> Option<String> {
    if len(value) > max {
        return Some(msg_too_long(field, max, lang));
    }
    None
}

pub fn validate_email(email: &str, lang: Language) -> Option<String> {
    let field = lang.t("auth.email");
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some(msg_required(field, lang));
    }
    if trimmed.chars().count() > EMAIL_MAX {
        return Some(msg_too_long(field, EMAIL_MAX, lang));
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Some(match lang {
            Language::Ms => "Emel tidak sah".to_string(),
            Language::En => "Invalid email address".to_string(),
        });
    }
    None
}

/// Passwords are not trimmed.
pub fn validate_password(password: &str, lang: Language) -> Option<String> {
    let field = lang.t("auth.password");
    let n = password.chars().count();
    if n == 0 {
        return Some(msg_required(field, lang));
    }
    if n < PASSWORD_MIN {
        return Some(msg_too_short(field, PASSWORD_MIN, lang));
    }
    if n > PASSWORD_MAX {
        return Some(msg_too_long(field, PASSWORD_MAX, lang));
    }
    None
}

pub fn validate_password_confirmation(password: &str, confirm: &str, lang: Language) -> Option<String> {
    if password != confirm {
        return Some(match lang {
            Language::Ms => "Kata laluan tidak sepadan".to_string(),
            Language::En => "Passwords do not match".to_string(),
        });
    }
    None
}

/// Value must be one of `allowed`.
pub fn validate_choice(value: &str, allowed: &[&str], field: &str, lang: Language) -> Option<String> {
    if allowed.contains(&value.trim()) {
        return None;
    }
    Some(match lang {
        Language::Ms => format!("{field} tidak sah"),
        Language::En => format!("{field} is invalid"),
    })
}

/// Trim; empty becomes `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
