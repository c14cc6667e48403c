//! Runtime configuration, read from the environment (and `.env` via dotenvy).

use chrono::FixedOffset;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_UPLOAD_DIR: &str = "data/uploads";
const DEFAULT_UPLOAD_PUBLIC_BASE: &str = "/uploads";
/// Malaysia (UTC+8).
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 480;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub upload_dir: String,
    pub upload_public_base: String,
    pub utc_offset: FixedOffset,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub require_email_verification: bool,
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let offset_minutes = match lookup("PORTAL_UTC_OFFSET") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("PORTAL_UTC_OFFSET must be minutes east of UTC, got '{raw}'"))?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| format!("PORTAL_UTC_OFFSET out of range: {offset_minutes}"))?;

        Ok(AppConfig {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: lookup("SESSION_KEY"),
            upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            upload_public_base: lookup("UPLOAD_PUBLIC_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_UPLOAD_PUBLIC_BASE.to_string()),
            utc_offset,
            admin_email: lookup("ADMIN_EMAIL").filter(|v| !v.trim().is_empty()),
            admin_password: lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()),
            require_email_verification: parse_flag(lookup("REQUIRE_EMAIL_VERIFICATION")),
            cookie_secure: parse_flag(lookup("COOKIE_SECURE")),
        })
    }
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
