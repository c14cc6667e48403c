use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "csrf_token";

/// Token for the current session, minted on first use.
pub fn get_or_create_token(session: &Session) -> String {
    if let Ok(Some(token)) = session.get::<String>(SESSION_KEY) {
        return token;
    }
    let token = generate_token();
    let _ = session.insert(SESSION_KEY, &token);
    token
}

/// Compare a submitted form token against the session token.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session
        .get::<String>(SESSION_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    if tokens_match(&stored, submitted) {
        Ok(())
    } else {
        log::warn!("Rejected form post with a bad CSRF token");
        Err(AppError::Csrf)
    }
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Constant-time comparison; an empty stored token never matches.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    if stored.is_empty() || stored.len() != submitted.len() {
        return false;
    }
    stored
        .bytes()
        .zip(submitted.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
