use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::profile::{self, NewAccount};
use crate::models::role::AppRole;

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Ensure a verified chairman account exists for `email`. Existing accounts
/// are left untouched.
pub async fn seed_admin(pool: &PgPool, email: &str, password_plain: &str) -> Result<(), AppError> {
    if profile::email_exists(pool, email).await? {
        log::info!("Admin account {email} already present");
        return Ok(());
    }

    let account = NewAccount {
        email: email.trim().to_string(),
        password_hash: password::hash_password(password_plain)?,
        full_name: "Pentadbir MBJ".to_string(),
        email_verified: true,
        verification_token: None,
        language: Language::Ms,
    };
    let user_id = profile::create_account(pool, &account).await?;
    profile::replace_role(pool, user_id, AppRole::Chairman).await?;
    log::info!("Seeded chairman account {email}");
    Ok(())
}
