//! Shared test infrastructure for database-backed tests.
//!
//! Each test gets its own Postgres schema with migrations applied, so tests
//! can run in parallel against one server. Set `TEST_DATABASE_URL` to enable
//! them; without it the database tests return early.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use mbj_portal::i18n::Language;
use mbj_portal::models::profile::{self, NewAccount};
use mbj_portal::models::role::AppRole;

pub const TEST_PASSWORD: &str = "rahsia123";

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Drop the per-test schema.
    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = self
            .admin
            .execute(format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema).as_str())
            .await;
    }
}

/// Fresh schema with migrations run, or `None` when no test database is configured.
pub async fn setup_test_db() -> Option<TestDb> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");

    let schema = format!("t_{}", hex::encode(rand::random::<[u8; 6]>()));
    admin
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .expect("Failed to create test schema");

    let options = PgConnectOptions::from_str(&url)
        .expect("Invalid TEST_DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("Failed to connect with test schema");

    mbj_portal::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(TestDb { pool, admin, schema })
}

/// Verified account with a single role. Returns the user id.
pub async fn create_user(pool: &PgPool, email: &str, full_name: &str, role: AppRole) -> i64 {
    let account = NewAccount {
        email: email.to_string(),
        password_hash: mbj_portal::auth::password::hash_password(TEST_PASSWORD)
            .expect("Failed to hash password"),
        full_name: full_name.to_string(),
        email_verified: true,
        verification_token: None,
        language: Language::Ms,
    };
    let user_id = profile::create_account(pool, &account)
        .await
        .expect("Failed to create account");
    if role != AppRole::Staff {
        profile::replace_role(pool, user_id, role)
            .await
            .expect("Failed to set role");
    }
    user_id
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}
