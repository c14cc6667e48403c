use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpResponse, HttpServer, cookie::Key, middleware, web};

use mbj_portal::auth::rate_limit::RateLimiter;
use mbj_portal::config::AppConfig;
use mbj_portal::storage::MinutesStore;
use mbj_portal::{db, routes};

/// Minutes arrive base64-encoded inside the form body, so the limit sits
/// above the 10 MB file cap.
const FORM_LIMIT_BYTES: usize = 15 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if let Err(e) = db::seed_admin(&pool, email, password).await {
            log::error!("Could not seed admin account: {e}");
        }
    }

    // SESSION_KEY keeps sessions valid across restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+); generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set; generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    std::fs::create_dir_all(&config.upload_dir)?;
    let store = web::Data::new(MinutesStore::new(&config.upload_dir, &config.upload_public_base));
    let limiter = web::Data::new(RateLimiter::default());
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);
    let pool = web::Data::new(pool);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(config.cookie_secure)
            .cookie_http_only(true)
            .build();

        let mut app = App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(pool.clone())
            .app_data(config.clone())
            .app_data(store.clone())
            .app_data(limiter.clone())
            .app_data(web::FormConfig::default().limit(FORM_LIMIT_BYTES))
            .service(actix_files::Files::new("/static", "./static"));

        // Uploaded minutes are served locally unless the public base is an external URL
        if config.upload_public_base.starts_with('/') {
            app = app.service(actix_files::Files::new(&config.upload_public_base, &config.upload_dir));
        }

        app.configure(routes::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(include_str!("../templates/errors/404.html"))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
