//! Request-level checks that need no database: routing, the sign-in gate,
//! CSRF rejection and public pages.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, cookie::Key, http::StatusCode, test, web};
use sqlx::postgres::PgPoolOptions;

use mbj_portal::auth::rate_limit::RateLimiter;
use mbj_portal::config::AppConfig;
use mbj_portal::routes;
use mbj_portal::storage::MinutesStore;

fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/mbj_unused".to_string()),
        _ => None,
    })
    .expect("Failed to build config")
}

macro_rules! portal_app {
    () => {{
        let config = test_config();
        // Never connects: these requests are answered before any query runs.
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("Invalid database URL");
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(MinutesStore::new(&config.upload_dir, &config.upload_public_base)))
                .app_data(web::Data::new(RateLimiter::default()))
                .app_data(web::Data::new(config))
                .configure(routes::configure),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_protected_pages_redirect_to_auth() {
    let app = portal_app!();
    for path in ["/dashboard", "/meetings", "/complaints/new", "/admin", "/api/v1/meetings"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers().get("Location").unwrap(), "/auth", "{path}");
    }
}

#[actix_rt::test]
async fn test_landing_and_auth_pages_render_in_malay_by_default() {
    let app = portal_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Portal Digital MBJ"));
    assert!(body.contains("name=\"csrf_token\""));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/auth?mode=sign-up").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("action=\"/auth/sign-up\""));
    assert!(body.contains("Sahkan Kata Laluan"));
}

#[actix_rt::test]
async fn test_sign_in_without_csrf_token_is_forbidden() {
    let app = portal_app!();
    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_form([("email", "a@b.my"), ("password", "secret1"), ("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_language_switch_requires_csrf_token() {
    let app = portal_app!();
    let req = test::TestRequest::post()
        .uri("/language")
        .set_form([("language", "en"), ("csrf_token", ""), ("next", "/")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_language_switch_with_session_token_changes_language() {
    let app = portal_app!();

    // Landing page issues the session cookie and embeds the token
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = resp
        .response()
        .cookies()
        .next()
        .expect("Session cookie missing")
        .into_owned();
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let token = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#)
        .unwrap()
        .captures(&body)
        .expect("CSRF token missing")[1]
        .to_string();

    let req = test::TestRequest::post()
        .uri("/language")
        .cookie(cookie.clone())
        .set_form([("language", "en"), ("csrf_token", token.as_str()), ("next", "//evil.example")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("Location").unwrap(), "/");
    let cookie = resp.response().cookies().next().map(|c| c.into_owned()).unwrap_or(cookie);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").cookie(cookie).to_request()).await;
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("MBJ Digital Portal"));
    assert!(body.contains("lang=\"en\""));
}
