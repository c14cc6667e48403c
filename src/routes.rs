use actix_web::{middleware::from_fn, web};

use crate::auth::middleware::require_auth;
use crate::handlers::{
    admin_handlers, announcement_handlers, api_v1, auth_handlers, complaint_handlers, dashboard,
    decision_handlers, meeting_handlers, profile_handlers,
};

/// Every page and API route. Fixed segments such as `/meetings/new` are
/// registered before their `/{id}` siblings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public
        .route("/", web::get().to(auth_handlers::landing))
        .route("/auth", web::get().to(auth_handlers::auth_page))
        .route("/auth/sign-in", web::post().to(auth_handlers::sign_in))
        .route("/auth/sign-up", web::post().to(auth_handlers::sign_up))
        .route("/auth/verify", web::get().to(auth_handlers::verify))
        .route("/language", web::post().to(profile_handlers::switch_language))
        // Signed in
        .service(
            web::scope("")
                .wrap(from_fn(require_auth))
                .route("/dashboard", web::get().to(dashboard::index))
                .route("/auth/sign-out", web::post().to(auth_handlers::sign_out))
                // Meetings
                .route("/meetings", web::get().to(meeting_handlers::list))
                .route("/meetings/new", web::get().to(meeting_handlers::new_form))
                .route("/meetings", web::post().to(meeting_handlers::create))
                .route("/meetings/{id}", web::get().to(meeting_handlers::detail))
                .route("/meetings/{id}", web::post().to(meeting_handlers::update))
                .route("/meetings/{id}/edit", web::get().to(meeting_handlers::edit_form))
                .route("/meetings/{id}/delete", web::get().to(meeting_handlers::delete_confirm))
                .route("/meetings/{id}/delete", web::post().to(meeting_handlers::delete))
                // Decisions
                .route("/decisions", web::get().to(decision_handlers::list))
                .route("/decisions/new", web::get().to(decision_handlers::new_form))
                .route("/decisions", web::post().to(decision_handlers::create))
                .route("/decisions/{id}", web::post().to(decision_handlers::update))
                .route("/decisions/{id}/edit", web::get().to(decision_handlers::edit_form))
                .route("/decisions/{id}/delete", web::get().to(decision_handlers::delete_confirm))
                .route("/decisions/{id}/delete", web::post().to(decision_handlers::delete))
                // Complaints and suggestions
                .route("/complaints", web::get().to(complaint_handlers::list))
                .route("/complaints/new", web::get().to(complaint_handlers::new_form))
                .route("/complaints", web::post().to(complaint_handlers::create))
                .route("/complaints/{id}", web::get().to(complaint_handlers::detail))
                .route("/complaints/{id}/status", web::post().to(complaint_handlers::update_status))
                // Announcements
                .route("/announcements", web::get().to(announcement_handlers::list))
                .route("/announcements/new", web::get().to(announcement_handlers::new_form))
                .route("/announcements", web::post().to(announcement_handlers::create))
                .route("/announcements/{id}", web::post().to(announcement_handlers::update))
                .route("/announcements/{id}/edit", web::get().to(announcement_handlers::edit_form))
                .route("/announcements/{id}/delete", web::get().to(announcement_handlers::delete_confirm))
                .route("/announcements/{id}/delete", web::post().to(announcement_handlers::delete))
                // Profile
                .route("/profile", web::get().to(profile_handlers::show))
                .route("/profile", web::post().to(profile_handlers::update))
                .route("/profile/language", web::post().to(profile_handlers::update_language))
                // Administration
                .route("/admin", web::get().to(admin_handlers::index))
                .route("/admin/users/{id}/role", web::get().to(admin_handlers::role_confirm))
                .route("/admin/users/{id}/role", web::post().to(admin_handlers::change_role))
                // JSON
                .route("/api/v1/meetings", web::get().to(api_v1::meetings))
                .route("/api/v1/decisions", web::get().to(api_v1::decisions))
                .route("/api/v1/announcements", web::get().to(api_v1::announcements))
                .route("/api/v1/complaints", web::get().to(api_v1::complaints)),
        );
}
