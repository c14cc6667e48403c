use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::USER_ID_KEY;

/// Redirects to the sign-in page when the session carries no user.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let signed_in = req
        .get_session()
        .get::<i64>(USER_ID_KEY)
        .unwrap_or(None)
        .is_some();

    if !signed_in {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/auth"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
