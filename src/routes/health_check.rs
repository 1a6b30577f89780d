use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Liveness check for the hosting platform; always 200 with an empty body.
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
