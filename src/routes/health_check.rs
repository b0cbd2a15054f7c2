//! src/routes/health_check.rs
use actix_web::HttpResponse;

/// Liveness probe. Does not touch storage or the notification transport.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
