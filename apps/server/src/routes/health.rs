use actix_web::{HttpResponse, Responder, get};

/// Liveness of the watchdog itself.
/// This route returns no content, the response status is enough.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
}
