use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::models::NewSite;
use crate::validation::validate_site_url;

/// Collection key for the calling user, taken from the `X-User-Id`
/// header. Requests without one share a single default collection.
pub fn user_key(req: &HttpRequest) -> String {
    req.headers()
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("default")
        .to_string()
}

#[get("/api/sites")]
pub async fn list_sites(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let sites = state.store.list(&user_key(&req)).await?;
    Ok(HttpResponse::Ok().json(sites))
}

#[post("/api/sites")]
pub async fn create_site(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<NewSite>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let url =
        validate_site_url(&body.url).map_err(|err| ApiError::InvalidInput(err.to_string()))?;

    // Unnamed sites are labelled by their host.
    let name = body
        .name
        .filter(|name| !name.is_empty())
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| body.url.clone());

    let site = state.store.add(&user_key(&req), body.url, name).await?;
    info!(site = %site.id, url = %site.url, "site registered");
    Ok(HttpResponse::Created().json(site))
}

#[delete("/api/sites/{id}")]
pub async fn delete_site(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    if state.store.remove(&user_key(&req), id).await? {
        info!(site = %id, "site removed");
    }
    // Deleting an id that was never registered is a no-op.
    Ok(HttpResponse::NoContent().finish())
}
