use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;

use super::sites::user_key;
use crate::AppState;
use crate::error::ApiError;
use crate::probe::{ProbeMethod, check_all};

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub url: String,
}

/// Ad hoc check of one caller-supplied URL, stored or not.
///
/// The probe cannot fail: unreachable or malformed targets come back as
/// `timeout`/`error` payloads, never as an HTTP error.
#[post("/api/check")]
pub async fn check_one(state: web::Data<AppState>, body: web::Json<CheckRequest>) -> HttpResponse {
    let result = state.executor.probe(&body.url, ProbeMethod::default()).await;
    HttpResponse::Ok().json(result)
}

/// Check every site in the caller's collection concurrently. The response
/// array mirrors the collection's registration order.
#[get("/api/check-all")]
pub async fn check_all_sites(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let sites = state.store.list(&user_key(&req)).await?;
    let reports = check_all(&state.executor, &sites).await;
    Ok(HttpResponse::Ok().json(reports))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::probe::testutil::{refused_origin, spawn_origin};
    use crate::test_state;

    #[actix_web::test]
    async fn check_reports_a_reachable_target_as_up() {
        let (url, _) = spawn_origin(200, 200).await;
        let (state, _dir) = test_state();
        let app = test::init_service(
            App::new().app_data(state).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/check")
            .set_json(json!({ "url": url }))
            .to_request();
        let result: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(result["status"], "up");
        assert_eq!(result["statusCode"], 200);
    }

    #[actix_web::test]
    async fn check_surfaces_probe_failure_as_payload_not_http_error() {
        let url = refused_origin().await;
        let (state, _dir) = test_state();
        let app = test::init_service(
            App::new().app_data(state).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/check")
            .set_json(json!({ "url": url }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let result: Value = test::read_body_json(resp).await;
        assert_eq!(result["status"], "error");
        assert!(result["errorDetail"].is_string());
    }

    #[actix_web::test]
    async fn check_all_reports_every_site_in_registration_order() {
        let (first, _) = spawn_origin(200, 200).await;
        let (second, _) = spawn_origin(503, 503).await;
        let (state, _dir) = test_state();
        let app = test::init_service(
            App::new().app_data(state).configure(crate::routes::routes),
        )
        .await;

        for (url, name) in [(&first, "first"), (&second, "second")] {
            let req = test::TestRequest::post()
                .uri("/api/sites")
                .set_json(json!({ "url": url, "name": name }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/check-all").to_request();
        let reports: Value = test::call_and_read_body_json(&app, req).await;

        let reports = reports.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["name"], "first");
        assert_eq!(reports[0]["status"], "up");
        assert_eq!(reports[1]["name"], "second");
        assert_eq!(reports[1]["status"], "down");
        assert_eq!(reports[1]["statusCode"], 503);
    }

    #[actix_web::test]
    async fn check_all_with_no_sites_is_an_empty_array() {
        let (state, _dir) = test_state();
        let app = test::init_service(
            App::new().app_data(state).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/check-all").to_request();
        let reports: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(reports, json!([]));
    }
}
