//! Axum router construction.
//!
//! Builds the named detail routes, the JSON API, and the middleware stack.

use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use pb_core::urls::Route;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::peaks::list_peaks,
        routes::peaks::create_peak,
        routes::peaks::get_peak,
        routes::peaks::update_peak,
        routes::peaks::delete_peak,
        routes::climbers::list_climbers,
        routes::climbers::create_climber,
        routes::climbers::get_climber,
        routes::climbers::climber_detail,
        routes::climbers::update_climber,
        routes::climbers::delete_climber,
        routes::climbers::add_peak,
        routes::climbers::remove_peak,
        routes::climbs::list_climbs,
        routes::climbs::list_climber_climbs,
        routes::climbs::create_climber_climb,
        routes::climbs::get_climb,
        routes::climbs::update_climb,
        routes::climbs::delete_climb,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::peaks::PeakRequest,
        routes::peaks::PeakResponse,
        routes::climbers::ClimberRequest,
        routes::climbers::ClimberResponse,
        routes::climbers::ClimberDetailResponse,
        routes::climbs::ClimbRequest,
        routes::climbs::ClimbResponse,
        pb_core::ClimbTime,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Peaks
        .route(
            "/peaks",
            get(routes::peaks::list_peaks).post(routes::peaks::create_peak),
        )
        .route(
            "/peaks/{id}",
            get(routes::peaks::get_peak)
                .put(routes::peaks::update_peak)
                .delete(routes::peaks::delete_peak),
        )
        // Climbers
        .route(
            "/climbers",
            get(routes::climbers::list_climbers).post(routes::climbers::create_climber),
        )
        .route(
            "/climbers/{id}",
            get(routes::climbers::get_climber)
                .put(routes::climbers::update_climber)
                .delete(routes::climbers::delete_climber),
        )
        .route(
            "/climbers/{id}/peaks/{peak_id}",
            post(routes::climbers::add_peak).delete(routes::climbers::remove_peak),
        )
        .route(
            "/climbers/{id}/climbs",
            get(routes::climbs::list_climber_climbs).post(routes::climbs::create_climber_climb),
        )
        // Climbs
        .route("/climbs", get(routes::climbs::list_climbs))
        .route(
            "/climbs/{id}",
            get(routes::climbs::get_climb)
                .put(routes::climbs::update_climb)
                .delete(routes::climbs::delete_climb),
        )
        .route("/openapi.json", get(openapi_json));

    Router::new()
        // Named detail routes; records link here via `absolute_url()`.
        .route(Route::PeakDetail.pattern(), get(routes::peaks::get_peak))
        .route(
            Route::ClimberDetail.pattern(),
            get(routes::climbers::climber_detail),
        )
        .route("/health", get(routes::health::health))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use pb_db::pool::init_memory_pool;
    use tower::ServiceExt;

    fn app() -> (Router, AppContext) {
        let ctx = AppContext::new(init_memory_pool().unwrap());
        (build_router(ctx.clone()), ctx)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_schema_version() {
        let (app, _) = app();
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let json = json_body(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["schema_version"], 2);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let (app, _) = app();
        let resp = app
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn created_peak_location_resolves_to_detail_route() {
        let (app, _) = app();
        let resp = app
            .clone()
            .oneshot(post_json(
                "/api/peaks",
                serde_json::json!({"name": "Ama Dablam", "color": "white"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert_eq!(location, "/peaks/1/");

        let resp = app
            .oneshot(Request::get(&location).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["name"], "Ama Dablam");
        assert_eq!(json["label"], "Ama Dablam");
        assert_eq!(json["url"], location);
    }

    #[tokio::test]
    async fn climber_detail_route_lists_related_records() {
        let (app, ctx) = app();
        {
            let conn = ctx.conn().unwrap();
            let c = pb_db::queries::climbers::create_climber(&conn, "Lynn", "free", "Nose", 32)
                .unwrap();
            let p = pb_db::queries::peaks::create_peak(&conn, "El Capitan", "granite").unwrap();
            pb_db::queries::peaks::create_peak(&conn, "Half Dome", "granite").unwrap();
            pb_db::queries::climbers::add_peak(&conn, c.id, p.id).unwrap();
            pb_db::queries::climbs::create_climb(
                &conn,
                c.id,
                chrono::NaiveDate::from_ymd_opt(1993, 9, 14).unwrap(),
                Some(pb_core::ClimbTime::Night),
            )
            .unwrap();
        }

        let resp = app
            .oneshot(Request::get("/climbers/1/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["name"], "Lynn");
        assert_eq!(json["url"], "/climbers/1/");
        assert_eq!(json["peaks"][0]["name"], "El Capitan");
        assert_eq!(json["available_peaks"][0]["name"], "Half Dome");
        assert_eq!(json["climbs"][0]["label"], "Night on 1993-09-14");
    }

    #[tokio::test]
    async fn bad_id_is_400() {
        let (app, _) = app();
        let resp = app
            .oneshot(Request::get("/peaks/abc/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["code"], "validation_error");
    }

    #[tokio::test]
    async fn openapi_lists_detail_routes() {
        let (app, _) = app();
        let resp = app
            .oneshot(Request::get("/api/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert!(json["paths"]["/climbers/{climber_id}/"].is_object());
        assert!(json["paths"]["/api/climbs"].is_object());
    }
}
