//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub schema_version: i64,
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server and database are up", body = HealthResponse))
)]
pub async fn health(State(ctx): State<AppContext>) -> Result<Json<HealthResponse>, AppError> {
    let conn = ctx.conn()?;
    let schema_version = pb_db::migrations::current_version(&conn)?;
    Ok(Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        schema_version,
    }))
}
