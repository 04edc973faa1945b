//! Peak CRUD route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use pb_core::PeakId;
use pb_db::models::Peak;
use pb_db::queries::peaks;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::parse_id;

/// Request body for creating or replacing a peak.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PeakRequest {
    pub name: String,
    pub color: String,
}

/// Peak response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PeakResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    /// Display label.
    pub label: String,
    /// Canonical detail URL.
    pub url: String,
}

impl PeakResponse {
    pub fn from_model(peak: &Peak) -> Self {
        Self {
            id: peak.id.get(),
            name: peak.name.clone(),
            color: peak.color.clone(),
            label: peak.to_string(),
            url: peak.absolute_url(),
        }
    }
}

/// GET /api/peaks
#[utoipa::path(
    get,
    path = "/api/peaks",
    responses((status = 200, description = "List all peaks", body = Vec<PeakResponse>))
)]
pub async fn list_peaks(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<PeakResponse>>, AppError> {
    let conn = ctx.conn()?;
    let list = peaks::list_peaks(&conn)?;
    Ok(Json(list.iter().map(PeakResponse::from_model).collect()))
}

/// POST /api/peaks
#[utoipa::path(
    post,
    path = "/api/peaks",
    request_body = PeakRequest,
    responses(
        (status = 201, description = "Peak created", body = PeakResponse),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn create_peak(
    State(ctx): State<AppContext>,
    Json(payload): Json<PeakRequest>,
) -> Result<impl IntoResponse, AppError> {
    let conn = ctx.conn()?;
    let peak = peaks::create_peak(&conn, &payload.name, &payload.color)?;
    tracing::info!(peak_id = %peak.id, name = %peak, "Peak created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, peak.absolute_url())],
        Json(PeakResponse::from_model(&peak)),
    ))
}

/// GET /api/peaks/:id (also serves the peak detail route)
#[utoipa::path(
    get,
    path = "/api/peaks/{id}",
    params(("id" = i64, Path, description = "Peak ID")),
    responses(
        (status = 200, description = "Peak details", body = PeakResponse),
        (status = 404, description = "Peak not found")
    )
)]
pub async fn get_peak(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<PeakResponse>, AppError> {
    let peak_id: PeakId = parse_id(&id, "peak")?;
    let conn = ctx.conn()?;
    let peak = peaks::get_peak(&conn, peak_id)?
        .ok_or_else(|| pb_core::Error::not_found("peak", peak_id))?;
    Ok(Json(PeakResponse::from_model(&peak)))
}

/// PUT /api/peaks/:id
#[utoipa::path(
    put,
    path = "/api/peaks/{id}",
    params(("id" = i64, Path, description = "Peak ID")),
    request_body = PeakRequest,
    responses(
        (status = 200, description = "Peak updated", body = PeakResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Peak not found")
    )
)]
pub async fn update_peak(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(payload): Json<PeakRequest>,
) -> Result<Json<PeakResponse>, AppError> {
    let peak_id: PeakId = parse_id(&id, "peak")?;
    let conn = ctx.conn()?;
    if !peaks::update_peak(&conn, peak_id, &payload.name, &payload.color)? {
        return Err(pb_core::Error::not_found("peak", peak_id).into());
    }
    let peak = peaks::get_peak(&conn, peak_id)?
        .ok_or_else(|| pb_core::Error::not_found("peak", peak_id))?;
    Ok(Json(PeakResponse::from_model(&peak)))
}

/// DELETE /api/peaks/:id
#[utoipa::path(
    delete,
    path = "/api/peaks/{id}",
    params(("id" = i64, Path, description = "Peak ID")),
    responses(
        (status = 204, description = "Peak deleted"),
        (status = 404, description = "Peak not found")
    )
)]
pub async fn delete_peak(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let peak_id: PeakId = parse_id(&id, "peak")?;
    let conn = ctx.conn()?;
    if !peaks::delete_peak(&conn, peak_id)? {
        return Err(pb_core::Error::not_found("peak", peak_id).into());
    }
    tracing::info!(peak_id = %peak_id, "Peak deleted");
    Ok(StatusCode::NO_CONTENT)
}
