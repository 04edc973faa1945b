//! Climb route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pb_core::urls::{self, Route};
use pb_core::{ClimbId, ClimbTime, ClimberId};
use pb_db::models::{format_date, Climb};
use pb_db::queries::climbs;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::parse_id;

/// Request body for recording or replacing a climb.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClimbRequest {
    /// Climb Date, `YYYY-MM-DD` with a year from 0001 to 9999.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Time-of-day code; Morning when omitted.
    #[serde(default)]
    pub time: Option<ClimbTime>,
}

/// Climb response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ClimbResponse {
    pub id: i64,
    pub climber_id: i64,
    pub date: String,
    pub time: ClimbTime,
    pub time_label: String,
    /// "<time label> on <date>".
    pub label: String,
    /// Detail URL of the climber this climb belongs to.
    pub climber_url: String,
}

impl ClimbResponse {
    pub fn from_model(climb: &Climb) -> Self {
        Self {
            id: climb.id.get(),
            climber_id: climb.climber_id.get(),
            date: format_date(climb.date),
            time: climb.time,
            time_label: climb.time.label().to_string(),
            label: climb.to_string(),
            climber_url: urls::reverse(Route::ClimberDetail, climb.climber_id),
        }
    }
}

/// GET /api/climbs
#[utoipa::path(
    get,
    path = "/api/climbs",
    responses((status = 200, description = "Every climb, newest first", body = Vec<ClimbResponse>))
)]
pub async fn list_climbs(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ClimbResponse>>, AppError> {
    let conn = ctx.conn()?;
    let list = climbs::list_climbs(&conn)?;
    Ok(Json(list.iter().map(ClimbResponse::from_model).collect()))
}

/// GET /api/climbers/:id/climbs
#[utoipa::path(
    get,
    path = "/api/climbers/{id}/climbs",
    params(("id" = i64, Path, description = "Climber ID")),
    responses(
        (status = 200, description = "The climber's climbs, newest first", body = Vec<ClimbResponse>),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn list_climber_climbs(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ClimbResponse>>, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let conn = ctx.conn()?;
    if pb_db::queries::climbers::get_climber(&conn, climber_id)?.is_none() {
        return Err(pb_core::Error::not_found("climber", climber_id).into());
    }
    let list = climbs::list_climbs_for_climber(&conn, climber_id)?;
    Ok(Json(list.iter().map(ClimbResponse::from_model).collect()))
}

/// POST /api/climbers/:id/climbs
#[utoipa::path(
    post,
    path = "/api/climbers/{id}/climbs",
    params(("id" = i64, Path, description = "Climber ID")),
    request_body = ClimbRequest,
    responses(
        (status = 201, description = "Climb recorded", body = ClimbResponse),
        (status = 400, description = "Date outside 0001-01-01..=9999-12-31"),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn create_climber_climb(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(payload): Json<ClimbRequest>,
) -> Result<impl IntoResponse, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let conn = ctx.conn()?;
    let climb = climbs::create_climb(&conn, climber_id, payload.date, payload.time)?;
    tracing::info!(climb_id = %climb.id, climber_id = %climber_id, label = %climb, "Climb recorded");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, urls::reverse(Route::ClimberDetail, climber_id))],
        Json(ClimbResponse::from_model(&climb)),
    ))
}

/// GET /api/climbs/:id
#[utoipa::path(
    get,
    path = "/api/climbs/{id}",
    params(("id" = i64, Path, description = "Climb ID")),
    responses(
        (status = 200, description = "Climb record", body = ClimbResponse),
        (status = 404, description = "Climb not found")
    )
)]
pub async fn get_climb(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ClimbResponse>, AppError> {
    let climb_id: ClimbId = parse_id(&id, "climb")?;
    let conn = ctx.conn()?;
    let climb = climbs::get_climb(&conn, climb_id)?
        .ok_or_else(|| pb_core::Error::not_found("climb", climb_id))?;
    Ok(Json(ClimbResponse::from_model(&climb)))
}

/// PUT /api/climbs/:id
#[utoipa::path(
    put,
    path = "/api/climbs/{id}",
    params(("id" = i64, Path, description = "Climb ID")),
    request_body = ClimbRequest,
    responses(
        (status = 200, description = "Climb updated", body = ClimbResponse),
        (status = 400, description = "Date outside 0001-01-01..=9999-12-31"),
        (status = 404, description = "Climb not found")
    )
)]
pub async fn update_climb(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(payload): Json<ClimbRequest>,
) -> Result<Json<ClimbResponse>, AppError> {
    let climb_id: ClimbId = parse_id(&id, "climb")?;
    let conn = ctx.conn()?;
    let time = payload.time.unwrap_or_default();
    if !climbs::update_climb(&conn, climb_id, payload.date, time)? {
        return Err(pb_core::Error::not_found("climb", climb_id).into());
    }
    let climb = climbs::get_climb(&conn, climb_id)?
        .ok_or_else(|| pb_core::Error::not_found("climb", climb_id))?;
    Ok(Json(ClimbResponse::from_model(&climb)))
}

/// DELETE /api/climbs/:id
#[utoipa::path(
    delete,
    path = "/api/climbs/{id}",
    params(("id" = i64, Path, description = "Climb ID")),
    responses(
        (status = 204, description = "Climb deleted"),
        (status = 404, description = "Climb not found")
    )
)]
pub async fn delete_climb(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let climb_id: ClimbId = parse_id(&id, "climb")?;
    let conn = ctx.conn()?;
    if !climbs::delete_climb(&conn, climb_id)? {
        return Err(pb_core::Error::not_found("climb", climb_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
