//! Climber route handlers: CRUD, the detail view, and peak association.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use pb_core::{ClimberId, PeakId};
use pb_db::models::Climber;
use pb_db::queries::{climbers, climbs};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::climbs::ClimbResponse;
use crate::routes::parse_id;
use crate::routes::peaks::PeakResponse;

/// Request body for creating or replacing a climber.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClimberRequest {
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

/// Climber response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ClimberResponse {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    pub label: String,
    pub url: String,
}

impl ClimberResponse {
    pub fn from_model(climber: &Climber) -> Self {
        Self {
            id: climber.id.get(),
            name: climber.name.clone(),
            breed: climber.breed.clone(),
            description: climber.description.clone(),
            age: climber.age,
            label: climber.to_string(),
            url: climber.absolute_url(),
        }
    }
}

/// Everything shown on a climber's detail page.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ClimberDetailResponse {
    #[serde(flatten)]
    pub climber: ClimberResponse,
    /// Peaks this climber has.
    pub peaks: Vec<PeakResponse>,
    /// Peaks that can still be added.
    pub available_peaks: Vec<PeakResponse>,
    /// Climbs, newest first.
    pub climbs: Vec<ClimbResponse>,
}

fn load_climber(conn: &rusqlite::Connection, id: ClimberId) -> pb_core::Result<Climber> {
    climbers::get_climber(conn, id)?.ok_or_else(|| pb_core::Error::not_found("climber", id))
}

/// GET /api/climbers
#[utoipa::path(
    get,
    path = "/api/climbers",
    responses((status = 200, description = "List all climbers", body = Vec<ClimberResponse>))
)]
pub async fn list_climbers(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ClimberResponse>>, AppError> {
    let conn = ctx.conn()?;
    let list = climbers::list_climbers(&conn)?;
    Ok(Json(list.iter().map(ClimberResponse::from_model).collect()))
}

/// POST /api/climbers
#[utoipa::path(
    post,
    path = "/api/climbers",
    request_body = ClimberRequest,
    responses(
        (status = 201, description = "Climber created", body = ClimberResponse),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn create_climber(
    State(ctx): State<AppContext>,
    Json(payload): Json<ClimberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let conn = ctx.conn()?;
    let climber = climbers::create_climber(
        &conn,
        &payload.name,
        &payload.breed,
        &payload.description,
        payload.age,
    )?;
    tracing::info!(climber_id = %climber.id, name = %climber, "Climber created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, climber.absolute_url())],
        Json(ClimberResponse::from_model(&climber)),
    ))
}

/// GET /api/climbers/:id
#[utoipa::path(
    get,
    path = "/api/climbers/{id}",
    params(("id" = i64, Path, description = "Climber ID")),
    responses(
        (status = 200, description = "Climber record", body = ClimberResponse),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn get_climber(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ClimberResponse>, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let conn = ctx.conn()?;
    let climber = load_climber(&conn, climber_id)?;
    Ok(Json(ClimberResponse::from_model(&climber)))
}

/// GET /climbers/:climber_id/
#[utoipa::path(
    get,
    path = "/climbers/{climber_id}/",
    params(("climber_id" = i64, Path, description = "Climber ID")),
    responses(
        (status = 200, description = "Climber detail page", body = ClimberDetailResponse),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn climber_detail(
    State(ctx): State<AppContext>,
    Path(climber_id): Path<String>,
) -> Result<Json<ClimberDetailResponse>, AppError> {
    let climber_id: ClimberId = parse_id(&climber_id, "climber")?;
    let conn = ctx.conn()?;
    let climber = load_climber(&conn, climber_id)?;

    let peaks = climbers::list_peaks(&conn, climber_id)?;
    let available = climbers::list_available_peaks(&conn, climber_id)?;
    let climbs = climbs::list_climbs_for_climber(&conn, climber_id)?;

    Ok(Json(ClimberDetailResponse {
        climber: ClimberResponse::from_model(&climber),
        peaks: peaks.iter().map(PeakResponse::from_model).collect(),
        available_peaks: available.iter().map(PeakResponse::from_model).collect(),
        climbs: climbs.iter().map(ClimbResponse::from_model).collect(),
    }))
}

/// PUT /api/climbers/:id
#[utoipa::path(
    put,
    path = "/api/climbers/{id}",
    params(("id" = i64, Path, description = "Climber ID")),
    request_body = ClimberRequest,
    responses(
        (status = 200, description = "Climber updated", body = ClimberResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn update_climber(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(payload): Json<ClimberRequest>,
) -> Result<Json<ClimberResponse>, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let conn = ctx.conn()?;
    let updated = climbers::update_climber(
        &conn,
        climber_id,
        &payload.name,
        &payload.breed,
        &payload.description,
        payload.age,
    )?;
    if !updated {
        return Err(pb_core::Error::not_found("climber", climber_id).into());
    }
    let climber = load_climber(&conn, climber_id)?;
    Ok(Json(ClimberResponse::from_model(&climber)))
}

/// DELETE /api/climbers/:id
#[utoipa::path(
    delete,
    path = "/api/climbers/{id}",
    params(("id" = i64, Path, description = "Climber ID")),
    responses(
        (status = 204, description = "Climber and all of its climbs deleted"),
        (status = 404, description = "Climber not found")
    )
)]
pub async fn delete_climber(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let conn = ctx.conn()?;
    if !climbers::delete_climber(&conn, climber_id)? {
        return Err(pb_core::Error::not_found("climber", climber_id).into());
    }
    tracing::info!(climber_id = %climber_id, "Climber deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/climbers/:id/peaks/:peak_id
#[utoipa::path(
    post,
    path = "/api/climbers/{id}/peaks/{peak_id}",
    params(
        ("id" = i64, Path, description = "Climber ID"),
        ("peak_id" = i64, Path, description = "Peak ID")
    ),
    responses(
        (status = 200, description = "Peaks now held by the climber", body = Vec<PeakResponse>),
        (status = 404, description = "Climber or peak not found")
    )
)]
pub async fn add_peak(
    State(ctx): State<AppContext>,
    Path((id, peak_id)): Path<(String, String)>,
) -> Result<Json<Vec<PeakResponse>>, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let peak_id: PeakId = parse_id(&peak_id, "peak")?;
    let conn = ctx.conn()?;

    climbers::add_peak(&conn, climber_id, peak_id)?;
    let peaks = climbers::list_peaks(&conn, climber_id)?;
    Ok(Json(peaks.iter().map(PeakResponse::from_model).collect()))
}

/// DELETE /api/climbers/:id/peaks/:peak_id
#[utoipa::path(
    delete,
    path = "/api/climbers/{id}/peaks/{peak_id}",
    params(
        ("id" = i64, Path, description = "Climber ID"),
        ("peak_id" = i64, Path, description = "Peak ID")
    ),
    responses(
        (status = 204, description = "Association removed"),
        (status = 404, description = "Climber does not have this peak")
    )
)]
pub async fn remove_peak(
    State(ctx): State<AppContext>,
    Path((id, peak_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let climber_id: ClimberId = parse_id(&id, "climber")?;
    let peak_id: PeakId = parse_id(&peak_id, "peak")?;
    let conn = ctx.conn()?;

    if !climbers::remove_peak(&conn, climber_id, peak_id)? {
        return Err(pb_core::Error::not_found(
            "climber peak",
            format!("{climber_id}/{peak_id}"),
        )
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
