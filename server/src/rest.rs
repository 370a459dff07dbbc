//! REST handlers. Every failure is rendered as `{"status", "message"}`.

use crate::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use cityhub::api::{
    LineAvailabilityDto, LineFormDto, ScheduleDto, ScheduleFormDto, TransportLineDto,
};
use cityhub::entities::transport_lines::LineType;
use cityhub::error::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// Wraps the domain error so it can be turned into an HTTP response.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ServiceError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(ServiceError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ServiceError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServiceError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

type PathParam = Result<Path<String>, PathRejection>;

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError(ServiceError::InvalidInput(format!("Invalid id: {raw}"))))
}

fn path_id(path: PathParam) -> ApiResult<i64> {
    let Path(raw) = path?;
    parse_id(&raw)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// === Transport lines ===

pub async fn list_lines(State(state): State<AppState>) -> ApiResult<Json<Vec<TransportLineDto>>> {
    Ok(Json(state.lines.list_lines().await?))
}

pub async fn get_line(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<TransportLineDto>> {
    Ok(Json(state.lines.get_line(path_id(id)?).await?))
}

pub async fn create_line(
    State(state): State<AppState>,
    payload: Result<Json<LineFormDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TransportLineDto>)> {
    let Json(form) = payload?;
    let line = state.lines.create_line(form).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

pub async fn update_line(
    State(state): State<AppState>,
    id: PathParam,
    payload: Result<Json<LineFormDto>, JsonRejection>,
) -> ApiResult<Json<TransportLineDto>> {
    let id = path_id(id)?;
    let Json(form) = payload?;
    Ok(Json(state.lines.update_line(id, form).await?))
}

pub async fn delete_line(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<StatusCode> {
    state.lines.delete_line(path_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn lines_by_type(
    State(state): State<AppState>,
    line_type: PathParam,
) -> ApiResult<Json<Vec<TransportLineDto>>> {
    let Path(line_type) = line_type?;
    let line_type: LineType = line_type.parse()?;
    Ok(Json(state.lines.lines_by_type(line_type).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

pub async fn search_lines(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<TransportLineDto>>> {
    let Query(params) = params?;
    Ok(Json(state.lines.search_lines(&params.name).await?))
}

pub async fn line_availability(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<LineAvailabilityDto>> {
    let id = path_id(id)?;
    let now = Local::now().time();
    Ok(Json(state.lines.line_availability(id, now).await?))
}

// === Schedules ===

pub async fn list_schedules(State(state): State<AppState>) -> ApiResult<Json<Vec<ScheduleDto>>> {
    Ok(Json(state.schedules.list_schedules().await?))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<ScheduleDto>> {
    Ok(Json(state.schedules.get_schedule(path_id(id)?).await?))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleFormDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ScheduleDto>)> {
    let Json(form) = payload?;
    let schedule = state.schedules.create_schedule(form).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<StatusCode> {
    state.schedules.delete_schedule(path_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn schedules_for_line(
    State(state): State<AppState>,
    line_id: PathParam,
) -> ApiResult<Json<Vec<ScheduleDto>>> {
    Ok(Json(
        state.schedules.schedules_for_line(path_id(line_id)?).await?,
    ))
}

pub async fn schedules_for_station(
    State(state): State<AppState>,
    station: PathParam,
) -> ApiResult<Json<Vec<ScheduleDto>>> {
    let Path(station) = station?;
    Ok(Json(state.schedules.schedules_for_station(&station).await?))
}
