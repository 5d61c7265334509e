// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use taskdeck_api::{
    map_error, parse_create_payload, parse_id_segment, parse_update_payload, ApiError, TaskDto,
    TaskListDto,
};
use taskdeck_store::{StoreError, StoreErrorCode};
use tracing::{error, warn};

/// Single exit point for every failure: logs the error, then writes the
/// uniform `{error, message, details?}` body. Client faults log at warn,
/// server faults at error with the full detail; the 500 body itself is
/// scrubbed unless the config exposes internals.
pub(crate) fn respond_error(state: &AppState, err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(kind = ?err.kind, status = status.as_u16(), detail = %err.message, "request failed");
        let body = if state.api.expose_internal_errors {
            err
        } else {
            ApiError::new(err.kind, "internal server error")
        };
        return (status, Json(body)).into_response();
    }
    warn!(kind = ?err.kind, status = status.as_u16(), "request rejected: {}", err.message);
    (status, Json(err)).into_response()
}

fn store_failure(err: StoreError) -> ApiError {
    match err.code {
        StoreErrorCode::Constraint => ApiError::constraint(err.message),
        StoreErrorCode::Unavailable => ApiError::storage(err.message),
        _ => ApiError::unknown(err.message),
    }
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::invalid_field("body", rejection.body_text())),
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub(crate) async fn list_tasks_handler(State(state): State<AppState>) -> Response {
    match state.repo.list().await {
        Ok(tasks) => {
            let dtos = tasks.iter().map(TaskDto::from).collect();
            (StatusCode::OK, Json(TaskListDto::new(dtos))).into_response()
        }
        Err(e) => respond_error(&state, store_failure(e)),
    }
}

pub(crate) async fn get_task_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id_segment(&raw_id) {
        Ok(id) => id,
        Err(e) => return respond_error(&state, e),
    };
    match state.repo.get(id).await {
        Ok(Some(task)) => (StatusCode::OK, Json(TaskDto::from(task))).into_response(),
        Ok(None) => respond_error(&state, ApiError::not_found(id.get())),
        Err(e) => respond_error(&state, store_failure(e)),
    }
}

pub(crate) async fn create_task_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let command = match json_body(payload).and_then(|v| parse_create_payload(&v)) {
        Ok(command) => command,
        Err(e) => return respond_error(&state, e),
    };
    match state.repo.insert(command).await {
        Ok(task) => (StatusCode::CREATED, Json(TaskDto::from(task))).into_response(),
        Err(e) => respond_error(&state, store_failure(e)),
    }
}

pub(crate) async fn update_task_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match parse_id_segment(&raw_id) {
        Ok(id) => id,
        Err(e) => return respond_error(&state, e),
    };
    let command = match json_body(payload).and_then(|v| parse_update_payload(&v)) {
        Ok(command) => command,
        Err(e) => return respond_error(&state, e),
    };
    match state.repo.update(id, command).await {
        Ok(Some(task)) => (StatusCode::OK, Json(TaskDto::from(task))).into_response(),
        Ok(None) => respond_error(&state, ApiError::not_found(id.get())),
        Err(e) => respond_error(&state, store_failure(e)),
    }
}

pub(crate) async fn delete_task_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id_segment(&raw_id) {
        Ok(id) => id,
        Err(e) => return respond_error(&state, e),
    };
    match state.repo.remove(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => respond_error(&state, ApiError::not_found(id.get())),
        Err(e) => respond_error(&state, store_failure(e)),
    }
}
