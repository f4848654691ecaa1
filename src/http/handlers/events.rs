use crate::domain::access::Caller;
use crate::domain::event::CreateEventRequest;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use uuid::Uuid;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    req.validate().map_err(ApiError::bad_request)?;

    let event = req.into_event(Uuid::new_v4(), caller.user_id, chrono::Utc::now());
    state.events_repo.insert(&event).await?;
    tracing::info!(event_id = %event.id, created_by = %caller.user_id, is_paid = event.is_paid, "event created");

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = path?;
    match state.events_repo.find_by_id(event_id).await? {
        Some(event) => Ok(Json(event)),
        None => Err(ApiError::not_found("Event not found")),
    }
}
