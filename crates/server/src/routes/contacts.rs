use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::{contacts::Contact, errors::StorageError};

use crate::errors::ApiError;
use crate::state::AppState;

/// Count the request under `operation`, using `ok` as the success outcome.
fn observe<T>(state: &AppState, operation: &str, result: &Result<T, StorageError>, ok: &str) {
    let outcome = if result.is_ok() { ok } else { "error" };
    state.metrics.record(operation, outcome);
}

/// Gets the list of contacts
#[utoipa::path(get, path = "/contacts", tag = "contacts",
    responses((status = 200, description = "OK", body = [Contact])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let result = state.contacts.list().await;
    observe(&state, "list", &result, "ok");
    Ok(Json(result?))
}

/// Gets a specific contact; an unknown id yields `null` with 200
#[utoipa::path(get, path = "/contacts/{id}", tag = "contacts", operation_id = "GetContactById",
    params(("id" = i32, Path, description = "Identifier for the contact")),
    responses((status = 200, description = "The contact, or null when no contact has this id", body = Contact)))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<Contact>>, ApiError> {
    let result = state.contacts.get(id).await;
    let outcome = match &result {
        Ok(Some(_)) => "ok",
        Ok(None) => "not_found",
        Err(_) => "error",
    };
    state.metrics.record("get", outcome);
    Ok(Json(result?))
}

/// Creates a new contact
#[utoipa::path(post, path = "/contacts", tag = "contacts",
    request_body = Contact,
    responses((status = 201, description = "Created", body = Contact)))]
pub async fn create(
    State(state): State<AppState>,
    Json(contact): Json<Contact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let result = state.contacts.create(contact).await;
    observe(&state, "create", &result, "created");
    Ok((StatusCode::CREATED, Json(result?)))
}

/// Deletes every contact with the given id
#[utoipa::path(delete, path = "/contacts/{id}", tag = "contacts",
    params(("id" = i32, Path, description = "Identifier of the contact to be deleted")),
    responses(
        (status = 200, description = "OK", body = bool),
        (status = 404, description = "Contact not found", body = bool)
    ))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<bool>), ApiError> {
    let result = state.contacts.delete(id).await;
    let outcome = match &result {
        Ok(true) => "ok",
        Ok(false) => "not_found",
        Err(_) => "error",
    };
    state.metrics.record("delete", outcome);
    let deleted = result?;
    let status = if deleted { StatusCode::OK } else { StatusCode::NOT_FOUND };
    Ok((status, Json(deleted)))
}
