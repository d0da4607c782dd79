//! Client registry route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Serialize;

use lex_core::ClientView;

use crate::error::{AppError, Result};
use crate::models::client::RegisterClientRequest;
use crate::state::AppState;

/// Build the clients router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(register_client))
        .route("/clients/{person_id}", delete(delete_client))
}

/// JSON body for successful mutations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: String,
}

/// List all clients.
///
/// # Errors
///
/// Returns 500 if the store read fails.
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientView>>> {
    tracing::debug!("Listing clients");
    let clients = state.registry().list_clients().await?;
    Ok(Json(clients))
}

/// Register an individual client.
///
/// # Errors
///
/// Returns 400 for a malformed body or missing fields, 500 if the
/// registration transaction is rolled back.
pub async fn register_client(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let registration = state.registry().register_client(&request).await?;
    tracing::info!(person_id = %registration.person_id, "Client registered");

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: registration.confirmation(),
        }),
    ))
}

/// Delete a client by person id.
///
/// # Errors
///
/// Returns 400 for a non-numeric id, 404 if no person was deleted, 500 if the
/// delete fails.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let person_id = state.registry().delete_client(&person_id).await?;

    Ok(Json(SuccessResponse {
        success: format!("Client (person id {person_id}) was deleted."),
    }))
}
