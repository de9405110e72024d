use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use super::utils::CredentialsPayload;
use crate::database::models::user::UserId;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub email: String,
}

/// POST /api/auth/register - create an account from `{email, password}`
pub async fn register_post(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RegisteredUser> {
    let payload = CredentialsPayload::from_body(body);

    let id = state
        .credentials()
        .register(payload.email(), payload.password())
        .await?;

    Ok(ApiResponse::created(
        "User registered successfully.",
        RegisteredUser {
            id,
            email: payload.email().trim().to_string(),
        },
    ))
}
