use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::utils::CredentialsPayload;
use crate::database::models::user::UserId;
use crate::database::CredentialError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub id: UserId,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/auth/login - exchange credentials for a bearer token
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<LoginData> {
    let payload = CredentialsPayload::from_body(body);

    let user = match state
        .credentials()
        .verify(payload.email(), payload.password())
        .await
    {
        Ok(user) => user,
        Err(CredentialError::InvalidCredentials) => {
            warn!("Failed login for {}", payload.email().trim());
            return Err(CredentialError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    let issued = state.tokens().issue(user.id, &user.email)?;
    info!("User {} logged in", user.id);

    Ok(ApiResponse::success(
        "Login successful.",
        LoginData {
            id: user.id,
            email: user.email,
            token: issued.token,
            expires_at: issued.expires_at,
        },
    ))
}
