use axum::extract::{rejection::JsonRejection, State};
use axum::{Extension, Json};
use serde_json::Value;

use super::validated_input;
use crate::database::models::customer::Customer;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// POST /api/customers - create a customer owned by the caller
pub async fn customer_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Customer> {
    let input = validated_input(body)?;
    let customer = state.customers().create(user.id, &input).await?;

    Ok(ApiResponse::created("Customer created successfully", customer))
}
