use axum::extract::{rejection::JsonRejection, Path, State};
use axum::{Extension, Json};
use serde_json::Value;

use super::{parse_id, validated_input};
use crate::database::models::customer::Customer;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// PUT /api/customers/:id - replace name and email
pub async fn customer_put(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Customer> {
    let id = parse_id(&id)?;

    // Unknown or foreign ids are 404 before the body is looked at
    state.customers().get(user.id, id).await?;

    let input = validated_input(body)?;
    let customer = state.customers().update(user.id, id, &input).await?;

    Ok(ApiResponse::success("Customer updated successfully", customer))
}
