use axum::extract::{Path, State};
use axum::Extension;

use super::parse_id;
use crate::database::models::customer::Customer;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// GET /api/customers/:id
pub async fn customer_get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Customer> {
    let customer = state.customers().get(user.id, parse_id(&id)?).await?;

    Ok(ApiResponse::success("Customer found successfully", customer))
}
