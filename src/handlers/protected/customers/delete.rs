use axum::extract::{Path, State};
use axum::Extension;

use super::parse_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// DELETE /api/customers/:id - 204 with an empty body
pub async fn customer_delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.customers().delete(user.id, parse_id(&id)?).await?;

    Ok(ApiResponse::no_content())
}
