use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Extension;

use crate::database::models::customer::Customer;
use crate::database::PageRequest;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// GET /api/customers?page=&per_page= - one page of the caller's customers
pub async fn customers_get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Customer>> {
    let api = &state.config().api;
    let request = PageRequest::from_query(
        params.get("page").map(String::as_str),
        params.get("per_page").map(String::as_str),
        api.default_per_page,
        api.max_per_page,
    );

    let page = state.customers().list(user.id, request).await?;
    let paging = page.paging();

    Ok(ApiResponse::paged(
        "Customers retrieved successfully",
        page.items,
        paging,
    ))
}
