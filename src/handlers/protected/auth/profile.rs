use axum::Extension;

use crate::middleware::{ApiResponse, CurrentUser};

/// GET /api/auth/profile - the account behind the presented token
pub async fn profile_get(Extension(user): Extension<CurrentUser>) -> ApiResponse<CurrentUser> {
    ApiResponse::success("User profile retrieved successfully.", user)
}
